/*!
 * Rate-limited document and page translation through the mock client
 */

use comprehend::app_config::PacingConfig;
use comprehend::client::{MockClient, TranslationOutcome};
use comprehend::errors::TranslationError;
use comprehend::translation::{DocumentTranslator, Page, PauseReason, RecordingSleeper};
use std::cell::RefCell;
use std::time::Duration;
use crate::common;

fn translator(client: &MockClient) -> (DocumentTranslator<MockClient, RecordingSleeper>, RecordingSleeper) {
    let sleeper = RecordingSleeper::new();
    let translator = DocumentTranslator::with_sleeper(client.clone(), sleeper.clone(), PacingConfig::default());
    (translator, sleeper)
}

fn settings() -> comprehend::TranslationSettings {
    common::test_settings("http://localhost/v2/translate")
}

/// k rate-limited attempts wait 200, 400, 800, ... ms before the success
#[tokio::test]
async fn test_translateDocument_withRateLimits_shouldDoubleEachWait() {
    let k = 6;
    let mut script = vec![TranslationOutcome::RateLimited; k];
    script.push(TranslationOutcome::Success("<p>Ende</p>".to_string()));
    let client = MockClient::scripted(script);
    let (translator, sleeper) = translator(&client);

    let result = translator.translate_document("<p>End</p>", &settings()).await;

    assert_eq!(result, Ok("<p>Ende</p>".to_string()));
    assert_eq!(client.request_count(), k + 1);
    let expected: Vec<Duration> = (0..k as u32)
        .map(|i| Duration::from_millis(100 * 2u64.pow(i + 1)))
        .collect();
    assert_eq!(sleeper.durations(PauseReason::Backoff), expected);
    assert_eq!(sleeper.durations(PauseReason::UnitCooldown), vec![Duration::from_millis(500)]);
}

/// A terminal failure on the second unit stops the document before the third
#[tokio::test]
async fn test_translateDocument_withUnauthorizedMidway_shouldAbort() {
    let client = MockClient::scripted([
        TranslationOutcome::Success("<p>Eins</p>".to_string()),
        TranslationOutcome::Unauthorized,
    ]);
    let (translator, sleeper) = translator(&client);

    let result = translator
        .translate_document("<p>One</p><p>Two</p><p>Three</p>", &settings())
        .await;

    assert_eq!(result, Err(TranslationError::Unauthorized));
    assert_eq!(client.requests(), vec!["<p>One</p>", "<p>Two</p>"]);
    assert_eq!(sleeper.durations(PauseReason::UnitCooldown).len(), 1);
    assert!(sleeper.durations(PauseReason::Backoff).is_empty());
}

#[tokio::test]
async fn test_translateDocument_withUnknownFailure_shouldCarryMessage() {
    let client = MockClient::scripted([TranslationOutcome::UnknownFailure("DeepL API error (500)".to_string())]);
    let (translator, _) = translator(&client);

    let result = translator.translate_document("<p>x</p>", &settings()).await;

    assert_eq!(result, Err(TranslationError::UnknownFailure("DeepL API error (500)".to_string())));
}

/// Units come back in document order even when the client is slow and jittery
#[tokio::test]
async fn test_translateDocument_withRandomLatency_shouldPreserveOrder() {
    let client = MockClient::working()
        .with_custom_response(|text| text.to_uppercase())
        .with_random_latency(0, 5);
    let sleeper = RecordingSleeper::new();
    let translator = DocumentTranslator::with_sleeper(client.clone(), sleeper, PacingConfig::immediate());

    let document: String = (0..8).map(|i| format!("<p>paragraph {}</p>", i)).collect();
    let result = translator.translate_document(&document, &settings()).await;

    assert_eq!(result, Ok(document.to_uppercase()));
    assert_eq!(client.request_count(), 8);
}

#[test]
fn test_translateUnit_withoutRuntime_shouldRunOnBlockOn() {
    let client = MockClient::scripted([
        TranslationOutcome::RateLimited,
        TranslationOutcome::Success("Grüße".to_string()),
    ]);
    let (translator, sleeper) = translator(&client);

    let result = tokio_test::block_on(translator.translate_unit("Greetings", &settings()));

    assert_eq!(result, Ok("Grüße".to_string()));
    assert_eq!(sleeper.durations(PauseReason::Backoff), vec![Duration::from_millis(200)]);
}

/// Pages are translated in order with a cooldown after each one
#[tokio::test]
async fn test_translatePages_shouldPauseAfterEveryPage() {
    let client = MockClient::working();
    let (translator, sleeper) = translator(&client);
    let pages = vec![
        Page::new("Intro", "<h1>#Welcome</h1>"),
        Page::empty("Blank"),
        Page::new("Lore", "<p>Old roads</p><p>New roads</p>"),
    ];
    let progress = RefCell::new(Vec::new());

    let translated = translator
        .translate_pages(&pages, &settings(), |done, total| progress.borrow_mut().push((done, total)))
        .await
        .unwrap();

    assert_eq!(translated.len(), 3);
    assert_eq!(translated[0].name, "Intro");
    assert_eq!(translated[0].content, "[DE] <h1>Welcome</h1>");
    assert_eq!(translated[1].content, "");
    assert_eq!(translated[2].content, "[DE] <p>Old roads</p>[DE] <p>New roads</p>");
    assert_eq!(client.request_count(), 3);
    assert_eq!(progress.into_inner(), vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(sleeper.durations(PauseReason::PageCooldown), vec![Duration::from_millis(5000); 3]);
}

#[tokio::test]
async fn test_translatePages_withQuotaExceeded_shouldStopAtFailingPage() {
    let client = MockClient::scripted([
        TranslationOutcome::Success("<p>Un</p>".to_string()),
        TranslationOutcome::QuotaExceeded,
    ]);
    let (translator, sleeper) = translator(&client);
    let pages = vec![
        Page::new("One", "<p>One</p>"),
        Page::new("Two", "<p>Two</p>"),
        Page::new("Three", "<p>Three</p>"),
    ];

    let result = translator.translate_pages(&pages, &settings(), |_, _| {}).await;

    assert_eq!(result, Err(TranslationError::QuotaExceeded));
    assert_eq!(client.request_count(), 2);
    assert_eq!(sleeper.durations(PauseReason::PageCooldown).len(), 1);
}
