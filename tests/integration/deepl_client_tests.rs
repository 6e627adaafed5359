/*!
 * DeepL client tests against a local one-shot HTTP responder
 */

use anyhow::Result;
use comprehend::client::{DeepLClient, Translate, TranslationOutcome};
use std::time::Duration;
use crate::common;

fn client() -> DeepLClient {
    DeepLClient::new(Duration::from_secs(5))
}

/// A 200 response yields the first translation and the query carries every parameter
#[tokio::test]
async fn test_translate_withSuccess_shouldSendFullQuery() -> Result<()> {
    let server = common::spawn_one_shot_server(
        200,
        r#"{"translations":[{"detected_source_language":"EN","text":"<p>Hallo @UUID[Actor.a1]{Ork}</p>"}]}"#,
    )
    .await?;
    let settings = common::test_settings(&server.base_url);

    let outcome = client().translate("<p>Hello @Actor[a1]{Orc}</p>", &settings).await;
    let request_line = server.request_line.await?;

    assert_eq!(outcome, TranslationOutcome::Success("<p>Hallo @UUID[Actor.a1]{Ork}</p>".to_string()));
    assert!(request_line.starts_with("GET /v2/translate?auth_key=test-token%3Afx&text="));
    assert!(request_line.contains("%40UUID%5BActor.a1%5D"));
    assert!(!request_line.contains("%40Actor%5B"));
    assert!(request_line.contains("&target_lang=DE&source_lang=EN&tag_handling=html&formality=default"));
    Ok(())
}

#[tokio::test]
async fn test_translate_withErrorStatuses_shouldMapOutcomes() -> Result<()> {
    let cases = [
        (429, TranslationOutcome::RateLimited),
        (456, TranslationOutcome::QuotaExceeded),
        (401, TranslationOutcome::Unauthorized),
        (403, TranslationOutcome::Unauthorized),
    ];

    for (status, expected) in cases {
        let server = common::spawn_one_shot_server(status, "{}").await?;
        let outcome = client().translate("<p>x</p>", &common::test_settings(&server.base_url)).await;
        assert_eq!(outcome, expected, "status {}", status);
    }
    Ok(())
}

#[tokio::test]
async fn test_translate_withServerError_shouldReportStatusAndBody() -> Result<()> {
    let server = common::spawn_one_shot_server(500, "internal trouble").await?;

    let outcome = client().translate("<p>x</p>", &common::test_settings(&server.base_url)).await;

    match outcome {
        TranslationOutcome::UnknownFailure(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("internal trouble"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_translate_withMalformedBody_shouldBeUnknownFailure() -> Result<()> {
    let server = common::spawn_one_shot_server(200, r#"{"translations":[]}"#).await?;

    let outcome = client().translate("<p>x</p>", &common::test_settings(&server.base_url)).await;

    assert!(matches!(outcome, TranslationOutcome::UnknownFailure(_)));
    Ok(())
}

/// Transport failures never leak the token through the request URL
#[tokio::test]
async fn test_translate_withUnreachableHost_shouldHideToken() -> Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    drop(listener);

    let settings = common::test_settings(&format!("http://{}/v2/translate", address));
    let outcome = client().translate("<p>x</p>", &settings).await;

    match outcome {
        TranslationOutcome::UnknownFailure(message) => assert!(!message.contains("test-token")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    Ok(())
}
