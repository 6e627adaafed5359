use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for translation service language codes
///
/// Target languages are given as the service expects them: an ISO 639-1
/// code, optionally followed by a regional variant (`DE`, `EN-GB`, `PT-BR`,
/// `ZH-HANS`). Only the base code is checked against ISO 639-1.

/// Split a target code into its base language and optional variant
pub fn split_language_code(code: &str) -> (String, Option<String>) {
    let trimmed = code.trim();
    match trimmed.split_once('-') {
        Some((base, variant)) => (base.to_lowercase(), Some(variant.to_uppercase())),
        None => (trimmed.to_lowercase(), None),
    }
}

/// Validate a target language code and return it in the service's canonical upper-case form
pub fn normalize_target_language(code: &str) -> Result<String> {
    let (base, variant) = split_language_code(code);

    if base.len() != 2 || Language::from_639_1(&base).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    match variant {
        Some(variant) if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Err(anyhow!("Invalid language variant in code: {}", code))
        }
        Some(variant) => Ok(format!("{}-{}", base.to_uppercase(), variant)),
        None => Ok(base.to_uppercase()),
    }
}

/// Get the English name of a target language code
pub fn get_language_name(code: &str) -> Result<String> {
    let (base, _) = split_language_code(code);
    Language::from_639_1(&base)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}
