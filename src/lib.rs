/*!
 * # Comprehend - rich-text document translation
 *
 * A Rust library for translating journal pages, item descriptions and
 * selected text through the DeepL API without breaking their markup.
 *
 * ## Features
 *
 * - Paragraph-level chunking of HTML so every request stays small
 * - Tag/text segmentation of markup
 * - Rewriting of legacy entity references before text leaves the process
 * - Strictly sequential, rate-limited translation with unbounded
 *   exponential backoff on HTTP 429 and a fixed cooldown between requests
 * - Direct, relayed or own-proxy transport
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `references`: Legacy reference rewriting
 * - `html`: Tag/text and paragraph splitting
 * - `client`: One remote call per unit:
 *   - `client::deepl`: DeepL HTTP client
 *   - `client::endpoint`: Transport endpoint resolution
 *   - `client::mock`: Scripted client for tests
 * - `translation`: Orchestration:
 *   - `translation::orchestrator`: Document translation with retry and cooldown
 *   - `translation::pages`: Multi-page documents
 *   - `translation::pacing`: Sleepers and backoff state
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: Target language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Test names follow the test_subject_shouldBehavior convention
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod client;
pub mod errors;
pub mod file_utils;
pub mod html;
pub mod language_utils;
pub mod references;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, Formality, PacingConfig, ProxyType, TranslationSettings};
pub use client::{DeepLClient, Translate, TranslationOutcome, TranslationRequest};
pub use errors::{AppError, ConfigError, TranslationError};
pub use html::{split_paragraphs, split_tags, DocumentUnit, Segment};
pub use references::rewrite_references;
pub use translation::{DocumentTranslator, Page, TranslatedPage};
