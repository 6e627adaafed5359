use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::client::{DeepLClient, Translate};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::translation::{DocumentTranslator, Page, Sleeper};

/// Where translated pages are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Overwrite every source page with its translation
    InPlace,
    /// Write `<stem>.<lang>.html` next to each page; `force_overwrite` replaces existing files
    Alongside { force_overwrite: bool },
}

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files that were written
    pub written: Vec<PathBuf>,
    /// Pages skipped because their output already existed
    pub skipped: Vec<PathBuf>,
}

/// Main application controller for document translation
pub struct Controller {
    config: Config,
}

impl Controller {
    /// Create a new controller, validating the configuration first
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translator talking to the real service
    pub fn deepl_translator(&self) -> DocumentTranslator<DeepLClient> {
        DocumentTranslator::new(DeepLClient::new(self.config.timeout()), self.config.pacing.clone())
    }

    /// Translate a file (one page) or a directory (one page per markup file)
    pub async fn run(&self, input_path: &Path, mode: OutputMode) -> Result<RunSummary, AppError> {
        self.run_with_translator(&self.deepl_translator(), input_path, mode).await
    }

    /// Translate a single string such as a text selection
    pub async fn translate_selection(&self, text: &str) -> Result<String, AppError> {
        self.translate_selection_with(&self.deepl_translator(), text).await
    }

    /// Same as `translate_selection` with a caller-provided translator
    pub async fn translate_selection_with<C: Translate, S: Sleeper>(
        &self,
        translator: &DocumentTranslator<C, S>,
        text: &str,
    ) -> Result<String, AppError> {
        let settings = self.config.translation_settings()?;
        Ok(translator.translate_document(text, &settings).await?)
    }

    /// Same as `run` with a caller-provided translator
    pub async fn run_with_translator<C: Translate, S: Sleeper>(
        &self,
        translator: &DocumentTranslator<C, S>,
        input_path: &Path,
        mode: OutputMode,
    ) -> Result<RunSummary, AppError> {
        let start_time = std::time::Instant::now();
        let settings = self.config.translation_settings()?;

        let sources = self.collect_sources(input_path)?;
        let mut summary = RunSummary::default();

        let mut targets = Vec::with_capacity(sources.len());
        for source in sources {
            let target = match mode {
                OutputMode::InPlace => source.clone(),
                OutputMode::Alongside { force_overwrite } => {
                    let target = FileManager::generate_output_path(&source, &settings.target_language);
                    if target.exists() && !force_overwrite {
                        warn!("Skipping {:?}, translation already exists (use -f to force overwrite)", source);
                        summary.skipped.push(source);
                        continue;
                    }
                    target
                }
            };
            targets.push((source, target));
        }

        if targets.is_empty() {
            info!("Nothing to translate in {:?}", input_path);
            return Ok(summary);
        }

        let mut pages = Vec::with_capacity(targets.len());
        for (source, _) in &targets {
            let content = FileManager::read_to_string(source).map_err(|e| AppError::File(e.to_string()))?;
            let name = source
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default();
            pages.push(Page::new(name, content));
        }

        let progress_bar = ProgressBar::new(pages.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let translated = translator
            .translate_pages(&pages, &settings, |done, _total| progress_bar.set_position(done as u64))
            .await;
        progress_bar.finish_and_clear();
        let translated = translated?;

        // Nothing is written unless every page succeeded
        for ((_, target), page) in targets.iter().zip(translated) {
            FileManager::write_to_file(target, &page.content).map_err(|e| AppError::File(e.to_string()))?;
            summary.written.push(target.clone());
        }

        let language_name = language_utils::get_language_name(&settings.target_language)
            .unwrap_or_else(|_| settings.target_language.clone());
        info!(
            "Translated {} page(s) to {} in {:.1}s",
            summary.written.len(),
            language_name,
            start_time.elapsed().as_secs_f64()
        );

        Ok(summary)
    }

    fn collect_sources(&self, input_path: &Path) -> Result<Vec<PathBuf>, AppError> {
        if input_path.is_file() {
            Ok(vec![input_path.to_path_buf()])
        } else if input_path.is_dir() {
            FileManager::find_pages(input_path, &self.config.target_language)
                .map_err(|e| AppError::File(e.to_string()))
        } else {
            Err(AppError::File(format!("Input path does not exist: {:?}", input_path)))
        }
    }
}
