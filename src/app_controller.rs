use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{Config, LogLevel};
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::pipeline::{PipelineOptions, PipelineResult, SubtitlePipeline};
use crate::recognition::WhisperCli;
use crate::translation::core::LogEntry;
use crate::translation::{SegmentTranslator, TranslationService};

// @module: Application controller for subtitle generation

/// Number of segments shown in the console preview
const PREVIEW_SEGMENTS: usize = 5;

/// Main application controller for audio-to-subtitle processing
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Recognition engine, shared so model handles are initialized
    // once per process and reused across runs
    recognizer: Arc<WhisperCli>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let recognizer = Arc::new(WhisperCli::new(
            config.recognition.binary.clone(),
            config.recognition.timeout_secs,
        ));

        Ok(Self { config, recognizer })
    }

    /// Build a pipeline for one run, sharing the process-wide recognizer
    fn build_pipeline(&self, target_language: &str) -> SubtitlePipeline {
        let service = TranslationService::new(self.config.translation.clone());
        let translator = SegmentTranslator::new(service, target_language);

        SubtitlePipeline::new(
            self.recognizer.clone(),
            translator,
            PipelineOptions {
                tier: self.config.model_tier,
                bilingual: self.config.bilingual,
                min_segment_secs: self.config.recognition.min_segment_secs,
            },
        )
    }

    /// Run the main workflow for one audio file
    pub async fn run(&self, audio: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !audio.exists() {
            return Err(PipelineError::NoAudioProvided(format!("{:?} does not exist", audio)).into());
        }
        if !FileManager::is_audio_file(&audio) {
            return Err(PipelineError::NoAudioProvided(format!(
                "{:?} is not a supported audio file",
                audio
            ))
            .into());
        }

        FileManager::ensure_dir(&output_dir)?;

        let target_language = language_utils::normalize_tag(&self.config.target_language)
            .context("Invalid target language in configuration")?;

        let output_path =
            FileManager::generate_output_path(&audio, &output_dir, &target_language, "srt");
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, subtitle already exists (use -f to force overwrite)");
            return Ok(());
        }

        info!("Generating subtitles for {:?}", audio);

        let pipeline = self.build_pipeline(&target_language);
        let log_capture: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

        // The segment count is only known once transcription finishes, so the
        // bar is sized on the first progress tick.
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress.set_message("Transcribing audio");
        progress.enable_steady_tick(Duration::from_millis(120));

        let bar = progress.clone();
        let result = pipeline
            .run_with_progress(&audio, log_capture.clone(), move |current, total| {
                if bar.length() != Some(total as u64) {
                    bar.set_length(total as u64);
                    bar.set_message("Translating segments");
                }
                bar.set_position(current as u64);
            })
            .await;

        progress.finish_and_clear();

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                self.flush_translation_log(&log_capture, &audio, &output_dir, &target_language)?;
                return Err(e.into());
            }
        };

        self.write_artifacts(&result, &audio, &output_dir, &target_language)?;
        self.flush_translation_log(&log_capture, &audio, &output_dir, &target_language)?;
        self.report(&result, &target_language);

        info!(
            "Done in {} ({} segments)",
            Self::format_duration(start_time.elapsed()),
            result.segment_count
        );

        Ok(())
    }

    /// Process every audio file under a directory, isolating per-file failures
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        info!("Processing audio files in directory: {:?}", input_dir);

        let files = FileManager::find_audio_files(&input_dir)?;
        if files.is_empty() {
            warn!("No audio files found in {:?}", input_dir);
            return Ok(());
        }

        let mut processed_count = 0;
        for file in &files {
            let output_dir = file.parent().unwrap_or(Path::new(".")).to_path_buf();
            if let Err(e) = self.run(file.clone(), output_dir, force_overwrite).await {
                error!("Error processing {:?}: {}", file, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} of {} files", processed_count, files.len());
        Ok(())
    }

    /// Health check: probe the recognizer and the translation provider
    pub async fn check(&self) -> Result<()> {
        let mut healthy = true;

        match self.recognizer.probe().await {
            Ok(()) => info!("Recognition engine: ok"),
            Err(e) => {
                error!("Recognition engine: {}", e);
                healthy = false;
            }
        }

        let service = TranslationService::new(self.config.translation.clone());
        match service.test_connection().await {
            Ok(()) => info!("Translation provider '{}': ok", service.provider_name()),
            Err(e) => {
                error!("Translation provider '{}': {}", service.provider_name(), e);
                healthy = false;
            }
        }

        if healthy {
            info!("All checks passed");
            Ok(())
        } else {
            Err(anyhow::anyhow!("One or more health checks failed"))
        }
    }

    /// Write the rendered subtitle documents next to the audio file
    fn write_artifacts(
        &self,
        result: &PipelineResult,
        audio: &Path,
        output_dir: &Path,
        target_language: &str,
    ) -> Result<()> {
        let srt_path = FileManager::generate_output_path(audio, output_dir, target_language, "srt");
        FileManager::write_to_file(&srt_path, &result.srt)?;
        info!("Wrote {:?}", srt_path);

        if let Some(bilingual) = &result.bilingual_srt {
            let bilingual_path = FileManager::generate_output_path(
                audio,
                output_dir,
                target_language,
                "bilingual.srt",
            );
            FileManager::write_to_file(&bilingual_path, bilingual)?;
            info!("Wrote {:?}", bilingual_path);
        }

        Ok(())
    }

    /// Print the run summary to the console
    fn report(&self, result: &PipelineResult, target_language: &str) {
        let language_name = language_utils::get_language_name(&result.language)
            .unwrap_or_else(|_| result.language.clone());
        info!(
            "Detected language: {} ({})",
            language_name, result.language
        );

        if language_utils::language_codes_match(&result.language, target_language) {
            info!("Source already matches the target language; translation may be an identity");
        }

        debug!("Source preview:\n{}", result.source_preview(PREVIEW_SEGMENTS));
        debug!(
            "Translation preview:\n{}",
            result.translated_preview(PREVIEW_SEGMENTS)
        );
    }

    /// Persist captured translation-stage logs when debug logging is enabled
    fn flush_translation_log(
        &self,
        log_capture: &Arc<Mutex<Vec<LogEntry>>>,
        audio: &Path,
        output_dir: &Path,
        target_language: &str,
    ) -> Result<()> {
        if self.config.log_level != LogLevel::Debug && self.config.log_level != LogLevel::Trace {
            return Ok(());
        }

        let entries = log_capture.lock();
        if entries.is_empty() {
            return Ok(());
        }

        let mut content = String::new();
        for entry in entries.iter() {
            content.push_str(&format!("[{}] {}\n", entry.level, entry.message));
        }

        let log_path = FileManager::generate_output_path(audio, output_dir, target_language, "log");
        FileManager::write_to_file(&log_path, &content)?;
        debug!("Wrote translation log {:?}", log_path);

        Ok(())
    }

    /// Human-readable duration for the completion message
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m{:02}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{:01}s", total_secs, duration.subsec_millis() / 100)
        }
    }
}
