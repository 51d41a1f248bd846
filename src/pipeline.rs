/*!
 * Pipeline orchestrator: transcription, per-segment translation and SRT
 * rendering as one fail-fast state machine.
 *
 * A run moves linearly through
 * IDLE -> TRANSCRIBING -> TRANSLATING -> RENDERING -> DONE, dropping to
 * FAILED from any stage. There is no partial or resumable state; a failed
 * run restarts from transcription.
 */

use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::errors::PipelineError;
use crate::recognition::{ModelTier, SpeechRecognizer, Transcript, TranscriptSegment};
use crate::subtitle::SrtRenderer;
use crate::translation::core::LogEntry;
use crate::translation::{SegmentTranslator, TranslatedSegment};

/// Pipeline stages, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Transcribing,
    Translating,
    Rendering,
    Done,
    Failed,
}

/// Options for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Model tier to transcribe with
    pub tier: ModelTier,

    /// Whether to also render the bilingual document
    pub bilingual: bool,

    /// Minimum segment duration in seconds; shorter spans are dropped
    pub min_segment_secs: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            tier: ModelTier::default(),
            bilingual: false,
            min_segment_secs: 0.1,
        }
    }
}

/// Final artifact bundle of a successful run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Detected source language code, as reported by the recognizer
    pub language: String,

    /// Concatenated source text, one segment per line
    pub source_text: String,

    /// Concatenated translated text, one segment per line
    pub translated_text: String,

    /// Mono-lingual SRT document
    pub srt: String,

    /// Bilingual SRT document, when requested
    pub bilingual_srt: Option<String>,

    /// Number of segments that survived filtering
    pub segment_count: usize,
}

/// Truncate a concatenated text to its first `limit` lines
fn preview_lines(text: &str, limit: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= limit {
        text.to_string()
    } else {
        format!("{}...", lines[..limit].join("\n"))
    }
}

impl PipelineResult {
    /// Short preview of the source text
    pub fn source_preview(&self, limit: usize) -> String {
        preview_lines(&self.source_text, limit)
    }

    /// Short preview of the translated text
    pub fn translated_preview(&self, limit: usize) -> String {
        preview_lines(&self.translated_text, limit)
    }
}

/// Orchestrator driving one audio file through the full pipeline
pub struct SubtitlePipeline {
    /// Recognition engine collaborator
    recognizer: Arc<dyn SpeechRecognizer>,

    /// Concurrent per-segment translator
    translator: SegmentTranslator,

    /// Run options
    options: PipelineOptions,
}

impl SubtitlePipeline {
    /// Create a new pipeline
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        translator: SegmentTranslator,
        options: PipelineOptions,
    ) -> Self {
        Self {
            recognizer,
            translator,
            options,
        }
    }

    /// Run the pipeline without progress reporting
    pub async fn run(&self, audio: &Path) -> Result<PipelineResult, PipelineError> {
        self.run_with_progress(audio, Arc::new(Mutex::new(Vec::new())), |_, _| {})
            .await
    }

    /// Run the pipeline, reporting translation progress through the callback
    /// and capturing stage logs into `log_capture`.
    pub async fn run_with_progress(
        &self,
        audio: &Path,
        log_capture: Arc<Mutex<Vec<LogEntry>>>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<PipelineResult, PipelineError> {
        let mut stage = PipelineStage::Idle;

        let result = self
            .drive(audio, &mut stage, log_capture, progress_callback)
            .await;

        match &result {
            Ok(_) => stage = PipelineStage::Done,
            Err(e) => {
                stage = PipelineStage::Failed;
                warn!("Pipeline failed in {} stage: {}", e.stage(), e);
            }
        }
        debug!("Pipeline finished in state {:?}", stage);

        result
    }

    async fn drive(
        &self,
        audio: &Path,
        stage: &mut PipelineStage,
        log_capture: Arc<Mutex<Vec<LogEntry>>>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<PipelineResult, PipelineError> {
        *stage = PipelineStage::Transcribing;
        let transcript = self.transcribe_with_fallback(audio).await?;

        let segments = self.filter_segments(transcript.segments);
        if segments.is_empty() {
            return Err(PipelineError::NoSpeechDetected);
        }
        info!(
            "Transcription done: {} usable segments, detected language '{}'",
            segments.len(),
            transcript.language
        );

        *stage = PipelineStage::Translating;
        let translated = self
            .translator
            .translate_segments(&segments, log_capture, progress_callback)
            .await
            .map_err(|failure| PipelineError::TranslationFailed {
                segment_text: failure.segment_text,
                source: failure.source,
            })?;

        *stage = PipelineStage::Rendering;
        self.render(transcript.language, segments, translated)
    }

    /// Transcribe with at most one fallback attempt against the fastest tier.
    ///
    /// A failed fallback surfaces the original error, not the fallback's own.
    async fn transcribe_with_fallback(
        &self,
        audio: &Path,
    ) -> Result<Transcript, PipelineError> {
        let tier = self.options.tier;

        let original_error = match self.recognizer.transcribe(audio, tier).await {
            Ok(transcript) => return Ok(transcript),
            Err(e) => e,
        };

        if tier == ModelTier::fastest() {
            return Err(PipelineError::RecognitionFailed(original_error));
        }

        let fallback = ModelTier::fastest();
        warn!(
            "Transcription with '{}' failed ({}), retrying once with '{}'",
            tier, original_error, fallback
        );
        match self.recognizer.transcribe(audio, fallback).await {
            Ok(transcript) => Ok(transcript),
            Err(fallback_error) => {
                debug!("Fallback transcription also failed: {}", fallback_error);
                Err(PipelineError::RecognitionFailed(original_error))
            }
        }
    }

    /// Drop near-silence spans and empty text before translation.
    ///
    /// The segment count reported to the caller reflects this filtered set,
    /// not the raw recognizer output.
    fn filter_segments(&self, segments: Vec<TranscriptSegment>) -> Vec<TranscriptSegment> {
        let raw_count = segments.len();
        let filtered: Vec<TranscriptSegment> = segments
            .into_iter()
            .filter(|segment| {
                !segment.text.trim().is_empty()
                    && segment.duration() > self.options.min_segment_secs
            })
            .collect();

        if filtered.len() != raw_count {
            debug!(
                "Filtered {} of {} segments (near-silence or empty text)",
                raw_count - filtered.len(),
                raw_count
            );
        }
        filtered
    }

    /// Assemble the artifact bundle from the translated segments
    fn render(
        &self,
        language: String,
        segments: Vec<TranscriptSegment>,
        translated: Vec<TranslatedSegment>,
    ) -> Result<PipelineResult, PipelineError> {
        let translations: Vec<String> = translated.into_iter().map(|t| t.text).collect();

        let srt = SrtRenderer::render(&segments, &translations, false)?;
        let bilingual_srt = if self.options.bilingual {
            Some(SrtRenderer::render(&segments, &translations, true)?)
        } else {
            None
        };

        let source_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let translated_text = translations.join("\n");

        Ok(PipelineResult {
            language,
            source_text,
            translated_text,
            srt,
            bilingual_srt,
            segment_count: segments.len(),
        })
    }
}
