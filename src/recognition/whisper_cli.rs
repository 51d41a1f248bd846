/*!
 * Subprocess-based whisper recognition engine.
 *
 * Runs a local `whisper` command-line binary against the audio file and parses
 * the JSON transcript it writes into a scratch directory. The scratch
 * directory is a `tempfile::TempDir`, removed on every exit path when it goes
 * out of scope.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::process::Command;

use crate::errors::RecognitionError;

use super::model_cache::{ModelCache, ModelHandle};
use super::{ModelTier, SpeechRecognizer, Transcript, TranscriptSegment};

/// Raw segment as emitted by the whisper JSON writer
#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
}

/// Raw transcript document as emitted by the whisper JSON writer
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    language: String,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

/// Whisper CLI engine with per-tier model handle caching
pub struct WhisperCli {
    /// Recognizer binary to invoke
    binary: PathBuf,

    /// Per-run timeout in seconds
    timeout_secs: u64,

    /// Lazily-initialized model handles, shared across runs
    models: ModelCache,
}

impl WhisperCli {
    /// Create a new engine for the given binary and timeout
    pub fn new(binary: impl Into<PathBuf>, timeout_secs: u64) -> Self {
        Self {
            binary: binary.into(),
            timeout_secs,
            models: ModelCache::new(),
        }
    }

    /// Probe the engine once and resolve the tier's weights in the local store.
    ///
    /// The first transcription per tier pays this cost; later runs reuse the
    /// cached handle.
    async fn load_model(&self, tier: ModelTier) -> Result<ModelHandle, RecognitionError> {
        let output = Command::new(&self.binary)
            .arg("--help")
            .output()
            .await
            .map_err(|e| {
                RecognitionError::BinaryUnavailable(format!("{:?}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            return Err(RecognitionError::BinaryUnavailable(format!(
                "{:?} exited with {}",
                self.binary, output.status
            )));
        }

        let weights = Self::model_store_dir()
            .map(|dir| dir.join(format!("{}.pt", tier.model_name())))
            .filter(|path| path.exists());

        match &weights {
            Some(path) => debug!("Model '{}' found in store: {:?}", tier, path),
            None => info!(
                "Model '{}' not in the local store, the engine will fetch it on first use",
                tier
            ),
        }

        Ok(ModelHandle { tier, weights })
    }

    /// Local directory where the whisper engine keeps downloaded weights
    fn model_store_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("whisper"))
    }

    /// Strip progress noise from engine stderr, keeping the useful lines
    fn filter_stderr(stderr: &str) -> String {
        let lines: Vec<&str> = stderr
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter(|line| !line.contains('%') && !line.starts_with("Downloading"))
            .collect();

        if lines.is_empty() {
            "engine produced no diagnostic output".to_string()
        } else {
            // The tail usually carries the actual failure
            lines
                .iter()
                .rev()
                .take(5)
                .rev()
                .cloned()
                .collect::<Vec<_>>()
                .join("; ")
        }
    }

    /// Run one transcription pass and parse the JSON artifact
    async fn run_engine(
        &self,
        audio: &Path,
        handle: &ModelHandle,
    ) -> Result<Transcript, RecognitionError> {
        let scratch = tempfile::tempdir()
            .map_err(|e| RecognitionError::EngineFailed(format!("scratch dir: {}", e)))?;

        // fp16 off for CPU decoding; conditioning on previous text disabled
        // to keep errors from accumulating across long audio.
        let engine_future = Command::new(&self.binary)
            .arg(audio)
            .args(["--model", handle.tier.model_name()])
            .args(["--output_format", "json"])
            .arg("--output_dir")
            .arg(scratch.path())
            .args(["--beam_size", "5"])
            .args(["--fp16", "False"])
            .args(["--condition_on_previous_text", "False"])
            .args(["--verbose", "False"])
            .output();

        let timeout = std::time::Duration::from_secs(self.timeout_secs);
        let output = tokio::select! {
            result = engine_future => {
                result.map_err(|e| RecognitionError::BinaryUnavailable(format!("{:?}: {}", self.binary, e)))?
            },
            _ = tokio::time::sleep(timeout) => {
                return Err(RecognitionError::Timeout(self.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::EngineFailed(Self::filter_stderr(&stderr)));
        }

        let stem = audio
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let artifact = scratch.path().join(format!("{}.json", stem));

        let raw = std::fs::read_to_string(&artifact).map_err(|e| {
            RecognitionError::OutputParse(format!("missing artifact {:?}: {}", artifact, e))
        })?;

        let parsed: WhisperOutput = serde_json::from_str(&raw)
            .map_err(|e| RecognitionError::OutputParse(e.to_string()))?;

        // The engine pads segment text with leading spaces; the transcript
        // contract guarantees trimmed text.
        let segments = parsed
            .segments
            .into_iter()
            .map(|s| TranscriptSegment {
                start: s.start,
                end: s.end,
                text: s.text.trim().to_string(),
            })
            .collect();

        Ok(Transcript {
            segments,
            language: parsed.language,
        })
    }

    /// Check that the recognizer binary is runnable at all
    pub async fn probe(&self) -> Result<(), RecognitionError> {
        let handle = self
            .models
            .get_or_init(ModelTier::fastest(), || {
                self.load_model(ModelTier::fastest())
            })
            .await?;
        debug!("Recognizer probe succeeded for tier '{}'", handle.tier);
        Ok(())
    }
}

#[async_trait]
impl SpeechRecognizer for WhisperCli {
    async fn transcribe(
        &self,
        audio: &Path,
        tier: ModelTier,
    ) -> Result<Transcript, RecognitionError> {
        if !audio.exists() {
            return Err(RecognitionError::AudioUnreadable(format!(
                "{:?} does not exist",
                audio
            )));
        }

        let handle: Arc<ModelHandle> = self
            .models
            .get_or_init(tier, || self.load_model(tier))
            .await?;

        info!("Transcribing {:?} with model '{}'", audio, tier);
        let transcript = self.run_engine(audio, &handle).await?;

        if transcript.segments.is_empty() {
            warn!("Recognizer returned no segments for {:?}", audio);
        } else {
            debug!(
                "Recognized {} segments, detected language '{}'",
                transcript.segments.len(),
                transcript.language
            );
        }

        Ok(transcript)
    }
}
