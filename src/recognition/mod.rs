/*!
 * Speech recognition: engine abstraction, model tiers and transcript types.
 *
 * The recognition engine is a collaborator behind the [`SpeechRecognizer`]
 * trait. The shipped implementation shells out to a local whisper binary
 * (`whisper_cli`); model handles are lazily initialized at most once per tier
 * through the [`ModelCache`](model_cache::ModelCache).
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::RecognitionError;

pub use self::model_cache::{ModelCache, ModelHandle};
pub use self::whisper_cli::WhisperCli;

pub mod model_cache;
pub mod whisper_cli;

/// Recognition model tier, ordered fastest to most accurate
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    // @tier: Fastest, least accurate
    Tiny,
    // @tier: Balanced default
    #[default]
    Base,
    // @tier: Slower, more accurate
    Small,
    // @tier: Slowest, most accurate
    Medium,
}

impl ModelTier {
    /// All tiers in speed order
    pub const ALL: [ModelTier; 4] = [
        ModelTier::Tiny,
        ModelTier::Base,
        ModelTier::Small,
        ModelTier::Medium,
    ];

    /// The fastest tier, used as the degraded-mode fallback
    pub fn fastest() -> Self {
        ModelTier::Tiny
    }

    // @returns: Model name understood by the whisper engine
    pub fn model_name(&self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Base => "base",
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.model_name())
    }
}

impl std::str::FromStr for ModelTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "base" => Ok(Self::Base),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            _ => Err(anyhow!("Invalid model tier: {}", s)),
        }
    }
}

/// One utterance span from the recognizer.
///
/// Produced once per recognition pass and never mutated afterwards;
/// `0 <= start < end`, text trimmed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start offset in seconds
    pub start: f64,

    /// End offset in seconds
    pub end: f64,

    /// Source-language text
    pub text: String,
}

impl TranscriptSegment {
    /// Span duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Full recognition output for one audio file
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Utterance spans in chronological order
    pub segments: Vec<TranscriptSegment>,

    /// Detected source language code (e.g. "en")
    pub language: String,
}

/// Common trait for speech-recognition engines
///
/// This trait defines the interface the pipeline needs from a recognizer,
/// allowing engine implementations to be swapped (and mocked in tests).
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe an audio file with the given model tier
    ///
    /// # Arguments
    /// * `audio` - Path to the audio file
    /// * `tier` - Model tier to transcribe with
    ///
    /// # Returns
    /// * `Result<Transcript, RecognitionError>` - Time-stamped segments and the detected language
    async fn transcribe(&self, audio: &Path, tier: ModelTier)
    -> Result<Transcript, RecognitionError>;
}
