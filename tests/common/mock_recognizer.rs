/*!
 * Mock speech-recognition engine for tests
 *
 * Returns scripted transcripts or failures per model tier and tracks which
 * tiers were invoked, so fallback behavior can be asserted without a real
 * engine.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;

use subvox::errors::RecognitionError;
use subvox::recognition::{ModelTier, SpeechRecognizer, Transcript, TranscriptSegment};

/// Scripted outcome for one tier
enum TierScript {
    Succeed(Vec<TranscriptSegment>),
    Fail(String),
}

/// Mock recognizer with per-tier scripting
pub struct MockRecognizer {
    /// Detected language reported on success
    language: String,
    /// Outcome per tier; unscripted tiers fail
    scripts: Mutex<HashMap<ModelTier, TierScript>>,
    /// Tiers invoked, in call order
    calls: Mutex<Vec<ModelTier>>,
}

impl MockRecognizer {
    /// Create a mock that fails for every tier until scripted
    pub fn new(language: &str) -> Self {
        MockRecognizer {
            language: language.to_string(),
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script a successful transcript for a tier
    pub fn succeed_with(self, tier: ModelTier, segments: Vec<TranscriptSegment>) -> Self {
        self.scripts
            .lock()
            .insert(tier, TierScript::Succeed(segments));
        self
    }

    /// Script a failure for a tier
    pub fn fail_with(self, tier: ModelTier, message: &str) -> Self {
        self.scripts
            .lock()
            .insert(tier, TierScript::Fail(message.to_string()));
        self
    }

    /// Tiers invoked so far, in call order
    pub fn calls(&self) -> Vec<ModelTier> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn transcribe(
        &self,
        _audio: &Path,
        tier: ModelTier,
    ) -> Result<Transcript, RecognitionError> {
        self.calls.lock().push(tier);

        match self.scripts.lock().get(&tier) {
            Some(TierScript::Succeed(segments)) => Ok(Transcript {
                segments: segments.clone(),
                language: self.language.clone(),
            }),
            Some(TierScript::Fail(message)) => {
                Err(RecognitionError::EngineFailed(message.clone()))
            }
            None => Err(RecognitionError::EngineFailed(format!(
                "unscripted tier {}",
                tier
            ))),
        }
    }
}
