/*!
 * Error types for the subvox application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a translation provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur inside the speech-recognition engine
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The recognizer binary could not be located or executed
    #[error("Recognition binary unavailable: {0}")]
    BinaryUnavailable(String),

    /// The engine ran but exited with a failure status
    #[error("Recognition engine failed: {0}")]
    EngineFailed(String),

    /// The engine did not finish within the configured timeout
    #[error("Recognition timed out after {0} seconds")]
    Timeout(u64),

    /// The engine produced output that could not be parsed
    #[error("Failed to parse recognition output: {0}")]
    OutputParse(String),

    /// The audio file is missing or unreadable
    #[error("Audio file unreadable: {0}")]
    AudioUnreadable(String),
}

/// Errors that can occur during translation of a single segment
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Error raised by the SRT renderer when its input precondition is violated.
///
/// Mismatched sequence lengths are a programmer error, never a user-facing
/// condition; the pipeline only hands the renderer sequences it built itself.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Segment/translation length mismatch: {segments} segments, {translations} translations")]
    LengthMismatch {
        segments: usize,
        translations: usize,
    },
}

/// Single user-facing failure type for a pipeline run.
///
/// Every variant names the stage that failed and carries the underlying
/// collaborator report, so configuration problems (bad audio) can be told
/// apart from transient service problems (translation quota).
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No audio file was provided or the path is not an audio file
    #[error("No audio provided: {0}")]
    NoAudioProvided(String),

    /// The transcription stage failed after all attempts
    #[error("Transcription stage failed: {0}")]
    RecognitionFailed(#[source] RecognitionError),

    /// The recognizer returned no usable segments
    #[error("No speech detected in the audio")]
    NoSpeechDetected,

    /// The translation stage failed on a specific segment
    #[error("Translation stage failed on segment \"{segment_text}\": {source}")]
    TranslationFailed {
        /// Source text of the segment that failed
        segment_text: String,
        #[source]
        source: TranslationError,
    },

    /// The rendering stage hit a precondition violation
    #[error("Rendering stage failed: {0}")]
    Rendering(#[from] RenderError),
}

impl PipelineError {
    /// Name of the pipeline stage this error belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            Self::NoAudioProvided(_) => "input",
            Self::RecognitionFailed(_) | Self::NoSpeechDetected => "transcription",
            Self::TranslationFailed { .. } => "translation",
            Self::Rendering(_) => "rendering",
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the recognition engine
    #[error("Recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Error from a pipeline run
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
