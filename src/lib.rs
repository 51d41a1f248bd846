/*!
 * # subvox - spoken audio to translated subtitles
 *
 * A Rust library for turning audio recordings into time-synchronized,
 * translated SRT subtitle documents.
 *
 * ## Features
 *
 * - Transcribe audio through a local whisper engine with selectable
 *   model tiers (speed/accuracy tradeoff)
 * - Translate transcript segments with pluggable providers:
 *   - Google web endpoint
 *   - LibreTranslate (self-hosted)
 * - Render mono-lingual and bilingual SRT documents with display-width
 *   line wrapping
 * - Per-tier model handle caching, bounded translation concurrency
 * - Degraded-mode fallback to the fastest model tier
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `recognition`: Speech-recognition engine abstraction:
 *   - `recognition::whisper_cli`: Whisper subprocess engine
 *   - `recognition::model_cache`: Per-tier model handle cache
 * - `translation`: Machine translation of transcript segments:
 *   - `translation::core`: Service definition and payload normalization
 *   - `translation::concurrency`: Bounded-concurrency segment translation
 * - `subtitle`: Subtitle synthesis:
 *   - `subtitle::timestamp`: SRT time notation
 *   - `subtitle::wrap`: Display line wrapping
 *   - `subtitle::srt`: Cue assembly and document rendering
 * - `pipeline`: The transcribe-translate-render orchestrator
 * - `providers`: Client implementations for translation backends
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
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

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod recognition;
pub mod subtitle;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, PipelineError, ProviderError, RecognitionError, TranslationError};
pub use pipeline::{PipelineOptions, PipelineResult, SubtitlePipeline};
pub use recognition::{ModelTier, SpeechRecognizer, Transcript, TranscriptSegment};
pub use subtitle::{SrtRenderer, SubtitleCue};
pub use translation::{SegmentTranslator, TranslationService};
