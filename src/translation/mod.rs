/*!
 * Translation of transcript segments using machine-translation providers.
 *
 * This module contains the per-segment translation service and its
 * concurrent driver. It is split into two submodules:
 *
 * - `core`: service definition, provider dispatch and payload normalization
 * - `concurrency`: bounded-concurrency translation of segment sequences
 */

// Re-export main types for easier usage
pub use self::concurrency::{SegmentFailure, SegmentTranslator, TranslatedSegment};
pub use self::core::{LogEntry, SegmentTranslation, TranslationService};

// Submodules
pub mod concurrency;
pub mod core;
