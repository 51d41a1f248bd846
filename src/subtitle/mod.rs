/*!
 * Subtitle synthesis: timestamp formatting, line wrapping and SRT rendering.
 *
 * This module turns translated transcript segments into display-ready SRT
 * documents. It is split into several submodules:
 *
 * - `timestamp`: SRT time notation for floating-point second offsets
 * - `wrap`: display-width-constrained line reflow
 * - `srt`: cue assembly and document rendering
 */

// Re-export main types for easier usage
pub use self::srt::{SrtRenderer, SubtitleCue};
pub use self::timestamp::format_timestamp;
pub use self::wrap::wrap;

// Submodules
pub mod srt;
pub mod timestamp;
pub mod wrap;
