/*!
 * SRT cue assembly and document rendering.
 *
 * Cues are built from positionally-paired transcript segments and translations,
 * wrapped for display, and concatenated into a single SRT document. The same
 * renderer produces mono-lingual (translated-only) and bilingual (source text
 * stacked above the translation) documents.
 */

use std::fmt;

use crate::errors::RenderError;
use crate::recognition::TranscriptSegment;

use super::timestamp::format_timestamp;
use super::wrap::wrap;

/// One rendered subtitle block
#[derive(Debug, Clone)]
pub struct SubtitleCue {
    /// 1-based sequence number, gap-free
    pub index: usize,

    /// Formatted start time
    pub start: String,

    /// Formatted end time
    pub end: String,

    /// Ordered display lines, already wrapped
    pub lines: Vec<String>,
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Renderer for SRT documents
pub struct SrtRenderer;

impl SrtRenderer {
    /// Build the ordered cue sequence for the given segments and translations.
    ///
    /// The two slices must have equal length and correspond positionally.
    /// When `bilingual` is set, each cue stacks the wrapped source text above
    /// the wrapped translation; timing is shared.
    pub fn build_cues(
        segments: &[TranscriptSegment],
        translations: &[String],
        bilingual: bool,
    ) -> Result<Vec<SubtitleCue>, RenderError> {
        if segments.len() != translations.len() {
            return Err(RenderError::LengthMismatch {
                segments: segments.len(),
                translations: translations.len(),
            });
        }

        let mut cues = Vec::with_capacity(segments.len());
        for (idx, (segment, translation)) in segments.iter().zip(translations).enumerate() {
            let mut lines = Vec::new();
            if bilingual {
                lines.extend(wrap(&segment.text).split('\n').map(str::to_string));
            }
            lines.extend(wrap(translation).split('\n').map(str::to_string));

            cues.push(SubtitleCue {
                index: idx + 1,
                start: format_timestamp(segment.start),
                end: format_timestamp(segment.end),
                lines,
            });
        }

        Ok(cues)
    }

    /// Render segments and translations into a complete SRT document.
    ///
    /// Cue blocks are concatenated in segment order; the final block is still
    /// followed by its blank-line separator.
    pub fn render(
        segments: &[TranscriptSegment],
        translations: &[String],
        bilingual: bool,
    ) -> Result<String, RenderError> {
        let cues = Self::build_cues(segments, translations, bilingual)?;

        let mut document = String::new();
        for cue in &cues {
            document.push_str(&cue.to_string());
        }
        Ok(document)
    }
}
