/*!
 * Tests for SRT rendering properties
 */

use crate::common;
use subvox::errors::RenderError;
use subvox::subtitle::wrap::MAX_LINE_WIDTH;
use subvox::subtitle::{SrtRenderer, format_timestamp, wrap};

/// Reference scenario document, byte for byte
#[test]
fn test_render_scenario_shouldMatchReferenceDocument() {
    let segments = common::hello_world_segments();
    let translations = vec!["你好".to_string(), "今天的世界".to_string()];

    let srt = SrtRenderer::render(&segments, &translations, false).unwrap();
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:01,500\n你好\n\n2\n00:00:01,500 --> 00:00:04,000\n今天的世界\n\n"
    );
}

/// Cue count and order track the input for arbitrary sequence lengths
#[test]
fn test_render_withManySegments_shouldPreserveOrderAndIndices() {
    let segments: Vec<_> = (0..25)
        .map(|i| common::segment(i as f64, i as f64 + 0.5, &format!("utterance {}", i)))
        .collect();
    let translations: Vec<String> = (0..25).map(|i| format!("translated {}", i)).collect();

    let cues = SrtRenderer::build_cues(&segments, &translations, false).unwrap();
    assert_eq!(cues.len(), 25);
    for (position, cue) in cues.iter().enumerate() {
        assert_eq!(cue.index, position + 1);
        assert_eq!(cue.lines, vec![format!("translated {}", position)]);
    }
}

/// Bilingual documents keep the cue count and contain the mono text block
#[test]
fn test_render_bilingual_shouldBeSupersetOfMono() {
    let segments = vec![
        common::segment(0.0, 2.0, "A long introduction sentence that will wrap"),
        common::segment(2.0, 4.0, "Short"),
    ];
    let translations = vec![
        "Une longue phrase d'introduction qui va se replier".to_string(),
        "Court".to_string(),
    ];

    let mono = SrtRenderer::build_cues(&segments, &translations, false).unwrap();
    let bilingual = SrtRenderer::build_cues(&segments, &translations, true).unwrap();

    assert_eq!(mono.len(), bilingual.len());
    for (mono_cue, bilingual_cue) in mono.iter().zip(&bilingual) {
        let mono_block = mono_cue.lines.join("\n");
        let bilingual_block = bilingual_cue.lines.join("\n");
        assert!(
            bilingual_block.contains(&mono_block),
            "bilingual cue {} does not contain the mono block",
            bilingual_cue.index
        );
    }
}

/// Long text is wrapped inside cues, within the display width
#[test]
fn test_render_withLongTranslation_shouldWrapCueLines() {
    let segments = vec![common::segment(0.0, 5.0, "source")];
    let translations = vec![
        "this translation is deliberately much longer than forty characters so it wraps"
            .to_string(),
    ];

    let cues = SrtRenderer::build_cues(&segments, &translations, false).unwrap();
    assert!(cues[0].lines.len() > 1);
    for line in &cues[0].lines {
        assert!(line.chars().count() <= MAX_LINE_WIDTH);
    }
}

/// Mismatched inputs are rejected as a precondition violation
#[test]
fn test_render_withMismatchedInputs_shouldFail() {
    let segments = common::hello_world_segments();
    let translations = vec!["你好".to_string()];

    let err = SrtRenderer::render(&segments, &translations, false).unwrap_err();
    assert!(matches!(err, RenderError::LengthMismatch { .. }));
}

/// Timestamps inside documents use truncated milliseconds
#[test]
fn test_render_timestampFields_shouldTruncateMillis() {
    let segments = vec![common::segment(3661.2345, 3662.9999, "x")];
    let translations = vec!["y".to_string()];

    let srt = SrtRenderer::render(&segments, &translations, false).unwrap();
    assert!(srt.contains("01:01:01,234 --> 01:01:02,999"));
    assert_eq!(format_timestamp(3661.2345), "01:01:01,234");
}

/// Wrapper determinism through the renderer path
#[test]
fn test_wrap_appliedTwice_shouldBeStable() {
    let text = "a stream of words that needs to be broken into several display lines for readability";
    let once = wrap(text);
    let again = wrap(&once.replace('\n', " "));
    assert_eq!(once, again);
}
