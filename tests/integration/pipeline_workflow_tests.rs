/*!
 * End-to-end pipeline tests with mocked collaborators
 */

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::common;
use crate::common::mock_providers::MockTranslate;
use crate::common::mock_recognizer::MockRecognizer;
use subvox::app_config::TranslationConfig;
use subvox::errors::PipelineError;
use subvox::pipeline::{PipelineOptions, SubtitlePipeline};
use subvox::recognition::ModelTier;
use subvox::translation::{SegmentTranslator, TranslationService};

fn pipeline_with(
    recognizer: Arc<MockRecognizer>,
    provider: MockTranslate,
    options: PipelineOptions,
) -> SubtitlePipeline {
    let service = TranslationService::with_provider(Arc::new(provider), TranslationConfig::default());
    let translator = SegmentTranslator::new(service, "zh-TW");
    SubtitlePipeline::new(recognizer, translator, options)
}

fn audio() -> &'static Path {
    Path::new("talk.mp3")
}

/// Full happy path: transcription, translation, rendering
#[tokio::test]
async fn test_pipeline_run_withTwoSegments_shouldProduceReferenceArtifacts() {
    common::init_test_logging();
    let recognizer = Arc::new(
        MockRecognizer::new("en").succeed_with(ModelTier::Base, common::hello_world_segments()),
    );
    let provider = MockTranslate::new()
        .respond_with("Hello", json!("你好"))
        .respond_with("world today", json!("今天的世界"));

    let pipeline = pipeline_with(recognizer, provider, PipelineOptions::default());
    let result = pipeline.run(audio()).await.unwrap();

    assert_eq!(result.language, "en");
    assert_eq!(result.segment_count, 2);
    assert_eq!(result.source_text, "Hello\nworld today");
    assert_eq!(result.translated_text, "你好\n今天的世界");
    assert!(result.bilingual_srt.is_none());
    assert_eq!(
        result.srt,
        "1\n00:00:00,000 --> 00:00:01,500\n你好\n\n2\n00:00:01,500 --> 00:00:04,000\n今天的世界\n\n"
    );
}

/// Bilingual runs add a second document with the same cue count
#[tokio::test]
async fn test_pipeline_run_withBilingual_shouldAddStackedDocument() {
    let recognizer = Arc::new(
        MockRecognizer::new("en").succeed_with(ModelTier::Base, common::hello_world_segments()),
    );
    let provider = MockTranslate::new()
        .respond_with("Hello", json!("你好"))
        .respond_with("world today", json!("今天的世界"));

    let options = PipelineOptions {
        bilingual: true,
        ..PipelineOptions::default()
    };
    let pipeline = pipeline_with(recognizer, provider, options);
    let result = pipeline.run(audio()).await.unwrap();

    let bilingual = result.bilingual_srt.as_deref().unwrap();
    assert_eq!(
        bilingual.matches(" --> ").count(),
        result.srt.matches(" --> ").count()
    );
    assert!(bilingual.contains("Hello\n你好"));
    assert!(bilingual.contains("world today\n今天的世界"));
}

/// Near-silence and empty segments never reach translation or the document
#[tokio::test]
async fn test_pipeline_run_withDegenerateSegments_shouldFilterThem() {
    let segments = vec![
        common::segment(0.0, 0.05, "blip"),
        common::segment(0.1, 2.0, "Hello"),
        common::segment(2.0, 4.0, "   "),
        common::segment(4.0, 6.0, "world"),
    ];
    let recognizer = Arc::new(MockRecognizer::new("en").succeed_with(ModelTier::Base, segments));
    let provider = MockTranslate::new();
    let tracker = provider.tracker();

    let pipeline = pipeline_with(recognizer, provider, PipelineOptions::default());
    let result = pipeline.run(audio()).await.unwrap();

    assert_eq!(result.segment_count, 2);
    assert!(!result.srt.contains("blip"));
    assert_eq!(tracker.lock().call_count, 2);
    // Indices are renumbered over the filtered set, without gaps
    assert!(result.srt.starts_with("1\n00:00:00,100 --> 00:00:02,000"));
    assert!(result.srt.contains("\n2\n00:00:04,000 --> 00:00:06,000"));
}

/// A transcript with nothing usable is a "no speech detected" failure
#[tokio::test]
async fn test_pipeline_run_withEmptyTranscript_shouldReportNoSpeech() {
    let recognizer =
        Arc::new(MockRecognizer::new("en").succeed_with(ModelTier::Base, Vec::new()));
    let pipeline = pipeline_with(recognizer, MockTranslate::new(), PipelineOptions::default());

    let error = pipeline.run(audio()).await.unwrap_err();
    assert!(matches!(error, PipelineError::NoSpeechDetected));
    assert_eq!(error.stage(), "transcription");
}

/// A failed transcription falls back once to the fastest tier
#[tokio::test]
async fn test_pipeline_run_withRecognitionFailure_shouldFallBackToFastestTier() {
    let recognizer = Arc::new(
        MockRecognizer::new("en")
            .fail_with(ModelTier::Small, "model load failed")
            .succeed_with(ModelTier::Tiny, common::hello_world_segments()),
    );
    let options = PipelineOptions {
        tier: ModelTier::Small,
        ..PipelineOptions::default()
    };

    let pipeline = pipeline_with(recognizer.clone(), MockTranslate::new(), options);
    let result = pipeline.run(audio()).await.unwrap();

    assert_eq!(result.segment_count, 2);
    assert_eq!(recognizer.calls(), vec![ModelTier::Small, ModelTier::Tiny]);
}

/// A failed fallback surfaces the original error, after exactly one retry
#[tokio::test]
async fn test_pipeline_run_withFailedFallback_shouldSurfaceOriginalError() {
    let recognizer = Arc::new(
        MockRecognizer::new("en")
            .fail_with(ModelTier::Medium, "original failure")
            .fail_with(ModelTier::Tiny, "fallback failure"),
    );
    let options = PipelineOptions {
        tier: ModelTier::Medium,
        ..PipelineOptions::default()
    };

    let pipeline = pipeline_with(recognizer.clone(), MockTranslate::new(), options);
    let error = pipeline.run(audio()).await.unwrap_err();

    assert!(error.to_string().contains("original failure"));
    assert_eq!(recognizer.calls(), vec![ModelTier::Medium, ModelTier::Tiny]);
}

/// The fastest tier never retries against itself
#[tokio::test]
async fn test_pipeline_run_withFastestTierFailure_shouldNotRetry() {
    let recognizer =
        Arc::new(MockRecognizer::new("en").fail_with(ModelTier::Tiny, "broken audio"));
    let options = PipelineOptions {
        tier: ModelTier::Tiny,
        ..PipelineOptions::default()
    };

    let pipeline = pipeline_with(recognizer.clone(), MockTranslate::new(), options);
    let error = pipeline.run(audio()).await.unwrap_err();

    assert!(matches!(error, PipelineError::RecognitionFailed(_)));
    assert_eq!(recognizer.calls(), vec![ModelTier::Tiny]);
}

/// A translation failure on one segment aborts the run with no document
#[tokio::test]
async fn test_pipeline_run_withTranslationFailure_shouldFailFast() {
    let segments: Vec<_> = (0..5)
        .map(|i| common::segment(i as f64, i as f64 + 1.0, &format!("utterance {}", i)))
        .collect();
    let recognizer = Arc::new(MockRecognizer::new("en").succeed_with(ModelTier::Base, segments));
    let provider = MockTranslate::new().fail_on("utterance 2", "quota exceeded");

    let pipeline = pipeline_with(recognizer, provider, PipelineOptions::default());
    let error = pipeline.run(audio()).await.unwrap_err();

    assert_eq!(error.stage(), "translation");
    match error {
        PipelineError::TranslationFailed { segment_text, .. } => {
            assert_eq!(segment_text, "utterance 2");
        }
        other => panic!("expected TranslationFailed, got {:?}", other),
    }
}
