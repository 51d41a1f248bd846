/*!
 * Tests for the translation service and its concurrent driver
 */

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::common;
use crate::common::mock_providers::MockTranslate;
use subvox::app_config::TranslationConfig;
use subvox::translation::core::normalize_translation;
use subvox::translation::{SegmentTranslation, SegmentTranslator, TranslationService};

fn service_with(provider: MockTranslate) -> TranslationService {
    TranslationService::with_provider(Arc::new(provider), TranslationConfig::default())
}

/// Null payloads become the empty string, non-strings become their
/// representation
#[test]
fn test_normalize_translation_shouldEnforceStringContract() {
    assert_eq!(normalize_translation(Value::Null), "");
    assert_eq!(normalize_translation(json!("texte")), "texte");
    assert_eq!(normalize_translation(json!(7.5)), "7.5");
    assert_eq!(normalize_translation(json!({"odd": true})), r#"{"odd":true}"#);
}

/// Empty input short-circuits without touching the provider
#[tokio::test]
async fn test_translate_segment_withEmptyText_shouldNotCallProvider() {
    let provider = MockTranslate::new();
    let tracker = provider.tracker();
    let service = service_with(provider);

    let result = service.translate_segment("", "fr").await.unwrap();
    assert_eq!(result, SegmentTranslation::NothingToTranslate);
    assert_eq!(tracker.lock().call_count, 0);
}

/// A null provider payload is normalized to an empty translation
#[tokio::test]
async fn test_translate_segment_withNullPayload_shouldYieldEmptyText() {
    let provider = MockTranslate::new().respond_with("Hello", Value::Null);
    let service = service_with(provider);

    let result = service.translate_segment("Hello", "fr").await.unwrap();
    assert_eq!(result, SegmentTranslation::Text(String::new()));
}

/// Provider failures surface with the provider's message and are not retried
#[tokio::test]
async fn test_translate_segment_withProviderFailure_shouldNotRetry() {
    let provider = MockTranslate::new().fail_on("Hello", "service unavailable");
    let tracker = provider.tracker();
    let service = service_with(provider);

    let error = service.translate_segment("Hello", "fr").await.unwrap_err();
    assert!(error.to_string().contains("service unavailable"));
    assert_eq!(tracker.lock().call_count, 1);
}

/// The translated sequence preserves input length and order
#[tokio::test]
async fn test_translate_segments_shouldPreserveOrder() {
    let segments: Vec<_> = (0..12)
        .map(|i| common::segment(i as f64, i as f64 + 1.0, &format!("utterance {}", i)))
        .collect();

    let service = service_with(MockTranslate::new());
    let translator = SegmentTranslator::new(service, "fr");

    let translated = translator
        .translate_segments(&segments, Arc::new(Mutex::new(Vec::new())), |_, _| {})
        .await
        .unwrap();

    assert_eq!(translated.len(), segments.len());
    for (i, item) in translated.iter().enumerate() {
        assert_eq!(item.segment.text, format!("utterance {}", i));
        assert_eq!(item.text, format!("[fr] utterance {}", i));
    }
}

/// The first failing segment (by position) aborts the whole pass
#[tokio::test]
async fn test_translate_segments_withFailure_shouldFailFastInOrder() {
    let segments: Vec<_> = (0..5)
        .map(|i| common::segment(i as f64, i as f64 + 1.0, &format!("utterance {}", i)))
        .collect();

    let provider = MockTranslate::new()
        .fail_on("utterance 2", "quota exceeded")
        .fail_on("utterance 4", "quota exceeded");
    let service = service_with(provider);
    let translator = SegmentTranslator::new(service, "fr");

    let failure = translator
        .translate_segments(&segments, Arc::new(Mutex::new(Vec::new())), |_, _| {})
        .await
        .unwrap_err();

    assert_eq!(failure.index, 2);
    assert_eq!(failure.segment_text, "utterance 2");
    assert!(failure.source.to_string().contains("quota exceeded"));
}

/// Progress ticks once per segment and the log capture fills up
#[tokio::test]
async fn test_translate_segments_shouldReportProgressAndLogs() {
    let segments: Vec<_> = (0..4)
        .map(|i| common::segment(i as f64, i as f64 + 1.0, &format!("utterance {}", i)))
        .collect();

    let service = service_with(MockTranslate::new());
    let translator = SegmentTranslator::new(service, "de");

    let log_capture = Arc::new(Mutex::new(Vec::new()));
    let ticks = Arc::new(Mutex::new(Vec::new()));
    let tick_sink = ticks.clone();

    translator
        .translate_segments(&segments, log_capture.clone(), move |current, total| {
            tick_sink.lock().push((current, total));
        })
        .await
        .unwrap();

    let ticks = ticks.lock();
    assert_eq!(ticks.len(), 4);
    assert!(ticks.iter().all(|(_, total)| *total == 4));
    assert_eq!(log_capture.lock().len(), 4);
}
