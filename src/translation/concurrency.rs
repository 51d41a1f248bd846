/*!
 * Bounded-concurrency translation of segment sequences.
 *
 * Segments carry no cross-segment context, so they are translated
 * concurrently under a semaphore cap and reassembled in original order.
 * Translation is all-or-nothing: the first failing segment (in segment
 * order) aborts the whole sequence.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::errors::TranslationError;
use crate::recognition::TranscriptSegment;

use super::core::{LogEntry, SegmentTranslation, TranslationService};

/// Pairing of a transcript segment with its translated text
#[derive(Debug, Clone)]
pub struct TranslatedSegment {
    /// The source segment
    pub segment: TranscriptSegment,

    /// Normalized target-language text; empty when there was nothing to
    /// translate
    pub text: String,
}

/// The first segment-level failure of a translation pass
#[derive(Debug)]
pub struct SegmentFailure {
    /// Position of the failing segment in the input sequence
    pub index: usize,

    /// Source text of the failing segment
    pub segment_text: String,

    /// Underlying translation error
    pub source: TranslationError,
}

/// Concurrent per-segment translator
pub struct SegmentTranslator {
    /// The translation service to use
    service: Arc<TranslationService>,

    /// Target language for every segment
    target_language: String,

    /// Maximum number of concurrent requests
    max_concurrent_requests: usize,
}

impl SegmentTranslator {
    /// Create a new segment translator
    pub fn new(service: TranslationService, target_language: impl Into<String>) -> Self {
        Self {
            max_concurrent_requests: service.config.optimal_concurrent_requests(),
            service: Arc::new(service),
            target_language: target_language.into(),
        }
    }

    /// Translate all segments, preserving order and failing fast.
    ///
    /// The returned sequence has the same length and order as the input.
    /// When several segments fail concurrently, the error reported is the
    /// one with the lowest segment index, so failures are deterministic.
    pub async fn translate_segments(
        &self,
        segments: &[TranscriptSegment],
        log_capture: Arc<Mutex<Vec<LogEntry>>>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<Vec<TranslatedSegment>, SegmentFailure> {
        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let total = segments.len();
        let completed = Arc::new(AtomicUsize::new(0));

        let results = stream::iter(segments.iter().cloned().enumerate())
            .map(|(index, segment)| {
                let service = self.service.clone();
                let target_language = self.target_language.clone();
                let semaphore = semaphore.clone();
                let log_capture = log_capture.clone();
                let completed = completed.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    // Closed only on Semaphore::close, which never happens here
                    let _permit = semaphore.acquire().await.expect("semaphore open");

                    let result = service
                        .translate_segment(&segment.text, &target_language)
                        .await;

                    let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);

                    {
                        let mut logs = log_capture.lock();
                        match &result {
                            Ok(_) => logs.push(LogEntry {
                                level: "info".to_string(),
                                message: format!("Segment {}/{} translated", index + 1, total),
                            }),
                            Err(e) => logs.push(LogEntry {
                                level: "error".to_string(),
                                message: format!("Segment {}/{} failed: {}", index + 1, total, e),
                            }),
                        }
                    }

                    (index, segment, result)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        // Reassemble in original segment order regardless of completion order
        let mut sorted_results = results;
        sorted_results.sort_by_key(|(index, _, _)| *index);

        let mut translated = Vec::with_capacity(total);
        for (index, segment, result) in sorted_results {
            match result {
                Ok(SegmentTranslation::Text(text)) => {
                    translated.push(TranslatedSegment { segment, text });
                }
                Ok(SegmentTranslation::NothingToTranslate) => {
                    // Empty source text carries an empty translation; the
                    // sentinel never reaches a rendered document.
                    translated.push(TranslatedSegment {
                        segment,
                        text: String::new(),
                    });
                }
                Err(source) => {
                    return Err(SegmentFailure {
                        index,
                        segment_text: segment.text,
                        source,
                    });
                }
            }
        }

        Ok(translated)
    }
}
