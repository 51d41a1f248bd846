/*!
 * Per-tier model handle cache.
 *
 * Recognition models are expensive to initialize, so each tier's handle is
 * constructed lazily at most once per process and then shared read-only by
 * every pipeline run. The cache is an explicit object owned by the engine,
 * not ambient process state; concurrent first-time use of the same tier is
 * serialized by a per-tier `OnceCell`.
 */

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::errors::RecognitionError;

use super::ModelTier;

/// Initialized handle for one model tier
#[derive(Debug, Clone)]
pub struct ModelHandle {
    /// The tier this handle belongs to
    pub tier: ModelTier,

    /// Location of the model weights in the local store, if already present.
    /// A missing file means the engine downloads the weights on first use.
    pub weights: Option<PathBuf>,
}

/// Lazily-initialized map from model tier to shared model handle
pub struct ModelCache {
    cells: HashMap<ModelTier, OnceCell<Arc<ModelHandle>>>,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCache {
    /// Create an empty cache with one slot per known tier
    pub fn new() -> Self {
        let cells = ModelTier::ALL
            .iter()
            .map(|tier| (*tier, OnceCell::new()))
            .collect();
        Self { cells }
    }

    /// Get the handle for a tier, initializing it exactly once on first use.
    ///
    /// Concurrent callers for the same tier await the same initialization;
    /// a failed initialization leaves the slot empty so a later run can try
    /// again.
    pub async fn get_or_init<F, Fut>(
        &self,
        tier: ModelTier,
        init: F,
    ) -> Result<Arc<ModelHandle>, RecognitionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ModelHandle, RecognitionError>>,
    {
        // The map is seeded with every tier at construction
        let cell = self
            .cells
            .get(&tier)
            .expect("cache seeded with every tier");

        let handle = cell
            .get_or_try_init(|| async { init().await.map(Arc::new) })
            .await?;
        Ok(handle.clone())
    }

    /// Whether a tier's handle has already been initialized - used by tests
    #[allow(dead_code)]
    pub fn is_loaded(&self, tier: ModelTier) -> bool {
        self.cells
            .get(&tier)
            .is_some_and(|cell| cell.get().is_some())
    }
}
