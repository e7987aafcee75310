use crate::core::heuristic::{calculate_plates_saved, plates_for_count};
use crate::domain::model::PlatesSavedEstimate;
use crate::domain::ports::{ExplanationProvider, PostStore};
use crate::utils::error::{ImpactError, Result};

/// Combines the heuristic with an explanation into one estimate.
///
/// Stateless: every call computes from scratch and makes at most one
/// external call, through the configured `ExplanationProvider`.
pub struct PlatesSavedEstimator<E: ExplanationProvider> {
    provider: E,
}

impl<E: ExplanationProvider> PlatesSavedEstimator<E> {
    pub fn new(provider: E) -> Self {
        Self { provider }
    }

    /// Input is validated before the provider is consulted, so an invalid
    /// count never triggers an external call.
    pub async fn estimate(&self, number_of_posts: f64) -> Result<PlatesSavedEstimate> {
        let plates_saved = calculate_plates_saved(number_of_posts)?;
        self.assemble(number_of_posts, plates_saved).await
    }

    /// Same as `estimate`, with the post count read from the given store.
    pub async fn estimate_from_store(&self, store: &dyn PostStore) -> Result<PlatesSavedEstimate> {
        let count = store.post_count().await?;
        tracing::debug!("Post store reports {} posts", count);
        self.assemble(count.value() as f64, plates_for_count(count))
            .await
    }

    async fn assemble(&self, posts: f64, plates_saved: u64) -> Result<PlatesSavedEstimate> {
        let explanation = self.provider.explain(posts, plates_saved).await?;
        if explanation.trim().is_empty() {
            return Err(ImpactError::GenerationFailure {
                message: "explanation provider returned empty text".to_string(),
            });
        }

        tracing::info!("Estimated {} plates saved from {} posts", plates_saved, posts);
        Ok(PlatesSavedEstimate::new(plates_saved, explanation))
    }
}
