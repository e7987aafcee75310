use crate::domain::ports::{ExplanationProvider, TextGenerator};
use crate::utils::error::{ImpactError, Result};
use async_trait::async_trait;

pub const DEFAULT_EXPLANATION: &str = "This is an estimate based on all posts. We figure that for every two leftovers shared, at least one full meal is saved from waste!";

/// Offline provider: always the same template, whatever the count.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedExplanation;

#[async_trait]
impl ExplanationProvider for FixedExplanation {
    async fn explain(&self, _posts: f64, _plates_saved: u64) -> Result<String> {
        Ok(DEFAULT_EXPLANATION.to_string())
    }
}

/// Augmented provider: asks a `TextGenerator` to reword the heuristic.
///
/// Failures and empty replies surface as `GenerationFailure`; the fixed
/// template is never substituted here.
pub struct GeneratedExplanation<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> GeneratedExplanation<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn build_prompt(posts: f64, plates_saved: u64) -> String {
        format!(
            "You are the friendly voice of a food waste reduction app. \
The community has shared {posts} leftover posts, which we estimate saved {plates_saved} plates of food. \
Our heuristic assumes that two posts save one plate on average. \
Explain this estimate to the user in one or two short, encouraging sentences. \
Mention that it is an estimate. Reply with the explanation text only."
        )
    }
}

#[async_trait]
impl<G: TextGenerator> ExplanationProvider for GeneratedExplanation<G> {
    async fn explain(&self, posts: f64, plates_saved: u64) -> Result<String> {
        let prompt = Self::build_prompt(posts, plates_saved);
        tracing::debug!("Requesting generated explanation ({} chars prompt)", prompt.len());

        let text = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::warn!("Explanation generation failed: {}", e);
            ImpactError::from(e)
        })?;

        let text = text.trim();
        if text.is_empty() {
            tracing::warn!("Generator returned an empty explanation");
            return Err(ImpactError::GenerationFailure {
                message: "generator returned empty text".to_string(),
            });
        }

        Ok(text.to_string())
    }
}

#[async_trait]
impl<T: ExplanationProvider + ?Sized> ExplanationProvider for Box<T> {
    async fn explain(&self, posts: f64, plates_saved: u64) -> Result<String> {
        (**self).explain(posts, plates_saved).await
    }
}
