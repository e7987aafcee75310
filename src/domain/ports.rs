use crate::domain::model::{LeftoverPost, NewLeftoverPost, PostCount};
use crate::utils::error::{GenerationError, Result};
use async_trait::async_trait;
use uuid::Uuid;

/// External text-generation capability (a hosted model, or a stub in tests).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError>;
}

/// Supplies the human-readable justification attached to an estimate.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(&self, posts: f64, plates_saved: u64) -> Result<String>;
}

/// Source of the community post count. Passed to the estimator explicitly.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn post_count(&self) -> Result<PostCount>;
    async fn list_posts(&self) -> Result<Vec<LeftoverPost>>;
    async fn add_post(&self, post: NewLeftoverPost) -> Result<LeftoverPost>;
    async fn delete_post(&self, id: Uuid) -> Result<()>;
}

pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn store_path(&self) -> &str;
    fn augmented(&self) -> bool;
    fn generator_endpoint(&self) -> Option<&str>;
    fn generator_model(&self) -> &str;
    fn generator_api_key(&self) -> Option<&str>;
    fn generator_timeout_seconds(&self) -> u64;
    fn generator_temperature(&self) -> f32;
}
