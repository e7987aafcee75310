use crate::domain::model::{LeftoverPost, NewLeftoverPost, PostCount};
use crate::domain::ports::{PostStore, Storage};
use crate::utils::error::{ImpactError, Result};
use crate::utils::validation::require_text;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const POSTS_FILE: &str = "leftover_posts.json";

/// Post store persisted as one JSON array through a `Storage` backend.
///
/// Posts are kept oldest first on disk; `list_posts` returns newest first.
/// A missing file is an empty ledger.
pub struct PostLedger<S: Storage> {
    storage: S,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl<S: Storage> PostLedger<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<LeftoverPost>> {
        match self.storage.read_file(POSTS_FILE).await? {
            Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => {
                Ok(serde_json::from_slice(&bytes)?)
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn save(&self, posts: &[LeftoverPost]) -> Result<()> {
        let json = serde_json::to_vec_pretty(posts)?;
        tracing::debug!("Writing {} posts ({} bytes)", posts.len(), json.len());
        self.storage.write_file(POSTS_FILE, &json).await
    }
}

#[async_trait]
impl<S: Storage> PostStore for PostLedger<S> {
    async fn post_count(&self) -> Result<PostCount> {
        Ok(PostCount::from(self.load().await?.len()))
    }

    async fn list_posts(&self) -> Result<Vec<LeftoverPost>> {
        let mut posts = self.load().await?;
        posts.reverse();
        Ok(posts)
    }

    async fn add_post(&self, post: NewLeftoverPost) -> Result<LeftoverPost> {
        let post = build_post(post)?;

        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        posts.push(post.clone());
        self.save(&posts).await?;

        tracing::info!("Posted '{}' ({} posts total)", post.food_name, posts.len());
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(ImpactError::NotFound {
                entity: "post".to_string(),
                id: id.to_string(),
            });
        }
        self.save(&posts).await?;

        tracing::info!("Deleted post {} ({} posts remaining)", id, posts.len());
        Ok(())
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostStore {
    posts: Arc<Mutex<Vec<LeftoverPost>>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn post_count(&self) -> Result<PostCount> {
        Ok(PostCount::from(self.posts.lock().await.len()))
    }

    async fn list_posts(&self) -> Result<Vec<LeftoverPost>> {
        Ok(self.posts.lock().await.iter().rev().cloned().collect())
    }

    async fn add_post(&self, post: NewLeftoverPost) -> Result<LeftoverPost> {
        let post = build_post(post)?;
        self.posts.lock().await.push(post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> Result<()> {
        let mut posts = self.posts.lock().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(ImpactError::NotFound {
                entity: "post".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn build_post(post: NewLeftoverPost) -> Result<LeftoverPost> {
    require_text("food_name", &post.food_name)?;
    require_text("freshness", &post.freshness)?;

    Ok(LeftoverPost {
        id: Uuid::new_v4(),
        food_name: post.food_name.trim().to_string(),
        freshness: post.freshness.trim().to_string(),
        expiration_date: post.expiration_date,
        image_uri: post.image_uri.filter(|uri| !uri.trim().is_empty()),
        posted_at: Utc::now(),
    })
}
