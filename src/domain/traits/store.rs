use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::Suggestion;

/// Store trait - persistence for playlist suggestions
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn add(&self, suggestion: &Suggestion) -> Result<(), StorageError>;

    /// Most recent suggestions first
    async fn recent(&self, limit: usize) -> Result<Vec<Suggestion>, StorageError>;

    async fn count_for_user(&self, user_id: u64) -> Result<u64, StorageError>;
}
