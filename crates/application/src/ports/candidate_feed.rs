use async_trait::async_trait;
use ferrous_failover_domain::{DomainError, FeedEntry};

/// Source of candidate address lists.
#[async_trait]
pub trait CandidateFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, DomainError>;
}
