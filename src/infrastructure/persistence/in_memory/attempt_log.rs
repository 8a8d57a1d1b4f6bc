//! # In-Memory Attempt Log
//!
//! Append-only [`BookingAttemptLog`] keyed by session.

use crate::domain::entities::booking::BookingAttempt;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::persistence::traits::{BookingAttemptLog, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`BookingAttemptLog`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttemptLog {
    storage: Arc<RwLock<HashMap<SessionId, Vec<BookingAttempt>>>>,
}

impl InMemoryAttemptLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingAttemptLog for InMemoryAttemptLog {
    async fn record(&self, attempt: BookingAttempt) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage
            .entry(attempt.session_id())
            .or_default()
            .push(attempt);
        Ok(())
    }

    async fn attempts_for(&self, session: SessionId) -> RepositoryResult<Vec<BookingAttempt>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&session).cloned().unwrap_or_default())
    }
}
