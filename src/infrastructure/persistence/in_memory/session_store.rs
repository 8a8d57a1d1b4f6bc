//! # In-Memory Session Store
//!
//! Map-backed [`SessionStore`] whose state transitions run under a
//! single write lock, giving the compare-and-swap semantics the booking
//! orchestrator relies on.

use crate::domain::entities::quote::QuoteSession;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, SessionStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`SessionStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    storage: Arc<RwLock<HashMap<SessionId, QuoteSession>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn transition<F>(&self, id: SessionId, apply: F) -> RepositoryResult<bool>
    where
        F: FnOnce(&mut QuoteSession) -> bool,
    {
        let mut storage = self.storage.write().await;
        let session = storage
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("session", id))?;
        Ok(apply(session))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: QuoteSession) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(&session.id()) {
            return Err(RepositoryError::Conflict(format!(
                "session {} already exists",
                session.id()
            )));
        }
        storage.insert(session.id(), session);
        Ok(())
    }

    async fn get(&self, id: SessionId) -> RepositoryResult<QuoteSession> {
        let storage = self.storage.read().await;
        storage
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("session", id))
    }

    async fn begin_booking(&self, id: SessionId) -> RepositoryResult<bool> {
        self.transition(id, QuoteSession::begin_booking).await
    }

    async fn mark_consumed(&self, id: SessionId) -> RepositoryResult<bool> {
        self.transition(id, QuoteSession::mark_consumed).await
    }

    async fn release(&self, id: SessionId) -> RepositoryResult<bool> {
        self.transition(id, QuoteSession::release).await
    }

    async fn purge_expired(&self) -> RepositoryResult<usize> {
        let mut storage = self.storage.write().await;
        let before = storage.len();
        storage.retain(|_, session| !session.is_expired());
        Ok(before - storage.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::request::ShipmentRequest;
    use crate::domain::value_objects::enums::PaymentMode;
    use crate::domain::value_objects::weight::{DimensionsCm, WeightKg};
    use crate::domain::value_objects::zone::PostalCode;
    use crate::domain::value_objects::{CompanyId, Money};
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn session(ttl_secs: i64) -> QuoteSession {
        let request = ShipmentRequest::new(
            CompanyId::new("acme"),
            PostalCode::new("110001").unwrap(),
            PostalCode::new("400001").unwrap(),
            WeightKg::new(Decimal::new(42, 1)).unwrap(),
            DimensionsCm::new(Decimal::new(30, 0), Decimal::new(20, 0), Decimal::new(10, 0))
                .unwrap(),
            PaymentMode::Prepaid,
            Money::ZERO,
        );
        QuoteSession::new(request, vec![], BTreeMap::new(), BTreeMap::new(), ttl_secs)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = InMemorySessionStore::new();
        let s = session(1800);
        let id = s.id();
        store.insert(s).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().id(), id);
    }

    #[tokio::test]
    async fn begin_booking_is_exclusive() {
        let store = InMemorySessionStore::new();
        let s = session(1800);
        let id = s.id();
        store.insert(s).await.unwrap();

        assert!(store.begin_booking(id).await.unwrap());
        // Second claim loses the CAS
        assert!(!store.begin_booking(id).await.unwrap());

        assert!(store.release(id).await.unwrap());
        assert!(store.begin_booking(id).await.unwrap());
        assert!(store.mark_consumed(id).await.unwrap());
        assert!(!store.begin_booking(id).await.unwrap());
    }

    #[tokio::test]
    async fn transitions_on_missing_session_fail() {
        let store = InMemorySessionStore::new();
        let err = store.begin_booking(SessionId::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let store = InMemorySessionStore::new();
        let live = session(1800);
        let dead = session(-1);
        let live_id = live.id();
        store.insert(live).await.unwrap();
        store.insert(dead).await.unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store.get(live_id).await.is_ok());
    }
}
