//! # In-Memory Rate Card Repository
//!
//! Thread-safe map-backed implementation of [`RateCardRepository`],
//! suitable for tests and the simulation service.

use crate::domain::entities::rate_card::RateCard;
use crate::domain::value_objects::enums::RateScope;
use crate::domain::value_objects::{CompanyId, ProviderId, RateCardId};
use crate::infrastructure::persistence::traits::{
    RateCardRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`RateCardRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateCardRepository {
    storage: Arc<RwLock<HashMap<RateCardId, RateCard>>>,
}

impl InMemoryRateCardRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a card, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the card is structurally invalid.
    pub async fn upsert_validated(&self, card: RateCard) -> RepositoryResult<()> {
        card.validate()
            .map_err(|e| RepositoryError::Conflict(e.to_string()))?;
        let mut storage = self.storage.write().await;
        storage.insert(card.id(), card);
        Ok(())
    }
}

#[async_trait]
impl RateCardRepository for InMemoryRateCardRepository {
    async fn insert(&self, card: RateCard) -> RepositoryResult<()> {
        card.validate()
            .map_err(|e| RepositoryError::Conflict(e.to_string()))?;
        let mut storage = self.storage.write().await;
        if storage.contains_key(&card.id()) {
            return Err(RepositoryError::Conflict(format!(
                "rate card {} already exists",
                card.id()
            )));
        }
        storage.insert(card.id(), card);
        Ok(())
    }

    async fn get(&self, id: RateCardId) -> RepositoryResult<RateCard> {
        let storage = self.storage.read().await;
        storage
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("rate card", id))
    }

    async fn find_for(
        &self,
        company: &CompanyId,
        provider: &ProviderId,
        scope: RateScope,
    ) -> RepositoryResult<Vec<RateCard>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|card| {
                card.company_id() == company
                    && card.provider() == provider
                    && card.scope() == scope
            })
            .cloned()
            .collect())
    }

    async fn remove(&self, id: RateCardId) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("rate card", id))
    }
}
