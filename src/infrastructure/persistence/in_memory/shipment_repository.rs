//! # In-Memory Shipment Repository
//!
//! Map-backed [`ShipmentRepository`] with waybill and session indexes.

use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::{SessionId, ShipmentId, Waybill};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, ShipmentRepository,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ShipmentRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryShipmentRepository {
    storage: Arc<RwLock<HashMap<ShipmentId, Shipment>>>,
}

impl InMemoryShipmentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored shipments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.try_read().map(|g| g.len()).unwrap_or(0)
    }

    /// Returns true if no shipments are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn insert(&self, shipment: Shipment) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(&shipment.id()) {
            return Err(RepositoryError::Conflict(format!(
                "shipment {} already exists",
                shipment.id()
            )));
        }
        if storage
            .values()
            .any(|s| s.waybill() == shipment.waybill())
        {
            return Err(RepositoryError::Conflict(format!(
                "waybill {} already booked",
                shipment.waybill()
            )));
        }
        storage.insert(shipment.id(), shipment);
        Ok(())
    }

    async fn get(&self, id: ShipmentId) -> RepositoryResult<Shipment> {
        let storage = self.storage.read().await;
        storage
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("shipment", id))
    }

    async fn find_by_waybill(&self, waybill: &Waybill) -> RepositoryResult<Option<Shipment>> {
        let storage = self.storage.read().await;
        Ok(storage.values().find(|s| s.waybill() == waybill).cloned())
    }

    async fn find_by_session(&self, session: SessionId) -> RepositoryResult<Option<Shipment>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .find(|s| s.session_id() == session)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::shipment::{FallbackMetadata, PricingSnapshot};
    use crate::domain::services::pricing::PricingBreakdown;
    use crate::domain::value_objects::{CompanyId, Money, ProviderId};

    fn shipment(waybill: &str) -> Shipment {
        let sell = PricingBreakdown::flat_for_tests(Money::from_major(180));
        let cost = PricingBreakdown::flat_for_tests(Money::from_major(150));
        Shipment::new(
            SessionId::new_v4(),
            CompanyId::new("acme"),
            ProviderId::new("bluedart"),
            Waybill::new(waybill),
            PricingSnapshot::capture(cost, sell),
            FallbackMetadata {
                attempt_number: 1,
                fallback_used: false,
                total_options_available: 2,
            },
        )
    }

    #[tokio::test]
    async fn insert_and_lookup_by_indexes() {
        let repo = InMemoryShipmentRepository::new();
        let s = shipment("AWB1");
        let id = s.id();
        let session = s.session_id();
        repo.insert(s).await.unwrap();

        assert_eq!(repo.get(id).await.unwrap().id(), id);
        assert!(repo
            .find_by_waybill(&Waybill::new("AWB1"))
            .await
            .unwrap()
            .is_some());
        assert!(repo.find_by_session(session).await.unwrap().is_some());
        assert!(repo
            .find_by_waybill(&Waybill::new("AWB404"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_waybill_conflicts() {
        let repo = InMemoryShipmentRepository::new();
        repo.insert(shipment("AWB1")).await.unwrap();
        assert!(repo.insert(shipment("AWB1")).await.is_err());
        assert_eq!(repo.len(), 1);
    }
}
