//! # Rate Card Selector
//!
//! Resolves the single active rate card for a `(company, provider,
//! scope)` tuple at a given instant.
//!
//! Overlapping effective windows resolve deterministically: the most
//! recent `effective_from` wins, and cards sharing an `effective_from`
//! fall back to the earliest `created_at`, so the first-configured card
//! keeps precedence. A missing card or missing zone rule is a hard
//! configuration error; the selector never defaults.

use crate::application::error::{SelectorError, SelectorResult};
use crate::domain::entities::rate_card::RateCard;
use crate::domain::value_objects::enums::RateScope;
use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::{CompanyId, ProviderId, Timestamp};
use crate::infrastructure::persistence::traits::RateCardRepository;
use std::sync::Arc;

/// Resolves active rate cards from the card repository.
#[derive(Debug, Clone)]
pub struct RateCardSelector {
    repository: Arc<dyn RateCardRepository>,
}

impl RateCardSelector {
    /// Creates a selector over a card repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RateCardRepository>) -> Self {
        Self { repository }
    }

    /// Resolves the single card to price with.
    ///
    /// The card must be active at `as_of`, match the scope, and carry a
    /// rule for `zone`.
    ///
    /// # Errors
    ///
    /// - `SelectorError::NoActiveCard` - nothing active at `as_of`
    /// - `SelectorError::MissingZoneRule` - the winning card has no rule
    ///   for the zone
    pub async fn resolve(
        &self,
        company: &CompanyId,
        provider: &ProviderId,
        scope: RateScope,
        zone: Zone,
        as_of: Timestamp,
    ) -> SelectorResult<RateCard> {
        let mut candidates: Vec<RateCard> = self
            .repository
            .find_for(company, provider, scope)
            .await?
            .into_iter()
            .filter(|card| card.is_active_at(as_of))
            .collect();

        // Most recent effective_from first; ties keep the earliest
        // created_at.
        candidates.sort_by(|a, b| {
            b.effective_from()
                .cmp(&a.effective_from())
                .then(a.created_at().cmp(&b.created_at()))
        });

        let card = candidates
            .into_iter()
            .next()
            .ok_or_else(|| SelectorError::NoActiveCard {
                company: company.clone(),
                provider: provider.clone(),
                scope,
            })?;

        if !card.has_zone(zone) {
            return Err(SelectorError::MissingZoneRule {
                provider: provider.clone(),
                zone,
            });
        }
        Ok(card)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::rate_card::{Slab, ZoneRule};
    use crate::domain::value_objects::{Money, WeightRounding};
    use crate::infrastructure::persistence::in_memory::InMemoryRateCardRepository;
    use rust_decimal::Decimal;

    fn rule() -> ZoneRule {
        ZoneRule::new(
            vec![Slab::new(Decimal::ZERO, Decimal::new(5, 0), Money::from_major(120)).unwrap()],
            Decimal::new(5, 1),
            WeightRounding::Ceil,
            Money::from_major(20),
        )
    }

    fn card(effective_offset_secs: i64, created_offset_secs: i64) -> RateCard {
        RateCard::new(
            CompanyId::new("acme"),
            ProviderId::new("bluedart"),
            RateScope::Sell,
            Timestamp::now().add_secs(effective_offset_secs),
        )
        .with_zone_rule(Zone::Local, rule())
        .with_created_at(Timestamp::now().add_secs(created_offset_secs))
    }

    async fn selector_with(cards: Vec<RateCard>) -> RateCardSelector {
        let repo = InMemoryRateCardRepository::new();
        for c in cards {
            repo.insert(c).await.unwrap();
        }
        RateCardSelector::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn picks_most_recent_effective_from() {
        let older = card(-7200, -7200);
        let newer = card(-3600, -3600);
        let winner = newer.id();
        let selector = selector_with(vec![older, newer]).await;

        let resolved = selector
            .resolve(
                &CompanyId::new("acme"),
                &ProviderId::new("bluedart"),
                RateScope::Sell,
                Zone::Local,
                Timestamp::now(),
            )
            .await
            .unwrap();
        assert_eq!(resolved.id(), winner);
    }

    #[tokio::test]
    async fn tie_keeps_first_configured_card() {
        let effective = Timestamp::now().add_secs(-3600);
        let first = RateCard::new(
            CompanyId::new("acme"),
            ProviderId::new("bluedart"),
            RateScope::Sell,
            effective,
        )
        .with_zone_rule(Zone::Local, rule())
        .with_created_at(Timestamp::now().add_secs(-600));
        let second = RateCard::new(
            CompanyId::new("acme"),
            ProviderId::new("bluedart"),
            RateScope::Sell,
            effective,
        )
        .with_zone_rule(Zone::Local, rule())
        .with_created_at(Timestamp::now().add_secs(-300));
        let winner = first.id();
        let selector = selector_with(vec![second, first]).await;

        let resolved = selector
            .resolve(
                &CompanyId::new("acme"),
                &ProviderId::new("bluedart"),
                RateScope::Sell,
                Zone::Local,
                Timestamp::now(),
            )
            .await
            .unwrap();
        assert_eq!(resolved.id(), winner);
    }

    #[tokio::test]
    async fn expired_and_future_cards_are_skipped() {
        let expired = card(-7200, -7200).with_expiry(Timestamp::now().add_secs(-60));
        let future = card(3600, -3600);
        let selector = selector_with(vec![expired, future]).await;

        let err = selector
            .resolve(
                &CompanyId::new("acme"),
                &ProviderId::new("bluedart"),
                RateScope::Sell,
                Zone::Local,
                Timestamp::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SelectorError::NoActiveCard { .. }));
    }

    #[tokio::test]
    async fn missing_zone_rule_is_a_configuration_error() {
        let selector = selector_with(vec![card(-3600, -3600)]).await;

        let err = selector
            .resolve(
                &CompanyId::new("acme"),
                &ProviderId::new("bluedart"),
                RateScope::Sell,
                Zone::Metro,
                Timestamp::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SelectorError::MissingZoneRule { .. }));
    }

    #[tokio::test]
    async fn scope_is_part_of_the_key() {
        let selector = selector_with(vec![card(-3600, -3600)]).await;

        let err = selector
            .resolve(
                &CompanyId::new("acme"),
                &ProviderId::new("bluedart"),
                RateScope::Cost,
                Zone::Local,
                Timestamp::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SelectorError::NoActiveCard { .. }));
    }
}
