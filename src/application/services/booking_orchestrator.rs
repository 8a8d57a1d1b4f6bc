//! # Booking Orchestrator
//!
//! Turns one quote session into at most one carrier commitment.
//!
//! ## The fallback walk
//!
//! Booking walks the session's options starting from the caller's
//! selection, then remaining options in rank order, capped by
//! `max_attempts`. Each attempt re-derives pricing from the rate cards
//! active *now*, debits the company wallet, and calls the carrier under
//! a deterministic idempotency key.
//!
//! ## The commitment point
//!
//! A waybill is irreversible. Until one is issued, every failure is
//! recoverable: the debit is reversed and the walk moves on. The moment
//! a waybill exists the session is consumed, and no alternate provider
//! may ever be tried for it, even when a step after issuance fails. In
//! that post-commit case the debit is compensated exactly once and the
//! caller gets the waybill back for manual reconciliation.

use crate::application::error::{BookingError, BookingResult};
use crate::application::services::rate_card_selector::RateCardSelector;
use crate::domain::entities::booking::{AttemptOutcome, BookingAttempt, FailureCategory};
use crate::domain::entities::quote::{QuoteOption, QuoteSession};
use crate::domain::entities::shipment::{FallbackMetadata, PricingSnapshot, Shipment};
use crate::domain::services::pricing::calculate_pricing;
use crate::domain::value_objects::enums::RateScope;
use crate::domain::value_objects::{
    CompanyId, IdempotencyKey, OptionId, ProviderId, SessionId, Timestamp,
};
use crate::infrastructure::gateway::registry::ProviderRegistry;
use crate::infrastructure::gateway::{CarrierGateway, CreateShipmentOutcome};
use crate::infrastructure::metrics::{counters, MetricsSink};
use crate::infrastructure::persistence::traits::{
    BookingAttemptLog, SessionStore, ShipmentRepository,
};
use crate::infrastructure::wallet::{WalletError, WalletService};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for the booking walk.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Maximum providers tried in one booking call, selection included.
    pub max_attempts: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// A committed booking.
#[derive(Debug, Clone)]
pub struct BookingSuccess {
    /// The persisted shipment.
    pub shipment: Shipment,
    /// 1-based attempt that committed.
    pub attempt_number: u32,
    /// True if a provider other than the selection committed.
    pub fallback_used: bool,
}

/// Orchestrates booking with automatic provider fallback.
#[derive(Debug)]
pub struct BookingOrchestrator {
    selector: RateCardSelector,
    registry: Arc<dyn ProviderRegistry>,
    gateways: HashMap<ProviderId, Arc<dyn CarrierGateway>>,
    sessions: Arc<dyn SessionStore>,
    shipments: Arc<dyn ShipmentRepository>,
    attempts: Arc<dyn BookingAttemptLog>,
    wallet: Arc<dyn WalletService>,
    metrics: Arc<dyn MetricsSink>,
    config: BookingConfig,
}

impl BookingOrchestrator {
    /// Creates a booking orchestrator.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        selector: RateCardSelector,
        registry: Arc<dyn ProviderRegistry>,
        gateways: HashMap<ProviderId, Arc<dyn CarrierGateway>>,
        sessions: Arc<dyn SessionStore>,
        shipments: Arc<dyn ShipmentRepository>,
        attempts: Arc<dyn BookingAttemptLog>,
        wallet: Arc<dyn WalletService>,
        metrics: Arc<dyn MetricsSink>,
        config: BookingConfig,
    ) -> Self {
        Self {
            selector,
            registry,
            gateways,
            sessions,
            shipments,
            attempts,
            wallet,
            metrics,
            config,
        }
    }

    /// Books the selected option, falling back through the session's
    /// remaining options on recoverable carrier failures.
    ///
    /// # Errors
    ///
    /// - `BookingError::SessionNotFound` / `SessionExpired` /
    ///   `SessionAlreadyConsumed` / `OptionNotFound` - precondition
    ///   failures, nothing was attempted
    /// - `BookingError::Wallet` - the wallet refused the charge; the
    ///   session is released for a later retry
    /// - `BookingError::AllProvidersExhausted` - every candidate failed
    ///   recoverably; the session is released
    /// - `BookingError::NonRecoverable` - a waybill was issued but a
    ///   post-commit step failed; the session is consumed
    pub async fn book(
        &self,
        session_id: SessionId,
        option_id: OptionId,
    ) -> BookingResult<BookingSuccess> {
        let session = self.sessions.get(session_id).await.map_err(|e| {
            if e.is_not_found() {
                BookingError::SessionNotFound(session_id)
            } else {
                BookingError::Repository(e)
            }
        })?;

        if session.is_expired() {
            return Err(BookingError::SessionExpired(session_id));
        }
        if session.option(&option_id).is_none() {
            return Err(BookingError::OptionNotFound {
                session: session_id,
                option: option_id,
            });
        }
        if !self.sessions.begin_booking(session_id).await? {
            return Err(BookingError::SessionAlreadyConsumed(session_id));
        }

        let walk = session.fallback_order(&option_id, self.config.max_attempts as usize);
        let result = self.walk(&session, &option_id, &walk).await;

        match &result {
            Ok(success) => {
                info!(
                    session = %session_id,
                    provider = %success.shipment.provider(),
                    waybill = %success.shipment.waybill(),
                    attempt = success.attempt_number,
                    fallback = success.fallback_used,
                    "booking committed"
                );
            }
            Err(error) => {
                // Settle the lock. Unless a waybill consumed the session
                // it must come back to Pending, including when the walk
                // bailed early on a repository or wallet error.
                if let Err(release_error) = self.sessions.release(session_id).await {
                    warn!(
                        session = %session_id,
                        error = %release_error,
                        "failed to release session after booking error"
                    );
                }
                warn!(session = %session_id, error = %error, "booking failed");
            }
        }
        result
    }

    /// Runs the fallback walk. The session is held in `Attempting` by
    /// the caller; a commitment settles it to `Consumed` here, and the
    /// caller releases it on any error exit.
    async fn walk(
        &self,
        session: &QuoteSession,
        selected: &OptionId,
        walk: &[QuoteOption],
    ) -> BookingResult<BookingSuccess> {
        let session_id = session.id();
        let company = session.request().company_id().clone();

        // Attempt numbers continue across walks of the same session, so
        // a released-and-rebooked session never reuses an idempotency
        // key whose debit was already reversed.
        let prior_attempts = self.attempts.attempts_for(session_id).await?.len();
        let base = u32::try_from(prior_attempts).unwrap_or(u32::MAX);

        for (index, option) in walk.iter().enumerate() {
            let attempt_number = base
                .saturating_add(u32::try_from(index).unwrap_or(u32::MAX))
                .saturating_add(1);
            let key = IdempotencyKey::derive(&session_id, &option.id, attempt_number);

            // Pricing is re-derived from the cards active now, not
            // copied from the quote.
            let pricing = match self.commit_pricing(session, option).await {
                Ok(pricing) => pricing,
                Err(message) => {
                    self.record(
                        session,
                        option,
                        attempt_number,
                        key,
                        AttemptOutcome::Recoverable {
                            category: FailureCategory::Configuration,
                            message,
                        },
                    )
                    .await?;
                    continue;
                }
            };
            let amount = pricing.committed_total;

            if let Err(error) = self.wallet.debit(&company, amount, key.as_str()).await {
                // A refused charge aborts the whole walk: falling back
                // to a pricier provider cannot succeed either.
                return Err(BookingError::Wallet(error));
            }

            let Some(gateway) = self.gateways.get(&option.provider) else {
                self.reverse_debit(&company, &key).await?;
                self.record(
                    session,
                    option,
                    attempt_number,
                    key,
                    AttemptOutcome::Recoverable {
                        category: FailureCategory::Configuration,
                        message: format!("no gateway registered for {}", option.provider),
                    },
                )
                .await?;
                continue;
            };

            match gateway.create_shipment(session.request(), &key).await {
                CreateShipmentOutcome::Created { waybill } => {
                    self.sessions.mark_consumed(session_id).await?;
                    let fallback_used = &option.id != selected;
                    let shipment = Shipment::new(
                        session_id,
                        company.clone(),
                        option.provider.clone(),
                        waybill.clone(),
                        pricing,
                        FallbackMetadata {
                            attempt_number,
                            fallback_used,
                            total_options_available: session.total_options(),
                        },
                    );

                    if let Err(error) = self.shipments.insert(shipment.clone()).await {
                        // Waybill exists but we cannot record it: lock
                        // the booking here and compensate the debit.
                        self.reverse_debit(&company, &key).await?;
                        self.metrics.increment(counters::POST_COMMIT_FAILURES);
                        self.record(
                            session,
                            option,
                            attempt_number,
                            key,
                            AttemptOutcome::PostCommit {
                                waybill: waybill.clone(),
                                message: error.to_string(),
                            },
                        )
                        .await?;
                        return Err(BookingError::NonRecoverable {
                            waybill,
                            compensation_applied: true,
                            message: error.to_string(),
                        });
                    }

                    self.record(
                        session,
                        option,
                        attempt_number,
                        key,
                        AttemptOutcome::Succeeded { waybill },
                    )
                    .await?;
                    self.metrics.increment(counters::BOOKINGS_COMMITTED);
                    if fallback_used {
                        self.metrics.increment(counters::BOOKINGS_VIA_FALLBACK);
                    }
                    return Ok(BookingSuccess {
                        shipment,
                        attempt_number,
                        fallback_used,
                    });
                }

                CreateShipmentOutcome::RecoverableFailure { error } => {
                    self.reverse_debit(&company, &key).await?;
                    warn!(
                        session = %session_id,
                        provider = %option.provider,
                        attempt = attempt_number,
                        error = %error,
                        "attempt failed recoverably, moving to next candidate"
                    );
                    self.record(
                        session,
                        option,
                        attempt_number,
                        key,
                        AttemptOutcome::Recoverable {
                            category: error.failure_category(),
                            message: error.to_string(),
                        },
                    )
                    .await?;
                }

                CreateShipmentOutcome::CommittedFailure { waybill, message } => {
                    // Carrier-side commitment without a clean creation.
                    // The session is burned; compensate the debit once
                    // and surface the waybill for reconciliation.
                    self.sessions.mark_consumed(session_id).await?;
                    self.reverse_debit(&company, &key).await?;
                    self.metrics.increment(counters::POST_COMMIT_FAILURES);
                    self.record(
                        session,
                        option,
                        attempt_number,
                        key,
                        AttemptOutcome::PostCommit {
                            waybill: waybill.clone(),
                            message: message.clone(),
                        },
                    )
                    .await?;
                    return Err(BookingError::NonRecoverable {
                        waybill,
                        compensation_applied: true,
                        message,
                    });
                }
            }
        }

        // No waybill was ever issued: the session may be booked again.
        self.metrics.increment(counters::BOOKINGS_EXHAUSTED);
        Err(BookingError::AllProvidersExhausted {
            attempts: u32::try_from(walk.len()).unwrap_or(u32::MAX),
        })
    }

    /// Re-derives both pricing scopes from the cards active now.
    async fn commit_pricing(
        &self,
        session: &QuoteSession,
        option: &QuoteOption,
    ) -> Result<PricingSnapshot, String> {
        let request = session.request();
        let zone = request.zone();
        let now = Timestamp::now();
        let dim_factor = self
            .registry
            .profile(&option.provider)
            .ok_or_else(|| format!("provider {} has no profile", option.provider))?
            .dim_factor();

        let cost_card = self
            .selector
            .resolve(
                request.company_id(),
                &option.provider,
                RateScope::Cost,
                zone,
                now,
            )
            .await
            .map_err(|e| e.to_string())?;
        let sell_card = self
            .selector
            .resolve(
                request.company_id(),
                &option.provider,
                RateScope::Sell,
                zone,
                now,
            )
            .await
            .map_err(|e| e.to_string())?;

        let cost =
            calculate_pricing(&cost_card, request, dim_factor).map_err(|e| e.to_string())?;
        let sell =
            calculate_pricing(&sell_card, request, dim_factor).map_err(|e| e.to_string())?;
        Ok(PricingSnapshot::capture(cost, sell))
    }

    /// Reverses an attempt's wallet debit. Idempotent per attempt.
    async fn reverse_debit(&self, company: &CompanyId, key: &IdempotencyKey) -> BookingResult<()> {
        match self
            .wallet
            .reverse(company, key.as_str(), &key.reversal_reference())
            .await
        {
            Ok(()) => {
                self.metrics.increment(counters::DEBITS_REVERSED);
                Ok(())
            }
            // Nothing was debited under this key; nothing to compensate.
            Err(WalletError::ReferenceNotFound(_)) => Ok(()),
            Err(error) => Err(BookingError::Wallet(error)),
        }
    }

    async fn record(
        &self,
        session: &QuoteSession,
        option: &QuoteOption,
        attempt_number: u32,
        key: IdempotencyKey,
        outcome: AttemptOutcome,
    ) -> BookingResult<()> {
        self.attempts
            .record(BookingAttempt::new(
                session.id(),
                option.id,
                option.provider.clone(),
                attempt_number,
                key,
                outcome,
            ))
            .await?;
        Ok(())
    }
}
