//! # Simulated Carrier
//!
//! An in-process [`CarrierGateway`] with scripted behavior, used by the
//! quote simulation service and by orchestrator tests to exercise every
//! outcome class without a real carrier integration.

use crate::domain::entities::request::ShipmentRequest;
use crate::domain::value_objects::{IdempotencyKey, Money, ProviderId, Waybill};
use crate::infrastructure::gateway::error::{GatewayError, GatewayResult};
use crate::infrastructure::gateway::{CarrierGateway, CreateShipmentOutcome, TrackingStatus};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

/// Scripted response of a [`SimulatedCarrier`].
#[derive(Debug, Clone)]
pub enum SimulatedBehavior {
    /// Every booking succeeds.
    Succeed,
    /// Every booking is declined by the carrier.
    Reject {
        /// Rejection detail.
        message: String,
    },
    /// Every booking times out.
    TimeOut,
    /// Every booking hits a carrier server fault.
    ServerError,
    /// Every booking issues a waybill and then fails post-commit.
    CommitThenFail {
        /// What fails after issuance.
        message: String,
    },
    /// The first `failures` bookings hit a server fault, then succeed.
    FailFirst {
        /// Number of leading failures.
        failures: u32,
    },
}

/// In-process carrier with scripted behavior.
///
/// Honors the gateway idempotency contract: replaying a creation call
/// with a previously seen key returns the original waybill.
#[derive(Debug)]
pub struct SimulatedCarrier {
    provider: ProviderId,
    behavior: SimulatedBehavior,
    timeout_ms: u64,
    live_rate: Option<Money>,
    delay: Option<Duration>,
    issued: AtomicU64,
    failures_remaining: AtomicU32,
    by_key: DashMap<String, Waybill>,
    tracking: DashMap<String, TrackingStatus>,
}

impl SimulatedCarrier {
    /// Creates a simulated carrier.
    #[must_use]
    pub fn new(provider: ProviderId, behavior: SimulatedBehavior) -> Self {
        let failures = match &behavior {
            SimulatedBehavior::FailFirst { failures } => *failures,
            _ => 0,
        };
        Self {
            provider,
            behavior,
            timeout_ms: 10_000,
            live_rate: None,
            delay: None,
            issued: AtomicU64::new(0),
            failures_remaining: AtomicU32::new(failures),
            by_key: DashMap::new(),
            tracking: DashMap::new(),
        }
    }

    /// Configures a live freight quote.
    #[must_use]
    pub fn with_live_rate(mut self, rate: Money) -> Self {
        self.live_rate = Some(rate);
        self
    }

    /// Adds artificial latency to every call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Overrides the advertised operation deadline.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn simulate_latency(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn issue_waybill(&self) -> Waybill {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let waybill = Waybill::new(format!("SIM-{}-{seq:06}", self.provider));
        self.tracking
            .insert(waybill.as_str().to_string(), TrackingStatus::Created);
        waybill
    }
}

#[async_trait]
impl CarrierGateway for SimulatedCarrier {
    fn provider_id(&self) -> &ProviderId {
        &self.provider
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn create_shipment(
        &self,
        _request: &ShipmentRequest,
        key: &IdempotencyKey,
    ) -> CreateShipmentOutcome {
        self.simulate_latency().await;

        // Idempotent replay: a seen key returns the original waybill.
        if let Some(existing) = self.by_key.get(key.as_str()) {
            return CreateShipmentOutcome::Created {
                waybill: existing.clone(),
            };
        }

        match &self.behavior {
            SimulatedBehavior::Succeed => {
                let waybill = self.issue_waybill();
                self.by_key.insert(key.as_str().to_string(), waybill.clone());
                CreateShipmentOutcome::Created { waybill }
            }
            SimulatedBehavior::Reject { message } => CreateShipmentOutcome::RecoverableFailure {
                error: GatewayError::rejected(message.clone()),
            },
            SimulatedBehavior::TimeOut => CreateShipmentOutcome::RecoverableFailure {
                error: GatewayError::timeout_with_duration("simulated timeout", self.timeout_ms),
            },
            SimulatedBehavior::ServerError => CreateShipmentOutcome::RecoverableFailure {
                error: GatewayError::server_error("simulated carrier fault"),
            },
            SimulatedBehavior::CommitThenFail { message } => {
                let waybill = self.issue_waybill();
                self.by_key.insert(key.as_str().to_string(), waybill.clone());
                CreateShipmentOutcome::CommittedFailure {
                    waybill,
                    message: message.clone(),
                }
            }
            SimulatedBehavior::FailFirst { .. } => {
                let remaining = self.failures_remaining.load(Ordering::SeqCst);
                if remaining > 0 {
                    self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
                    CreateShipmentOutcome::RecoverableFailure {
                        error: GatewayError::server_error("simulated transient fault"),
                    }
                } else {
                    let waybill = self.issue_waybill();
                    self.by_key.insert(key.as_str().to_string(), waybill.clone());
                    CreateShipmentOutcome::Created { waybill }
                }
            }
        }
    }

    async fn live_rate(&self, _request: &ShipmentRequest) -> GatewayResult<Money> {
        self.simulate_latency().await;
        self.live_rate
            .ok_or_else(|| GatewayError::live_rate_unavailable("no live rate configured"))
    }

    async fn track(&self, waybill: &Waybill) -> GatewayResult<TrackingStatus> {
        self.simulate_latency().await;
        self.tracking
            .get(waybill.as_str())
            .map(|status| *status)
            .ok_or_else(|| GatewayError::invalid_request(format!("unknown waybill {waybill}")))
    }

    async fn cancel(&self, waybill: &Waybill) -> GatewayResult<()> {
        self.simulate_latency().await;
        match self.tracking.get_mut(waybill.as_str()) {
            Some(mut status) if !status.is_terminal() => {
                *status = TrackingStatus::Cancelled;
                Ok(())
            }
            Some(_) => Err(GatewayError::rejected("shipment already terminal")),
            None => Err(GatewayError::invalid_request(format!(
                "unknown waybill {waybill}"
            ))),
        }
    }
}
