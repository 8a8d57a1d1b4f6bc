//! # Carrier Gateway Port
//!
//! Uniform interface for carrier integrations.
//!
//! Every carrier implements [`CarrierGateway`]; the booking orchestrator
//! is written once against this trait, never against a concrete carrier.
//!
//! The central contract is [`CreateShipmentOutcome`]: booking resolves to
//! a tagged variant rather than an error hierarchy, so the orchestrator's
//! dispatch is exhaustive. A waybill inside the outcome marks the
//! irreversible commitment point; once one exists, no alternate-provider
//! retry is permitted.

pub mod error;
pub mod registry;
pub mod simulated;

use crate::domain::entities::request::ShipmentRequest;
use crate::domain::value_objects::{IdempotencyKey, Money, ProviderId, Waybill};
use async_trait::async_trait;
use error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use registry::{InMemoryProviderRegistry, ProviderProfile, ProviderRegistry};
pub use simulated::{SimulatedBehavior, SimulatedCarrier};

/// Tracking state of a shipment as reported by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingStatus {
    /// Shipment created, awaiting pickup.
    Created,
    /// Picked up from the origin.
    PickedUp,
    /// Moving through the carrier network.
    InTransit,
    /// With the delivery agent.
    OutForDelivery,
    /// Delivered to the consignee.
    Delivered,
    /// Returned to origin.
    ReturnedToOrigin,
    /// Cancelled before pickup.
    Cancelled,
}

impl TrackingStatus {
    /// Returns true for states the shipment cannot leave.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::ReturnedToOrigin | Self::Cancelled
        )
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "CREATED",
            Self::PickedUp => "PICKED_UP",
            Self::InTransit => "IN_TRANSIT",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::ReturnedToOrigin => "RETURNED_TO_ORIGIN",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{label}")
    }
}

/// Resolution of a shipment creation call.
///
/// The three variants partition the retry-safety space:
///
/// - `Created`: waybill issued, booking committed
/// - `RecoverableFailure`: nothing committed on the carrier side; the
///   walk may move to the next-ranked provider
/// - `CommittedFailure`: a waybill was issued but the call then failed;
///   the booking is locked to this carrier and must be compensated,
///   never retried elsewhere
#[derive(Debug)]
pub enum CreateShipmentOutcome {
    /// The carrier issued a waybill.
    Created {
        /// The issued waybill.
        waybill: Waybill,
    },
    /// The attempt failed before any carrier-side commitment.
    RecoverableFailure {
        /// The classified failure.
        error: GatewayError,
    },
    /// A waybill was issued but the call failed afterwards.
    CommittedFailure {
        /// The waybill that locks the booking to this carrier.
        waybill: Waybill,
        /// What failed after issuance.
        message: String,
    },
}

impl CreateShipmentOutcome {
    /// Returns the waybill if one was issued, committed or not.
    #[must_use]
    pub fn waybill(&self) -> Option<&Waybill> {
        match self {
            Self::Created { waybill } | Self::CommittedFailure { waybill, .. } => Some(waybill),
            Self::RecoverableFailure { .. } => None,
        }
    }
}

/// Trait defining the interface for carrier integrations.
///
/// # Timeouts
///
/// Implementations enforce their own deadline, bounded by
/// [`timeout_ms`](Self::timeout_ms): `create_shipment` must resolve
/// within it, so the caller always learns whether a waybill was issued.
/// The orchestrator never cancels an in-flight creation call.
///
/// # Idempotency
///
/// `create_shipment` receives a deterministic [`IdempotencyKey`].
/// Replaying a call with the same key must return the original waybill
/// rather than creating a second shipment.
#[async_trait]
pub trait CarrierGateway: Send + Sync + fmt::Debug {
    /// Returns the provider this gateway books through.
    fn provider_id(&self) -> &ProviderId;

    /// Returns the deadline in milliseconds for gateway operations.
    fn timeout_ms(&self) -> u64;

    /// Creates a shipment with the carrier.
    ///
    /// Always resolves to a tagged outcome; carrier faults are carried
    /// inside [`CreateShipmentOutcome::RecoverableFailure`] rather than
    /// an error return, so dispatch stays exhaustive.
    async fn create_shipment(
        &self,
        request: &ShipmentRequest,
        key: &IdempotencyKey,
    ) -> CreateShipmentOutcome;

    /// Fetches the carrier's live freight quote for a lane.
    ///
    /// # Errors
    ///
    /// - `GatewayError::LiveRateUnavailable` - carrier has no live API
    /// - `GatewayError::Timeout` - carrier did not answer in time
    async fn live_rate(&self, request: &ShipmentRequest) -> GatewayResult<Money>;

    /// Fetches the tracking status of a shipment.
    ///
    /// # Errors
    ///
    /// - `GatewayError::InvalidRequest` - unknown waybill
    /// - `GatewayError::Timeout` - carrier did not answer in time
    async fn track(&self, waybill: &Waybill) -> GatewayResult<TrackingStatus>;

    /// Cancels a shipment before pickup.
    ///
    /// # Errors
    ///
    /// - `GatewayError::Rejected` - shipment already past pickup
    /// - `GatewayError::InvalidRequest` - unknown waybill
    async fn cancel(&self, waybill: &Waybill) -> GatewayResult<()>;

    /// Returns true if the carrier services the request's lane.
    ///
    /// Default implementation assumes full coverage.
    async fn is_serviceable(&self, _request: &ShipmentRequest) -> bool {
        true
    }
}
