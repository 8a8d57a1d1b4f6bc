//! # Infrastructure Layer
//!
//! Ports and adapters around the domain: carrier gateways, the company
//! wallet, persistence, and metrics.

pub mod gateway;
pub mod metrics;
pub mod persistence;
pub mod wallet;

pub use gateway::{CarrierGateway, CreateShipmentOutcome, TrackingStatus};
pub use metrics::{InMemoryMetrics, MetricsSink, NoopMetrics};
pub use wallet::{InMemoryWallet, WalletError, WalletService};
