//! # Metrics Sink
//!
//! Counter-based instrumentation for quoting and booking outcomes.
//!
//! The engine emits named counter increments; sinks decide where they
//! go. [`NoopMetrics`] discards them, [`InMemoryMetrics`] accumulates
//! them for tests and the simulation report.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// Counter names emitted by the engine.
pub mod counters {
    /// A quote session was produced.
    pub const QUOTES_CREATED: &str = "quotes_created";
    /// A provider failed or timed out during quote fan-out.
    pub const QUOTE_PROVIDER_FAILURES: &str = "quote_provider_failures";
    /// A live rate replaced card freight in a quote.
    pub const LIVE_RATES_APPLIED: &str = "live_rates_applied";
    /// A booking walk committed a shipment.
    pub const BOOKINGS_COMMITTED: &str = "bookings_committed";
    /// A booking committed through a fallback provider.
    pub const BOOKINGS_VIA_FALLBACK: &str = "bookings_via_fallback";
    /// A booking walk exhausted every candidate.
    pub const BOOKINGS_EXHAUSTED: &str = "bookings_exhausted";
    /// A wallet debit was reversed after a failed attempt.
    pub const DEBITS_REVERSED: &str = "debits_reversed";
    /// A post-commit failure required compensation.
    pub const POST_COMMIT_FAILURES: &str = "post_commit_failures";
}

/// Port for counter emission.
pub trait MetricsSink: Send + Sync + fmt::Debug {
    /// Increments a named counter by one.
    fn increment(&self, counter: &'static str);
}

/// Sink that discards all metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn increment(&self, _counter: &'static str) {}
}

/// Sink that accumulates counters in memory.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: RwLock<HashMap<&'static str, u64>>,
}

impl InMemoryMetrics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of a counter.
    #[must_use]
    pub fn value(&self, counter: &'static str) -> u64 {
        self.counters.read().get(counter).copied().unwrap_or(0)
    }

    /// Returns a snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<&'static str, u64> {
        self.counters.read().clone()
    }
}

impl MetricsSink for InMemoryMetrics {
    fn increment(&self, counter: &'static str) {
        *self.counters.write().entry(counter).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_accumulates() {
        let metrics = InMemoryMetrics::new();
        metrics.increment(counters::BOOKINGS_COMMITTED);
        metrics.increment(counters::BOOKINGS_COMMITTED);
        metrics.increment(counters::DEBITS_REVERSED);

        assert_eq!(metrics.value(counters::BOOKINGS_COMMITTED), 2);
        assert_eq!(metrics.value(counters::DEBITS_REVERSED), 1);
        assert_eq!(metrics.value(counters::BOOKINGS_EXHAUSTED), 0);
        assert_eq!(metrics.snapshot().len(), 2);
    }

    #[test]
    fn noop_discards() {
        let metrics = NoopMetrics;
        metrics.increment(counters::QUOTES_CREATED);
    }
}
