//! # Ranking Strategies
//!
//! Strategies for ordering quote options.
//!
//! A strategy consumes the unranked options of one aggregation pass and
//! returns them best-first with `rank` and `score` filled in. Scores are
//! comparable only within one pass; lower is better.

use crate::domain::entities::quote::QuoteOption;
use rust_decimal::prelude::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;

/// Trait for quote ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Orders the options best-first, assigning rank and score.
    fn rank(&self, options: Vec<QuoteOption>) -> Vec<QuoteOption>;

    /// Returns the name of this strategy.
    fn name(&self) -> &'static str;
}

fn total_as_f64(option: &QuoteOption) -> f64 {
    option.total_amount.get().to_f64().unwrap_or(f64::MAX)
}

/// Default strategy: cheapest sell total first.
///
/// Lexicographic order: ascending total, then ascending transit days,
/// then descending reliability.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestFirst;

impl CheapestFirst {
    /// Creates the strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for CheapestFirst {
    fn rank(&self, mut options: Vec<QuoteOption>) -> Vec<QuoteOption> {
        options.sort_by(|a, b| {
            a.total_amount
                .cmp(&b.total_amount)
                .then(a.transit_days.cmp(&b.transit_days))
                .then(
                    b.reliability_score
                        .partial_cmp(&a.reliability_score)
                        .unwrap_or(Ordering::Equal),
                )
        });
        options
            .into_iter()
            .enumerate()
            .map(|(i, option)| {
                let score = total_as_f64(&option);
                option.with_rank(i + 1, score)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "CheapestFirst"
    }
}

/// Composite strategy weighting price, transit time, and reliability.
///
/// Each factor is min-max normalized over the candidate set; the score
/// is the weighted sum (reliability inverted so lower stays better).
#[derive(Debug, Clone, Copy)]
pub struct ReliabilityWeighted {
    /// Weight of the sell total.
    pub price_weight: f64,
    /// Weight of transit days.
    pub transit_weight: f64,
    /// Weight of (inverted) reliability.
    pub reliability_weight: f64,
}

impl Default for ReliabilityWeighted {
    fn default() -> Self {
        Self {
            price_weight: 0.5,
            transit_weight: 0.2,
            reliability_weight: 0.3,
        }
    }
}

impl ReliabilityWeighted {
    /// Creates a strategy with custom weights.
    #[must_use]
    pub fn new(price_weight: f64, transit_weight: f64, reliability_weight: f64) -> Self {
        Self {
            price_weight,
            transit_weight,
            reliability_weight,
        }
    }
}

fn min_max(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let min = values.clone().fold(f64::MAX, f64::min);
    let max = values.fold(f64::MIN, f64::max);
    (min, max)
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        0.0
    } else {
        (value - min) / (max - min)
    }
}

impl RankingStrategy for ReliabilityWeighted {
    fn rank(&self, options: Vec<QuoteOption>) -> Vec<QuoteOption> {
        if options.is_empty() {
            return options;
        }

        let (price_min, price_max) = min_max(options.iter().map(total_as_f64));
        let (transit_min, transit_max) =
            min_max(options.iter().map(|o| f64::from(o.transit_days)));

        let mut scored: Vec<(f64, QuoteOption)> = options
            .into_iter()
            .map(|option| {
                let price_norm = normalize(total_as_f64(&option), price_min, price_max);
                let transit_norm =
                    normalize(f64::from(option.transit_days), transit_min, transit_max);
                let unreliability = 1.0 - option.reliability_score.clamp(0.0, 1.0);
                let score = self.price_weight * price_norm
                    + self.transit_weight * transit_norm
                    + self.reliability_weight * unreliability;
                (score, option)
            })
            .collect();

        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .enumerate()
            .map(|(i, (score, option))| option.with_rank(i + 1, score))
            .collect()
    }

    fn name(&self) -> &'static str {
        "ReliabilityWeighted"
    }
}
