//! Metric normalization: cost-efficiency and the weighted Arena score.
//!
//! Cost spans several orders of magnitude across routers, so efficiency is
//! scored on a log scale between fixed bounds; the Arena score is a weighted
//! harmonic mean of accuracy and cost-efficiency.

/// Cheapest observed cost per 1k queries, USD. Scores 100.
pub const COST_MIN: f64 = 0.0044;
/// Most expensive cost per 1k queries, USD. Scores 0.
pub const COST_MAX: f64 = 200.0;

/// Default cost-weight slider value, beta = 0.1
pub const DEFAULT_COST_WEIGHT: f64 = 1.0 / 11.0;

const WEIGHT_FLOOR: f64 = 0.05;
const WEIGHT_CEIL: f64 = 0.95;
const WEIGHT_SNAP_THRESHOLD: f64 = 0.015;

/// Log-scaled cost-efficiency score in [0, 100]; lower cost scores higher.
///
/// Costs below `COST_MIN` clamp to 100, costs above `COST_MAX` clamp to 0.
pub fn cost_efficiency(cost_per_1k: f64) -> f64 {
    let span = COST_MAX.log2() - COST_MIN.log2();
    if span <= 0.0 {
        return 0.0;
    }
    let floored = cost_per_1k.max(COST_MIN);
    let normalized = (COST_MAX.log2() - floored.log2()) / span;
    normalized.clamp(0.0, 1.0) * 100.0
}

/// Weighted harmonic mean of accuracy and cost-efficiency, in [0, 100].
///
/// `beta` scales the weight of accuracy relative to cost-efficiency; a zero
/// denominator yields 0 rather than NaN.
pub fn arena_score(accuracy_percent: f64, cost_per_1k: f64, beta: f64) -> f64 {
    let a = accuracy_percent / 100.0;
    let c = cost_efficiency(cost_per_1k) / 100.0;
    let denom = beta * a + c;
    if denom > 0.0 {
        100.0 * (1.0 + beta) * a * c / denom
    } else {
        0.0
    }
}

/// User-adjustable cost weight, clamped to [0.05, 0.95].
///
/// The weight `w` maps to the harmonic-mean exponent via `beta = w / (1-w)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeight(f64);

impl CostWeight {
    pub fn new(w: f64) -> CostWeight {
        CostWeight(w.clamp(WEIGHT_FLOOR, WEIGHT_CEIL))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn beta(self) -> f64 {
        self.0 / (1.0 - self.0)
    }

    /// Snap to the default weight when within the slider's snap threshold.
    pub fn snapped(self) -> CostWeight {
        if (self.0 - DEFAULT_COST_WEIGHT).abs() < WEIGHT_SNAP_THRESHOLD {
            CostWeight(DEFAULT_COST_WEIGHT)
        } else {
            self
        }
    }
}

impl Default for CostWeight {
    fn default() -> Self {
        CostWeight(DEFAULT_COST_WEIGHT)
    }
}
