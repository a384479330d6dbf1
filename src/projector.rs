//! Chart data projectors: radar axes, grouped difficulty bars, and the
//! deferral-curve scatter. Pure transformations of the selection state into
//! chart-ready rows; recomputed on every state change.

use crate::compare::CompareIndex;
use crate::score::cost_efficiency;
use crate::types::{CompareMetric, Difficulty, Router};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Line colors cycled across the selected routers, in selection order
pub const ROUTER_COLORS: [&str; 3] = ["#2563eb", "#f97316", "#10b981"];
/// Color shared by all non-selected background deferral points
pub const BACKGROUND_POINT_COLOR: &str = "#c7cdd8";

/// Cap on context points drawn behind the selected routers
pub const MAX_BACKGROUND_DEFERRAL_POINTS: usize = 30;

/// Radar charts are geometrically degenerate below a triangle; callers fall
/// back to a grouped-bar presentation under this many axes.
pub const MIN_RADAR_AXES: usize = 3;

/// Cost floor keeping every point plottable on a logarithmic axis
const COST_EPSILON: f64 = 0.001;

/// One radar axis with the resolved value per selected router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarRow {
    pub axis: String,
    /// Keyed by router id, in selection order
    pub values: IndexMap<String, f64>,
}

/// One difficulty group with the resolved value per selected router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRow {
    pub difficulty: Difficulty,
    pub values: IndexMap<String, f64>,
}

/// One scatter point on the deferral curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferralPoint {
    pub router_id: String,
    pub router_name: String,
    pub metric_value: f64,
    pub cost_per_1k: f64,
    pub color: String,
}

/// Selected-router points plus capped background context points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferralSeries {
    pub selected: Vec<DeferralPoint>,
    pub background: Vec<DeferralPoint>,
}

/// One row per axis in the current axis union; missing scope paths resolve
/// to 0 so every selected router appears on every axis.
pub fn project_radar(
    index: &CompareIndex,
    router_ids: &[String],
    category: Option<&str>,
    difficulty: Difficulty,
    metric: CompareMetric,
) -> Vec<RadarRow> {
    let axes = index.axis_union(router_ids, category);
    axes.into_iter()
        .map(|axis| {
            let values = router_ids
                .iter()
                .map(|id| {
                    let bundle = match category {
                        Some(cat) => index.get(id, Some(cat), Some(&axis), difficulty),
                        None => index.get(id, Some(&axis), None, difficulty),
                    };
                    (id.clone(), bundle.map_or(0.0, |b| b.value(metric)))
                })
                .collect();
            RadarRow { axis, values }
        })
        .collect()
}

/// True when the rows span enough axes for a meaningful radar chart
pub fn radar_is_meaningful(rows: &[RadarRow]) -> bool {
    rows.len() >= MIN_RADAR_AXES
}

fn category_average(
    index: &CompareIndex,
    router_id: &str,
    difficulty: Difficulty,
    metric: CompareMetric,
) -> f64 {
    let Some(entry) = index.entry(router_id) else {
        return 0.0;
    };
    if entry.categories.is_empty() {
        return 0.0;
    }
    let sum: f64 = entry
        .categories
        .values()
        .map(|c| c.metrics.get(difficulty).value(metric))
        .sum();
    sum / entry.categories.len() as f64
}

fn bar_value(
    index: &CompareIndex,
    router_id: &str,
    category: Option<&str>,
    sub_axis: Option<&str>,
    difficulty: Difficulty,
    metric: CompareMetric,
) -> f64 {
    match sub_axis {
        // A specific axis is active: read it directly, at whichever level
        // the current scope puts it.
        Some(axis) => {
            let bundle = match category {
                Some(cat) => index.get(router_id, Some(cat), Some(axis), difficulty),
                None => index.get(router_id, Some(axis), None, difficulty),
            };
            bundle.map_or(0.0, |b| b.value(metric))
        }
        None => match category {
            Some(cat) => index
                .get(router_id, Some(cat), None, difficulty)
                .map_or(0.0, |b| b.value(metric)),
            None => match index.get(router_id, None, None, difficulty) {
                Some(bundle) => bundle.value(metric),
                // No root-level metrics: average across all categories.
                None => category_average(index, router_id, difficulty, metric),
            },
        },
    }
}

/// Grouped-bar rows: one per difficulty to display (all levels when the
/// active difficulty is `all`, else just the active one).
pub fn project_bars(
    index: &CompareIndex,
    router_ids: &[String],
    category: Option<&str>,
    sub_axis: Option<&str>,
    metric: CompareMetric,
    active_difficulty: Difficulty,
) -> Vec<BarRow> {
    if router_ids.is_empty() {
        return Vec::new();
    }

    let difficulties: Vec<Difficulty> = if active_difficulty == Difficulty::All {
        Difficulty::ALL_LEVELS.to_vec()
    } else {
        vec![active_difficulty]
    };

    difficulties
        .into_iter()
        .map(|difficulty| BarRow {
            difficulty,
            values: router_ids
                .iter()
                .map(|id| {
                    (
                        id.clone(),
                        bar_value(index, id, category, sub_axis, difficulty, metric),
                    )
                })
                .collect(),
        })
        .collect()
}

/// Resolve the metric plotted on the deferral curve's vertical axis.
///
/// `None` means the router has no resolvable value at this scope and is
/// excluded from the plot; a missing point is more honest than a fabricated
/// zero.
fn deferral_metric_value(
    index: &CompareIndex,
    router: &Router,
    category: Option<&str>,
    difficulty: Difficulty,
    metric: CompareMetric,
) -> Option<f64> {
    let entry = index.entry(&router.id)?;

    if let Some(cat) = category {
        return entry
            .categories
            .get(cat)
            .map(|c| c.metrics.get(difficulty).value(metric));
    }

    if metric != CompareMetric::Cost {
        if let Some(root) = &entry.metrics {
            return Some(root.get(difficulty).value(metric));
        }
    }

    if entry.categories.is_empty() {
        return None;
    }

    // The state machine keeps the deferral view off the cost metric, but
    // resolve it anyway so the projector stands on its own.
    if metric == CompareMetric::Cost {
        return Some(cost_efficiency(router.metrics.cost_per_1k));
    }

    let values: Vec<f64> = entry
        .categories
        .values()
        .map(|c| c.metrics.get(difficulty).value(metric))
        .collect();
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn deferral_point(
    index: &CompareIndex,
    router: &Router,
    category: Option<&str>,
    difficulty: Difficulty,
    metric: CompareMetric,
    color: &str,
) -> Option<DeferralPoint> {
    let metric_value = deferral_metric_value(index, router, category, difficulty, metric)?;
    Some(DeferralPoint {
        router_id: router.id.clone(),
        router_name: router.name.clone(),
        metric_value,
        cost_per_1k: router.metrics.cost_per_1k.max(COST_EPSILON),
        color: color.to_string(),
    })
}

/// Deferral-curve scatter: the selected routers in their assigned colors,
/// plus up to [`MAX_BACKGROUND_DEFERRAL_POINTS`] context points for the rest
/// of the catalog, in stable catalog order.
pub fn project_deferral(
    index: &CompareIndex,
    catalog: &[Router],
    selected_ids: &[String],
    category: Option<&str>,
    difficulty: Difficulty,
    metric: CompareMetric,
) -> DeferralSeries {
    let by_id: IndexMap<&str, &Router> = catalog.iter().map(|r| (r.id.as_str(), r)).collect();

    let selected = selected_ids
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let router = by_id.get(id.as_str())?;
            deferral_point(
                index,
                router,
                category,
                difficulty,
                metric,
                ROUTER_COLORS[i % ROUTER_COLORS.len()],
            )
        })
        .collect();

    let background = catalog
        .iter()
        .filter(|r| !selected_ids.contains(&r.id))
        .filter_map(|router| {
            deferral_point(
                index,
                router,
                category,
                difficulty,
                metric,
                BACKGROUND_POINT_COLOR,
            )
        })
        .take(MAX_BACKGROUND_DEFERRAL_POINTS)
        .collect();

    DeferralSeries {
        selected,
        background,
    }
}
