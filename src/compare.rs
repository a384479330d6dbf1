//! Category/scope score index: scoped metric lookups, synthetic entries for
//! routers without measured category data, and axis unions for the charts.

use crate::score::cost_efficiency;
use crate::types::{
    CompareCategoryEntry, CompareSubEntry, Difficulty, DifficultyMetricMap, MetricBundle,
    Provenance, Router, RouterCompareEntry,
};
use indexmap::IndexMap;
use tracing::debug;

/// Axis label pinned first in every axis union, ahead of the alphabetical
/// ordering of the rest.
pub const PRIORITY_AXIS_LABEL: &str = "Computer science, information, and general works";

/// Category names used when synthesizing entries and no measured entry
/// exists anywhere to borrow a category layout from. These are the nine
/// top-level domains of the evaluation dataset.
const FALLBACK_CATEGORIES: [&str; 9] = [
    PRIORITY_AXIS_LABEL,
    "Philosophy and psychology",
    "Religion",
    "Social sciences",
    "Language",
    "Science",
    "Technology",
    "Arts and recreation",
    "Literature",
];

/// Category layout used for synthesizing compare entries: each category
/// name with its known subcategory names.
#[derive(Debug, Clone, Default)]
pub struct CategoryTemplate {
    pub categories: Vec<(String, Vec<String>)>,
}

impl CategoryTemplate {
    /// Union of categories and subcategories across measured entries, in
    /// first-appearance order. Falls back to the dataset's nine domains
    /// when there are no measured entries at all.
    pub fn from_measured<'a, I>(entries: I) -> CategoryTemplate
    where
        I: IntoIterator<Item = &'a RouterCompareEntry>,
    {
        let mut categories: IndexMap<String, Vec<String>> = IndexMap::new();
        for entry in entries {
            for (name, category) in &entry.categories {
                let subs = categories.entry(name.clone()).or_default();
                if let Some(subcategories) = &category.subcategories {
                    for sub in subcategories.keys() {
                        if !subs.contains(sub) {
                            subs.push(sub.clone());
                        }
                    }
                }
            }
        }

        if categories.is_empty() {
            return CategoryTemplate {
                categories: FALLBACK_CATEGORIES
                    .iter()
                    .map(|name| (name.to_string(), Vec::new()))
                    .collect(),
            };
        }

        CategoryTemplate {
            categories: categories.into_iter().collect(),
        }
    }
}

/// Deterministic small perturbation for position `i`: 0, -1.8, +1.8, -3.6, ...
fn positional_offset(i: usize) -> f64 {
    let step = i.div_ceil(2) as f64;
    let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
    sign * step * 1.8
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn synth_difficulty_map(accuracy: f64, robustness: f64, cost: f64) -> DifficultyMetricMap {
    let bundle = |shift: f64| MetricBundle {
        accuracy: clamp_score(accuracy + shift),
        robustness: clamp_score(robustness + shift),
        cost: clamp_score(cost + shift * 0.5),
    };
    DifficultyMetricMap {
        easy: bundle(6.0),
        medium: bundle(0.0),
        hard: bundle(-6.0),
        all: bundle(0.0),
    }
}

/// Derive a compare entry for a router that has no measured category data.
///
/// Per-category and per-subcategory values are the router's top-level
/// accuracy/cost-efficiency perturbed by a deterministic positional offset
/// and clamped to [0,100]. This is a presentation heuristic, flagged
/// `Provenance::Estimated` so consumers can tell it apart from measurement.
pub fn build_synthetic_entry(router: &Router, template: &CategoryTemplate) -> RouterCompareEntry {
    let base_accuracy = router.metrics.accuracy;
    let base_cost = cost_efficiency(router.metrics.cost_per_1k);
    // No per-category robustness exists to synthesize from; fall back to the
    // top-level robustness score, or accuracy when never evaluated.
    let base_robustness = router.metrics.robustness_score.unwrap_or(base_accuracy);

    let mut categories = IndexMap::new();
    for (i, (name, sub_names)) in template.categories.iter().enumerate() {
        let offset = positional_offset(i);
        let metrics = synth_difficulty_map(
            base_accuracy + offset,
            base_robustness + offset,
            base_cost + offset,
        );

        let subcategories = if sub_names.is_empty() {
            None
        } else {
            let mut subs = IndexMap::new();
            for (j, sub_name) in sub_names.iter().enumerate() {
                let sub_offset = positional_offset(i + j);
                subs.insert(
                    sub_name.clone(),
                    CompareSubEntry {
                        metrics: synth_difficulty_map(
                            base_accuracy + sub_offset,
                            base_robustness + sub_offset,
                            base_cost + sub_offset,
                        ),
                    },
                );
            }
            Some(subs)
        };

        categories.insert(
            name.clone(),
            CompareCategoryEntry {
                metrics,
                subcategories,
            },
        );
    }

    RouterCompareEntry {
        metrics: Some(synth_difficulty_map(base_accuracy, base_robustness, base_cost)),
        categories,
        provenance: Provenance::Estimated,
    }
}

/// One category with its sorted subcategory names, as offered by the scope
/// drill-down control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeOption {
    pub category: String,
    pub subcategories: Vec<String>,
}

/// Immutable lookup of compare entries by router id, merged from measured
/// data and synthesized fallbacks. Every catalog router has an entry.
#[derive(Debug, Clone)]
pub struct CompareIndex {
    entries: IndexMap<String, RouterCompareEntry>,
}

impl CompareIndex {
    /// Merge measured entries (keyed by display name) with synthesized ones
    /// for every catalog router the measured map misses.
    pub fn build(
        routers: &[Router],
        measured_by_name: &IndexMap<String, RouterCompareEntry>,
    ) -> CompareIndex {
        let template = CategoryTemplate::from_measured(measured_by_name.values());

        let mut entries = IndexMap::with_capacity(routers.len());
        for router in routers {
            let entry = match measured_by_name.get(&router.name) {
                Some(measured) => measured.clone(),
                None => {
                    debug!(router = %router.id, "no measured category scores, synthesizing");
                    build_synthetic_entry(router, &template)
                }
            };
            entries.insert(router.id.clone(), entry);
        }

        CompareIndex { entries }
    }

    pub fn entry(&self, router_id: &str) -> Option<&RouterCompareEntry> {
        self.entries.get(router_id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Resolve the metric bundle at the given scope. `None` means "no data
    /// for this scope"; callers fall back to zero or sibling averages.
    pub fn get(
        &self,
        router_id: &str,
        category: Option<&str>,
        subcategory: Option<&str>,
        difficulty: Difficulty,
    ) -> Option<&MetricBundle> {
        let entry = self.entries.get(router_id)?;
        match (category, subcategory) {
            (None, _) => Some(entry.metrics.as_ref()?.get(difficulty)),
            (Some(cat), None) => Some(entry.categories.get(cat)?.metrics.get(difficulty)),
            (Some(cat), Some(sub)) => {
                let subs = entry.categories.get(cat)?.subcategories.as_ref()?;
                Some(subs.get(sub)?.metrics.get(difficulty))
            }
        }
    }

    /// Union of axis labels across the given routers: subcategory names of
    /// `active_category` when drilled in, top-level category names
    /// otherwise. Alphabetical, except the priority label pins first.
    pub fn axis_union(&self, router_ids: &[String], active_category: Option<&str>) -> Vec<String> {
        let mut axes: Vec<String> = Vec::new();
        for id in router_ids {
            let Some(entry) = self.entries.get(id) else {
                continue;
            };
            match active_category {
                Some(cat) => {
                    if let Some(subs) = entry
                        .categories
                        .get(cat)
                        .and_then(|c| c.subcategories.as_ref())
                    {
                        for label in subs.keys() {
                            if !axes.contains(label) {
                                axes.push(label.clone());
                            }
                        }
                    }
                }
                None => {
                    for label in entry.categories.keys() {
                        if !axes.contains(label) {
                            axes.push(label.clone());
                        }
                    }
                }
            }
        }

        axes.sort_by(|a, b| {
            let a_priority = a == PRIORITY_AXIS_LABEL;
            let b_priority = b == PRIORITY_AXIS_LABEL;
            match (a_priority, b_priority) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                (false, false) => a.cmp(b),
            }
        });
        axes
    }

    /// Categories present across the given routers, each with the sorted
    /// union of its subcategories. Sorted by category name.
    pub fn scope_options(&self, router_ids: &[String]) -> Vec<ScopeOption> {
        let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
        for id in router_ids {
            let Some(entry) = self.entries.get(id) else {
                continue;
            };
            for (name, category) in &entry.categories {
                let subs = map.entry(name.clone()).or_default();
                if let Some(subcategories) = &category.subcategories {
                    for sub in subcategories.keys() {
                        if !subs.contains(sub) {
                            subs.push(sub.clone());
                        }
                    }
                }
            }
        }

        let mut options: Vec<ScopeOption> = map
            .into_iter()
            .map(|(category, mut subcategories)| {
                subcategories.sort();
                ScopeOption {
                    category,
                    subcategories,
                }
            })
            .collect();
        options.sort_by(|a, b| a.category.cmp(&b.category));
        options
    }

    /// True when any of the routers has subcategory data under `category`
    pub fn has_subcategories(&self, router_ids: &[String], category: &str) -> bool {
        router_ids.iter().any(|id| {
            self.entries
                .get(id)
                .and_then(|e| e.categories.get(category))
                .and_then(|c| c.subcategories.as_ref())
                .is_some_and(|subs| !subs.is_empty())
        })
    }
}
