//! Selection & scope state machine for the comparison view.
//!
//! All transitions go through one pure reducer so every invariant-restoring
//! correction happens atomically in a single step; there is never a
//! transiently inconsistent intermediate state to observe.

use crate::compare::CompareIndex;
use crate::types::{ChartView, CompareMetric, Difficulty};
use serde::{Deserialize, Serialize};

/// Upper bound on routers compared side by side
pub const MAX_SELECTED_ROUTERS: usize = 3;

/// Comparison selection state. Session-scoped, never persisted.
///
/// Invariants, restored by [`reduce`] after every event:
/// - at most [`MAX_SELECTED_ROUTERS`] selected routers;
/// - the deferral view is never active while the metric is cost;
/// - `category`, if set, exists across the selected routers' entries;
/// - `sub_axis`, if set, is in the current axis union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected: Vec<String>,
    pub metric: CompareMetric,
    pub difficulty: Difficulty,
    pub category: Option<String>,
    pub sub_axis: Option<String>,
    pub view: ChartView,
}

impl Default for SelectionState {
    fn default() -> Self {
        SelectionState {
            selected: Vec::new(),
            metric: CompareMetric::Accuracy,
            difficulty: Difficulty::All,
            category: None,
            sub_axis: None,
            view: ChartView::Spider,
        }
    }
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Events the comparison view can dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    SelectRouter(String),
    DeselectRouter(String),
    SetMetric(CompareMetric),
    SetDifficulty(Difficulty),
    SetChartView(ChartView),
    DrillIntoCategory(String),
    ClearCategory,
    ToggleAxis(String),
}

/// Apply one event and every follow-up correction, returning the next state.
///
/// Invalid transitions (4th selection, deferral under cost) are no-ops or
/// auto-corrections, never errors: they are reachable from ordinary UI
/// interaction.
pub fn reduce(state: &SelectionState, event: SelectionEvent, index: &CompareIndex) -> SelectionState {
    let mut next = state.clone();

    match event {
        SelectionEvent::SelectRouter(id) => {
            if !next.selected.contains(&id) && next.selected.len() < MAX_SELECTED_ROUTERS {
                next.selected.push(id);
            }
        }
        SelectionEvent::DeselectRouter(id) => {
            next.selected.retain(|s| s != &id);
        }
        SelectionEvent::SetMetric(metric) => {
            next.metric = metric;
            if metric == CompareMetric::Cost && next.view == ChartView::Deferral {
                next.view = ChartView::Spider;
            }
        }
        SelectionEvent::SetDifficulty(difficulty) => {
            next.difficulty = difficulty;
        }
        SelectionEvent::SetChartView(view) => {
            if !(view == ChartView::Deferral && next.metric == CompareMetric::Cost) {
                next.view = view;
            }
        }
        SelectionEvent::DrillIntoCategory(category) => {
            next.category = Some(category);
            next.sub_axis = None;
        }
        SelectionEvent::ClearCategory => {
            next.category = None;
            next.sub_axis = None;
        }
        SelectionEvent::ToggleAxis(axis) => {
            // One-level drill-down only: axis clicks are disabled while a
            // category scope is already active.
            if next.category.is_none() {
                if next.sub_axis.as_deref() == Some(axis.as_str()) {
                    next.sub_axis = None;
                } else {
                    next.sub_axis = Some(axis.clone());
                }
                if index.has_subcategories(&next.selected, &axis) {
                    next.category = Some(axis);
                }
            }
        }
    }

    reconcile(&mut next, index);
    next
}

/// Clear any scope that the current selection no longer supports
fn reconcile(state: &mut SelectionState, index: &CompareIndex) {
    if let Some(category) = state.category.clone() {
        let known = index
            .scope_options(&state.selected)
            .iter()
            .any(|option| option.category == category);
        if !known {
            state.category = None;
            state.sub_axis = None;
        }
    }

    if let Some(sub_axis) = state.sub_axis.clone() {
        let axes = index.axis_union(&state.selected, state.category.as_deref());
        if !axes.contains(&sub_axis) {
            state.sub_axis = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CompareCategoryEntry, CompareSubEntry, DifficultyMetricMap, MetricBundle, Provenance,
        Router, RouterCompareEntry, RouterMetrics, RouterType,
    };
    use indexmap::IndexMap;

    fn test_router(id: &str) -> Router {
        Router {
            id: id.to_string(),
            name: id.to_string(),
            router_type: RouterType::OpenSource,
            affiliation: "Test".to_string(),
            description: String::new(),
            model_pool: Vec::new(),
            website_url: None,
            paper_url: None,
            github_url: None,
            huggingface_url: None,
            metrics: RouterMetrics {
                arena_score: 50.0,
                optimal_selection_score: None,
                optimal_cost_score: None,
                optimal_acc_score: None,
                robustness_score: None,
                latency_score: None,
                accuracy: 60.0,
                cost_per_1k: 1.0,
                overall_rank: 1,
            },
        }
    }

    fn flat_map(v: f64) -> DifficultyMetricMap {
        let bundle = MetricBundle {
            accuracy: v,
            robustness: v,
            cost: v,
        };
        DifficultyMetricMap {
            easy: bundle,
            medium: bundle,
            hard: bundle,
            all: bundle,
        }
    }

    fn entry(categories: &[(&str, &[&str])]) -> RouterCompareEntry {
        let mut cats = IndexMap::new();
        for (name, subs) in categories {
            let subcategories = if subs.is_empty() {
                None
            } else {
                Some(
                    subs.iter()
                        .map(|s| {
                            (
                                s.to_string(),
                                CompareSubEntry {
                                    metrics: flat_map(40.0),
                                },
                            )
                        })
                        .collect(),
                )
            };
            cats.insert(
                name.to_string(),
                CompareCategoryEntry {
                    metrics: flat_map(50.0),
                    subcategories,
                },
            );
        }
        RouterCompareEntry {
            metrics: Some(flat_map(60.0)),
            categories: cats,
            provenance: Provenance::Measured,
        }
    }

    /// r1, r2 have Science (with subs) and Language; r3 has History only.
    fn test_index() -> CompareIndex {
        let routers = vec![test_router("r1"), test_router("r2"), test_router("r3")];
        let mut measured = IndexMap::new();
        measured.insert(
            "r1".to_string(),
            entry(&[("Science", &["Physics", "Biology"]), ("Language", &[])]),
        );
        measured.insert(
            "r2".to_string(),
            entry(&[("Science", &["Physics"]), ("Language", &[])]),
        );
        measured.insert("r3".to_string(), entry(&[("History", &[])]));
        CompareIndex::build(&routers, &measured)
    }

    fn select(index: &CompareIndex, state: SelectionState, id: &str) -> SelectionState {
        reduce(&state, SelectionEvent::SelectRouter(id.to_string()), index)
    }

    // ========================================================================
    // SELECTION CAP TESTS
    // ========================================================================

    #[test]
    fn test_selection_capped_at_three() {
        let index = test_index();
        let mut state = SelectionState::default();
        for id in ["a", "b", "c", "d", "e"] {
            state = select(&index, state, id);
        }
        assert_eq!(state.selected, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fourth_select_leaves_state_unchanged() {
        let index = test_index();
        let mut state = SelectionState::default();
        for id in ["a", "b", "c"] {
            state = select(&index, state, id);
        }
        let after = select(&index, state.clone(), "d");
        assert_eq!(after, state);
    }

    #[test]
    fn test_duplicate_select_is_noop() {
        let index = test_index();
        let state = select(&index, SelectionState::default(), "r1");
        let again = select(&index, state.clone(), "r1");
        assert_eq!(again, state);
    }

    #[test]
    fn test_deselect_removes_router() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = select(&index, state, "r2");
        state = reduce(&state, SelectionEvent::DeselectRouter("r1".to_string()), &index);
        assert_eq!(state.selected, vec!["r2"]);
    }

    // ========================================================================
    // DEFERRAL / COST EXCLUSIVITY TESTS
    // ========================================================================

    #[test]
    fn test_cost_metric_forces_view_off_deferral() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(&state, SelectionEvent::SetChartView(ChartView::Deferral), &index);
        assert_eq!(state.view, ChartView::Deferral);

        state = reduce(&state, SelectionEvent::SetMetric(CompareMetric::Cost), &index);
        assert_eq!(state.metric, CompareMetric::Cost);
        assert_eq!(state.view, ChartView::Spider);
    }

    #[test]
    fn test_deferral_view_rejected_under_cost_metric() {
        let index = test_index();
        let mut state = reduce(
            &SelectionState::default(),
            SelectionEvent::SetMetric(CompareMetric::Cost),
            &index,
        );
        state = reduce(&state, SelectionEvent::SetChartView(ChartView::Bars), &index);
        let attempted = reduce(&state, SelectionEvent::SetChartView(ChartView::Deferral), &index);
        assert_eq!(attempted.view, ChartView::Bars);
    }

    // ========================================================================
    // SCOPE RECONCILIATION TESTS
    // ========================================================================

    #[test]
    fn test_scope_cleared_when_selection_loses_category() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(
            &state,
            SelectionEvent::DrillIntoCategory("Science".to_string()),
            &index,
        );
        assert_eq!(state.category.as_deref(), Some("Science"));

        // Swap the selection for a router with no Science category.
        state = reduce(&state, SelectionEvent::DeselectRouter("r1".to_string()), &index);
        state = select(&index, state, "r3");
        assert_eq!(state.category, None);
        assert_eq!(state.sub_axis, None);
    }

    #[test]
    fn test_sub_axis_cleared_when_not_in_axis_union() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(&state, SelectionEvent::ToggleAxis("Language".to_string()), &index);
        assert_eq!(state.sub_axis.as_deref(), Some("Language"));

        state = reduce(&state, SelectionEvent::DeselectRouter("r1".to_string()), &index);
        state = select(&index, state, "r3");
        assert_eq!(state.sub_axis, None);
    }

    #[test]
    fn test_valid_scope_survives_selection_change() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(
            &state,
            SelectionEvent::DrillIntoCategory("Science".to_string()),
            &index,
        );
        state = select(&index, state, "r2");
        assert_eq!(state.category.as_deref(), Some("Science"));
    }

    #[test]
    fn test_drill_into_unknown_category_reverts_to_overall() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(
            &state,
            SelectionEvent::DrillIntoCategory("Astrology".to_string()),
            &index,
        );
        assert_eq!(state.category, None);
    }

    // ========================================================================
    // AXIS TOGGLE TESTS
    // ========================================================================

    #[test]
    fn test_toggle_axis_chains_drill_down_when_axis_has_children() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(&state, SelectionEvent::ToggleAxis("Science".to_string()), &index);
        // Science has subcategories, so the toggle drills in; the sub-axis
        // label is not a subcategory of Science and gets cleared.
        assert_eq!(state.category.as_deref(), Some("Science"));
        assert_eq!(state.sub_axis, None);
    }

    #[test]
    fn test_toggle_axis_is_noop_while_drilled_in() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(
            &state,
            SelectionEvent::DrillIntoCategory("Science".to_string()),
            &index,
        );
        let before = state.clone();
        let after = reduce(&before, SelectionEvent::ToggleAxis("Language".to_string()), &index);
        assert_eq!(after, before);
    }

    #[test]
    fn test_toggle_axis_toggles_off() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(&state, SelectionEvent::ToggleAxis("Language".to_string()), &index);
        assert_eq!(state.sub_axis.as_deref(), Some("Language"));
        state = reduce(&state, SelectionEvent::ToggleAxis("Language".to_string()), &index);
        assert_eq!(state.sub_axis, None);
    }

    #[test]
    fn test_clear_category_resets_scope() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(
            &state,
            SelectionEvent::DrillIntoCategory("Science".to_string()),
            &index,
        );
        state = reduce(&state, SelectionEvent::ClearCategory, &index);
        assert_eq!(state.category, None);
        assert_eq!(state.sub_axis, None);
    }

    #[test]
    fn test_emptying_selection_clears_scope() {
        let index = test_index();
        let mut state = select(&index, SelectionState::default(), "r1");
        state = reduce(
            &state,
            SelectionEvent::DrillIntoCategory("Science".to_string()),
            &index,
        );
        state = reduce(&state, SelectionEvent::DeselectRouter("r1".to_string()), &index);
        assert!(state.is_empty());
        assert_eq!(state.category, None);
        assert_eq!(state.sub_axis, None);
    }
}
