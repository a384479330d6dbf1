//! CLI command logic - extracted for testability
//!
//! This module contains pure functions and testable logic extracted from
//! main.rs. Display functions remain in main.rs.

use crate::catalog::derive_router_id;
use crate::loader::ArenaData;
use crate::projector::{
    project_bars, project_deferral, project_radar, radar_is_meaningful, BarRow, DeferralSeries,
    RadarRow,
};
use crate::selection::{reduce, SelectionEvent, SelectionState};
use crate::types::{ChartView, CompareMetric, Difficulty};
use anyhow::bail;
use serde::Serialize;

/// Parse a comma-separated router list into normalized ids.
/// Display names are accepted and normalized the same way ids are derived.
pub fn parse_router_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|token| derive_router_id(token))
        .collect()
}

/// A comparison request as assembled from CLI flags
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub routers: Vec<String>,
    pub metric: CompareMetric,
    pub difficulty: Difficulty,
    pub category: Option<String>,
    pub view: ChartView,
}

/// Chart-ready output of a comparison run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase", tag = "view", content = "data")]
pub enum CompareOutput {
    Radar(Vec<RadarRow>),
    Bars(Vec<BarRow>),
    Deferral(DeferralSeries),
}

/// Drive the selection reducer with the requested routers and scope, then
/// project the chart data the resulting state calls for.
pub fn run_compare(data: &ArenaData, request: &CompareRequest) -> anyhow::Result<CompareOutput> {
    if request.routers.is_empty() {
        bail!("no routers selected; pass --routers with 1-3 ids");
    }
    for id in &request.routers {
        if data.router_by_id(id).is_none() {
            bail!("unknown router id: {id}");
        }
    }

    let mut state = SelectionState::default();
    for id in &request.routers {
        state = reduce(&state, SelectionEvent::SelectRouter(id.clone()), &data.index);
    }
    state = reduce(&state, SelectionEvent::SetMetric(request.metric), &data.index);
    state = reduce(
        &state,
        SelectionEvent::SetDifficulty(request.difficulty),
        &data.index,
    );
    if let Some(category) = &request.category {
        state = reduce(
            &state,
            SelectionEvent::DrillIntoCategory(category.clone()),
            &data.index,
        );
        if state.category.is_none() {
            bail!("category {:?} has no data for the selected routers", category);
        }
    }
    state = reduce(&state, SelectionEvent::SetChartView(request.view), &data.index);

    let output = match state.view {
        ChartView::Spider => {
            let rows = project_radar(
                &data.index,
                &state.selected,
                state.category.as_deref(),
                state.difficulty,
                state.metric,
            );
            if radar_is_meaningful(&rows) {
                CompareOutput::Radar(rows)
            } else {
                // Fewer than three axes is degenerate as a radar; fall back
                // to the grouped-bar presentation.
                CompareOutput::Bars(project_bars(
                    &data.index,
                    &state.selected,
                    state.category.as_deref(),
                    state.sub_axis.as_deref(),
                    state.metric,
                    state.difficulty,
                ))
            }
        }
        ChartView::Bars => CompareOutput::Bars(project_bars(
            &data.index,
            &state.selected,
            state.category.as_deref(),
            state.sub_axis.as_deref(),
            state.metric,
            state.difficulty,
        )),
        ChartView::Deferral => CompareOutput::Deferral(project_deferral(
            &data.index,
            &data.routers,
            &state.selected,
            state.category.as_deref(),
            state.difficulty,
            state.metric,
        )),
    };

    Ok(output)
}
