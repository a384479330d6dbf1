//! Router catalog construction: joins raw leaderboard records with router
//! metadata, rounds scores, and assigns dense overall ranks.

use crate::types::{RawLeaderboardRecord, Router, RouterMetadata, RouterMetrics, RouterType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Data-integrity failure while building the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("record {index}: router name {name:?} does not yield a valid id")]
    InvalidRouterName { index: usize, name: String },
}

/// Derive a router id from its display name: lowercased, with runs of
/// whitespace and underscores collapsed to a single hyphen.
pub fn derive_router_id(name: &str) -> Option<String> {
    let mut id = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() || ch == '_' {
            pending_hyphen = !id.is_empty();
        } else {
            if pending_hyphen {
                id.push('-');
                pending_hyphen = false;
            }
            id.extend(ch.to_lowercase());
        }
    }
    if id.is_empty() || id.chars().all(|c| c == '-') {
        None
    } else {
        Some(id)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round1_opt(value: Option<f64>) -> Option<f64> {
    value.map(round1)
}

fn placeholder_metadata(display_name: &str) -> RouterMetadata {
    RouterMetadata {
        name: display_name.to_string(),
        router_type: RouterType::OpenSource,
        description: format!("Router: {}", display_name),
        affiliation: "Unknown".to_string(),
        model_pool: Vec::new(),
        website_url: None,
        paper_url: None,
        github_url: None,
        huggingface_url: None,
    }
}

/// Build the ranked router catalog from raw leaderboard records and a
/// display-name-keyed metadata map.
///
/// A record whose display name cannot be turned into a non-empty id is a
/// data-integrity error, not a silent drop. Missing metadata is fine and
/// synthesized with open-source defaults.
pub fn build_catalog(
    records: &[RawLeaderboardRecord],
    metadata: &IndexMap<String, RouterMetadata>,
) -> Result<Vec<Router>, CatalogError> {
    let mut routers = Vec::with_capacity(records.len());
    let mut averages = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let id = derive_router_id(&record.router_name).ok_or_else(|| {
            CatalogError::InvalidRouterName {
                index,
                name: record.router_name.clone(),
            }
        })?;

        let meta = match metadata.get(&record.router_name) {
            Some(m) => m.clone(),
            None => {
                debug!(router = %record.router_name, "no metadata entry, synthesizing defaults");
                placeholder_metadata(&record.router_name)
            }
        };

        let metrics = RouterMetrics {
            arena_score: round1(record.arena_score),
            optimal_selection_score: round1_opt(record.optimal_selection_score),
            optimal_cost_score: round1_opt(record.optimal_cost_score),
            optimal_acc_score: round1_opt(record.optimal_acc_score),
            robustness_score: round1_opt(record.robustness_score),
            latency_score: round1_opt(record.latency_score),
            accuracy: round1(record.accuracy),
            cost_per_1k: record.cost_per_1k,
            overall_rank: 0,
        };
        averages.push(metrics.average_score());

        routers.push(Router {
            id,
            name: meta.name,
            router_type: meta.router_type,
            affiliation: meta.affiliation,
            description: meta.description,
            model_pool: meta.model_pool,
            website_url: meta.website_url,
            paper_url: meta.paper_url,
            github_url: meta.github_url,
            huggingface_url: meta.huggingface_url,
            metrics,
        });
    }

    // Stable sort keeps input order on ties, so ranks stay deterministic.
    let mut order: Vec<usize> = (0..routers.len()).collect();
    order.sort_by(|&a, &b| averages[b].total_cmp(&averages[a]));

    let mut ranked = Vec::with_capacity(routers.len());
    let mut routers: Vec<Option<Router>> = routers.into_iter().map(Some).collect();
    for (rank, &idx) in order.iter().enumerate() {
        let mut router = routers[idx].take().expect("each index appears once in the sort order");
        router.metrics.overall_rank = rank + 1;
        ranked.push(router);
    }

    Ok(ranked)
}

/// Leaderboard ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardSort {
    /// Ascending by overall rank
    #[default]
    Overall,
    Arena,
    Cost,
    Optimal,
    Latency,
    Robustness,
}

/// Filter and ordering applied to the ranked catalog
#[derive(Debug, Clone, Default)]
pub struct LeaderboardQuery {
    /// Case-insensitive match against name or description
    pub search: Option<String>,
    pub router_type: Option<RouterType>,
    pub sort: LeaderboardSort,
}

impl LeaderboardQuery {
    /// Apply the filter and ordering, returning references in display order.
    /// Routers whose sort score is null go last, never coerced to zero.
    pub fn apply<'a>(&self, routers: &'a [Router]) -> Vec<&'a Router> {
        let term = self.search.as_deref().map(str::to_lowercase);
        let mut filtered: Vec<&Router> = routers
            .iter()
            .filter(|r| {
                let matches_search = term.as_deref().map_or(true, |t| {
                    r.name.to_lowercase().contains(t) || r.description.to_lowercase().contains(t)
                });
                let matches_type = self.router_type.map_or(true, |t| r.router_type == t);
                matches_search && matches_type
            })
            .collect();

        match self.sort {
            LeaderboardSort::Overall => {
                filtered.sort_by_key(|r| r.metrics.overall_rank);
            }
            sort => {
                let key = |r: &Router| -> Option<f64> {
                    match sort {
                        LeaderboardSort::Arena => Some(r.metrics.arena_score),
                        LeaderboardSort::Cost => r.metrics.optimal_cost_score,
                        LeaderboardSort::Optimal => r.metrics.optimal_acc_score,
                        LeaderboardSort::Latency => r.metrics.latency_score,
                        LeaderboardSort::Robustness => r.metrics.robustness_score,
                        LeaderboardSort::Overall => unreachable!(),
                    }
                };
                filtered.sort_by(|a, b| match (key(a), key(b)) {
                    (Some(x), Some(y)) => y.total_cmp(&x),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                });
            }
        }

        filtered
    }
}
