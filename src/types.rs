use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether a router's implementation is publicly available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum RouterType {
    #[serde(rename = "open-source")]
    OpenSource,
    #[serde(rename = "closed-source")]
    ClosedSource,
}

impl std::fmt::Display for RouterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterType::OpenSource => write!(f, "open-source"),
            RouterType::ClosedSource => write!(f, "closed-source"),
        }
    }
}

/// Comparison metric shown in the compare charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompareMetric {
    Accuracy,
    Robustness,
    Cost,
}

impl CompareMetric {
    pub const ALL: [CompareMetric; 3] = [
        CompareMetric::Accuracy,
        CompareMetric::Robustness,
        CompareMetric::Cost,
    ];
}

impl std::fmt::Display for CompareMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareMetric::Accuracy => write!(f, "Accuracy"),
            CompareMetric::Robustness => write!(f, "Robustness"),
            CompareMetric::Cost => write!(f, "Cost"),
        }
    }
}

/// Query difficulty bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    All,
}

impl Difficulty {
    pub const ALL_LEVELS: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::All,
    ];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::All => write!(f, "All"),
        }
    }
}

/// Which chart the comparison view renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    Spider,
    Bars,
    Deferral,
}

impl std::fmt::Display for ChartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartView::Spider => write!(f, "spider"),
            ChartView::Bars => write!(f, "bars"),
            ChartView::Deferral => write!(f, "deferral"),
        }
    }
}

/// Per-router leaderboard metrics.
///
/// Optional fields mean "not evaluated" and are never coerced to zero;
/// every aggregation over them skips nulls explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterMetrics {
    pub arena_score: f64,
    pub optimal_selection_score: Option<f64>,
    pub optimal_cost_score: Option<f64>,
    pub optimal_acc_score: Option<f64>,
    pub robustness_score: Option<f64>,
    pub latency_score: Option<f64>,
    /// Accuracy in percent, 0-100
    pub accuracy: f64,
    /// USD per 1000 queries, > 0
    pub cost_per_1k: f64,
    /// 1-based dense rank, assigned in a second pass over the catalog
    pub overall_rank: usize,
}

impl RouterMetrics {
    /// Mean of all non-null score fields; arena score is always included.
    /// Internal ranking key only, not exposed as a metric.
    pub fn average_score(&self) -> f64 {
        let mut scores = vec![self.arena_score];
        for opt in [
            self.optimal_selection_score,
            self.optimal_cost_score,
            self.optimal_acc_score,
            self.robustness_score,
            self.latency_score,
        ] {
            if let Some(v) = opt {
                scores.push(v);
            }
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// A router under evaluation, joined from a raw leaderboard record and its
/// metadata entry. Immutable after construction except for `overall_rank`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Router {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub router_type: RouterType,
    pub affiliation: String,
    pub description: String,
    pub model_pool: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub huggingface_url: Option<String>,
    pub metrics: RouterMetrics,
}

/// Raw leaderboard record as published by the evaluation pipeline.
/// Field names match the source JSON exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLeaderboardRecord {
    #[serde(rename = "Router Name")]
    pub router_name: String,
    #[serde(rename = "Arena Score")]
    pub arena_score: f64,
    #[serde(rename = "Optimal Selection Score")]
    pub optimal_selection_score: Option<f64>,
    #[serde(rename = "Optimal Cost Score")]
    pub optimal_cost_score: Option<f64>,
    #[serde(rename = "Optimal Acc. Score")]
    pub optimal_acc_score: Option<f64>,
    #[serde(rename = "Robustness Score")]
    pub robustness_score: Option<f64>,
    #[serde(rename = "Latency Score")]
    pub latency_score: Option<f64>,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "Cost per 1k")]
    pub cost_per_1k: f64,
}

/// Router metadata entry, keyed by display name in `routers.yaml`.
/// Field keys are camelCase in the YAML source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub router_type: RouterType,
    pub description: String,
    pub affiliation: String,
    #[serde(default)]
    pub model_pool: Vec<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub paper_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub huggingface_url: Option<String>,
}

/// The three comparison metrics at one difficulty level, each in [0,100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    pub accuracy: f64,
    pub robustness: f64,
    pub cost: f64,
}

impl MetricBundle {
    pub fn value(&self, metric: CompareMetric) -> f64 {
        match metric {
            CompareMetric::Accuracy => self.accuracy,
            CompareMetric::Robustness => self.robustness,
            CompareMetric::Cost => self.cost,
        }
    }
}

/// Metric bundles for every difficulty level. All four levels are always
/// present for any entry that exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMetricMap {
    pub easy: MetricBundle,
    pub medium: MetricBundle,
    pub hard: MetricBundle,
    pub all: MetricBundle,
}

impl DifficultyMetricMap {
    pub fn get(&self, difficulty: Difficulty) -> &MetricBundle {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::All => &self.all,
        }
    }
}

/// A subcategory's metrics. Subcategories never nest further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareSubEntry {
    pub metrics: DifficultyMetricMap,
}

/// One category's metrics plus its optional subcategory breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareCategoryEntry {
    pub metrics: DifficultyMetricMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<IndexMap<String, CompareSubEntry>>,
}

/// Whether a compare entry was measured by the evaluation pipeline or
/// estimated from the router's top-level metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Measured,
    Estimated,
}

impl Provenance {
    fn measured() -> Provenance {
        Provenance::Measured
    }
}

/// Per-router comparison tree: overall metrics plus per-category entries.
/// Never mutated once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterCompareEntry {
    /// Root-level "overall" metrics. Absent for some measured routers,
    /// in which case consumers average across categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DifficultyMetricMap>,
    pub categories: IndexMap<String, CompareCategoryEntry>,
    #[serde(default = "Provenance::measured")]
    pub provenance: Provenance,
}

/// Summary of the evaluation dataset shown by the `info` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub total_queries: u64,
    pub domains: u32,
    pub categories: u32,
    pub difficulty_levels: Vec<String>,
    pub sources: Vec<String>,
}
