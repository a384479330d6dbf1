// Library exports for the router-arena comparison engine
pub mod catalog;
pub mod cli;
pub mod compare;
pub mod loader;
pub mod projector;
pub mod report;
pub mod score;
pub mod selection;
pub mod types;

// Re-export key types for convenience
pub use catalog::{build_catalog, CatalogError, LeaderboardQuery, LeaderboardSort};
pub use compare::{CompareIndex, PRIORITY_AXIS_LABEL};
pub use loader::ArenaData;
pub use projector::{project_bars, project_deferral, project_radar, DeferralSeries};
pub use report::{LeaderboardReport, ReportFormat};
pub use score::{arena_score, cost_efficiency, CostWeight};
pub use selection::{reduce, SelectionEvent, SelectionState, MAX_SELECTED_ROUTERS};
pub use types::{
    ChartView, CompareMetric, Difficulty, Provenance, Router, RouterCompareEntry, RouterMetrics,
    RouterType,
};
