/// Report generation for the router leaderboard
use crate::types::Router;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Leaderboard report data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardReport {
    pub title: String,
    pub routers: Vec<Router>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

impl LeaderboardReport {
    pub fn new(title: String, routers: Vec<Router>) -> Self {
        Self {
            title,
            routers,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Generate Markdown report
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {}\n\n", self.title));
        md.push_str(&format!(
            "**Generated:** {}\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("| Rank | Router | Type | Affiliation | Arena | Accuracy | Cost/1k | Robustness | Latency |\n");
        md.push_str("|------|--------|------|-------------|-------|----------|---------|------------|--------|\n");
        for router in &self.routers {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {:.1} | {:.1} | ${:.2} | {} | {} |\n",
                router.metrics.overall_rank,
                router.name,
                router.router_type,
                router.affiliation,
                router.metrics.arena_score,
                router.metrics.accuracy,
                router.metrics.cost_per_1k,
                fmt_opt(router.metrics.robustness_score),
                fmt_opt(router.metrics.latency_score),
            ));
        }
        md.push('\n');

        md
    }

    /// Generate JSON report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate plain text report
    pub fn to_text(&self) -> String {
        let mut text = String::new();

        text.push_str(&format!("{}\n", self.title.to_uppercase()));
        text.push_str(&format!(
            "Generated: {}\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        text.push_str(&format!(
            "{:<5} {:<20} {:<14} {:<16} {:>7} {:>9} {:>9} {:>11} {:>8}\n",
            "Rank", "Router", "Type", "Affiliation", "Arena", "Accuracy", "Cost/1k", "Robustness", "Latency"
        ));
        text.push_str(&format!("{}\n", "-".repeat(104)));

        for router in &self.routers {
            text.push_str(&format!(
                "{:<5} {:<20} {:<14} {:<16} {:>7.1} {:>9.1} {:>9} {:>11} {:>8}\n",
                router.metrics.overall_rank,
                router.name,
                router.router_type.to_string(),
                router.affiliation,
                router.metrics.arena_score,
                router.metrics.accuracy,
                format!("${:.2}", router.metrics.cost_per_1k),
                fmt_opt(router.metrics.robustness_score),
                fmt_opt(router.metrics.latency_score),
            ));
        }

        text
    }

    /// Write the report to a file in the given format
    pub fn save(&self, path: &Path, format: ReportFormat) -> Result<()> {
        let content = match format {
            ReportFormat::Markdown => self.to_markdown(),
            ReportFormat::Json => self.to_json()?,
            ReportFormat::Text => self.to_text(),
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Markdown,
    Json,
}
