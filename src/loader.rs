//! Loading of the arena's inbound data files: leaderboard records (JSON),
//! router metadata (YAML), measured category scores (JSON), and the dataset
//! summary (JSON).

use crate::catalog::build_catalog;
use crate::compare::CompareIndex;
use crate::types::{
    DatasetInfo, RawLeaderboardRecord, Router, RouterCompareEntry, RouterMetadata,
};
use anyhow::Context;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const METADATA_FILE: &str = "routers.yaml";
pub const CATEGORY_SCORES_FILE: &str = "category_scores.json";
pub const DATASET_INFO_FILE: &str = "dataset_info.json";

/// Failure reading or parsing one of the data files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed YAML in {path}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, content: &str) -> Result<T, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the ordered raw leaderboard records
pub fn load_leaderboard(path: &Path) -> Result<Vec<RawLeaderboardRecord>, LoadError> {
    let content = read_file(path)?;
    let records: Vec<RawLeaderboardRecord> = parse_json(path, &content)?;
    info!(count = records.len(), path = %path.display(), "loaded leaderboard records");
    Ok(records)
}

/// Load the display-name-keyed router metadata map
pub fn load_metadata(path: &Path) -> Result<IndexMap<String, RouterMetadata>, LoadError> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load measured category scores, keyed by router display name
pub fn load_category_scores(
    path: &Path,
) -> Result<IndexMap<String, RouterCompareEntry>, LoadError> {
    let content = read_file(path)?;
    parse_json(path, &content)
}

/// Load the dataset summary
pub fn load_dataset_info(path: &Path) -> Result<DatasetInfo, LoadError> {
    let content = read_file(path)?;
    parse_json(path, &content)
}

/// Everything the presentation layer consumes, built once at load time
#[derive(Debug, Clone)]
pub struct ArenaData {
    pub routers: Vec<Router>,
    pub index: CompareIndex,
    pub dataset: Option<DatasetInfo>,
}

impl ArenaData {
    /// Load and assemble the arena from a data directory.
    ///
    /// `leaderboard.json` is required. Metadata, category scores, and the
    /// dataset summary are optional; missing files fall back to synthesized
    /// metadata and compare entries per the catalog/index rules.
    pub fn load(dir: &Path) -> anyhow::Result<ArenaData> {
        let records = load_leaderboard(&dir.join(LEADERBOARD_FILE))
            .context("loading leaderboard records")?;

        let metadata_path = dir.join(METADATA_FILE);
        let metadata = if metadata_path.exists() {
            load_metadata(&metadata_path).context("loading router metadata")?
        } else {
            warn!(path = %metadata_path.display(), "no metadata file, all routers get defaults");
            IndexMap::new()
        };

        let scores_path = dir.join(CATEGORY_SCORES_FILE);
        let measured = if scores_path.exists() {
            load_category_scores(&scores_path).context("loading category scores")?
        } else {
            warn!(path = %scores_path.display(), "no category scores, all entries synthesized");
            IndexMap::new()
        };

        let dataset_path = dir.join(DATASET_INFO_FILE);
        let dataset = if dataset_path.exists() {
            Some(load_dataset_info(&dataset_path).context("loading dataset info")?)
        } else {
            None
        };

        let routers = build_catalog(&records, &metadata).context("building router catalog")?;
        let index = CompareIndex::build(&routers, &measured);
        info!(
            routers = routers.len(),
            measured = measured.len(),
            "arena data assembled"
        );

        Ok(ArenaData {
            routers,
            index,
            dataset,
        })
    }

    pub fn router_by_id(&self, id: &str) -> Option<&Router> {
        self.routers.iter().find(|r| r.id == id)
    }
}
