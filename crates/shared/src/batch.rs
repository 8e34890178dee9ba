//! Batch definitions: the hand-curated ID lists a run works through.
//!
//! A batch file is TOML with one optional section per job:
//!
//! ```toml
//! [typed]
//! originals = [54914, 55894]
//! adaptations = [{ anime = 54041, manga = 134631 }]
//! sequels = [{ anime = 54803, prequel = 36934, relation = "sequel", season = 2 }]
//!
//! [season]
//! add_ids = [52293]
//! remove_ids = [53065]
//!
//! [watchlist]
//! name = "Fall_2024"
//! ids = [59131, 56967]
//! picked = ["Ao no Hako"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relation label used when a sequel entry does not name one
pub const UNKNOWN_RELATION: &str = "unknown";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub typed: Option<TypedBatch>,
    #[serde(default)]
    pub season: Option<SeasonBatch>,
    #[serde(default)]
    pub watchlist: Option<WatchlistBatch>,
}

/// Originals, adaptations and sequels of one FAL season
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedBatch {
    pub originals: Vec<u32>,
    pub adaptations: Vec<AdaptationSpec>,
    /// Adaptations whose source is a light novel; rendered on their own sheet
    pub light_novels: Vec<AdaptationSpec>,
    pub sequels: Vec<SequelSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationSpec {
    pub anime: u32,
    pub manga: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequelSpec {
    pub anime: u32,
    pub prequel: u32,
    #[serde(default = "unknown_relation")]
    pub relation: String,
    #[serde(default)]
    pub season: Option<f64>,
    /// Source manga, when the sequel is itself an adaptation
    #[serde(default)]
    pub manga: Option<u32>,
}

fn unknown_relation() -> String {
    UNKNOWN_RELATION.to_string()
}

/// Adjustments to the seasonal listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonBatch {
    /// Shows to include although MAL does not list them for the season
    pub add_ids: Vec<u32>,
    /// Listed shows to leave out
    pub remove_ids: Vec<u32>,
    /// Tag the output file as a FAL workbook
    pub fal: bool,
}

/// Watch-status tracking of a fixed list of shows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistBatch {
    /// Label embedded in the output file name
    pub name: String,
    pub ids: Vec<u32>,
    /// Titles to highlight in bold
    pub picked: Vec<String>,
}

impl Batch {
    /// Load a batch from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file: {}", path.display()))?;

        let batch: Batch = toml::from_str(&content)
            .with_context(|| format!("Failed to parse batch file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            typed = batch.typed.is_some(),
            season = batch.season.is_some(),
            watchlist = batch.watchlist.is_some(),
            "Batch loaded"
        );

        Ok(batch)
    }
}

impl TypedBatch {
    pub fn total(&self) -> usize {
        self.originals.len() + self.adaptations.len() + self.light_novels.len() + self.sequels.len()
    }
}
