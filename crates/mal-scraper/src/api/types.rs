//! MAL API v2 response types.
//!
//! Detail endpoints are consumed as raw JSON and adapted by the catalog
//! model; only the listing and relation shapes are typed here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields requested for every anime detail call
pub const ANIME_FIELDS: &str = "mean,num_favorites,statistics,source,related_anime,media_type";

/// Fields requested for every manga detail call
pub const MANGA_FIELDS: &str = "mean,num_favorites,num_list_users,rank,media_type";

/// `/anime/season/{year}/{season}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonListResponse {
    pub data: Vec<SeasonListEntry>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonListEntry {
    pub node: NodeRef,
}

/// Minimal reference to a catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: u32,
    pub title: String,
}

/// Pagination links. Only the first page of a listing is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

impl SeasonListResponse {
    /// URL of the next page, if MAL truncated the listing
    pub fn next_page(&self) -> Option<&str> {
        self.paging.as_ref()?.next.as_deref()
    }
}

/// One entry of an anime's `related_anime` list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedAnimeEdge {
    pub node: NodeRef,
    pub relation_type: String,
}

/// Error body returned by the MAL API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalError {
    pub error: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// First related anime of a raw anime record.
///
/// MAL lists the closest relation first, which for a sequel is its prequel.
pub fn related_prequel(record: &Value) -> Option<RelatedAnimeEdge> {
    let first = record.get("related_anime")?.as_array()?.first()?;
    serde_json::from_value(first.clone()).ok()
}

/// `media_type` of a raw record (`tv`, `movie`, `ona`, `manga`, ...)
pub fn media_type(record: &Value) -> Option<&str> {
    record.get("media_type").and_then(Value::as_str)
}
