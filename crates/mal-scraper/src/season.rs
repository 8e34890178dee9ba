//! Season discovery.
//!
//! Lists every anime MAL files under a broadcast season, applies the batch's
//! manual additions and removals, and keeps the TV series.

use crate::api::{media_type, related_prequel, MalClient, RelatedAnimeEdge, ANIME_FIELDS};
use anyhow::{Context, Result};
use serde_json::Value;
use shared::{Anime, ModelError, Season};
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Only TV series are tracked; movies, ONAs and specials are skipped
const TRACKED_MEDIA_TYPE: &str = "tv";

/// An anime of the season with its closest relation, if any
#[derive(Debug, Clone)]
pub struct SeasonalShow {
    pub anime: Anime,
    pub prequel: Option<RelatedAnimeEdge>,
}

/// Outcome of a season discovery run
#[derive(Debug, Clone, Default)]
pub struct DiscoveryStats {
    pub listed: usize,
    pub removed: usize,
    pub added: usize,
    pub skipped_media_type: usize,
    pub errors: usize,
}

/// Discovery manager for seasonal listings
pub struct SeasonDiscovery<'a> {
    client: &'a MalClient,
    limit: u32,
}

impl<'a> SeasonDiscovery<'a> {
    /// Create a new discovery manager
    pub fn new(client: &'a MalClient, limit: u32) -> Self {
        Self { client, limit }
    }

    /// Fetch all TV shows of a season
    pub async fn fetch(
        &self,
        year: i32,
        season: Season,
        add_ids: &[u32],
        remove_ids: &[u32],
    ) -> Result<(Vec<SeasonalShow>, DiscoveryStats)> {
        info!(year = year, season = %season, "Starting season discovery");

        let listing = self
            .client
            .get_season(year, season, self.limit)
            .await
            .with_context(|| format!("Failed to list {} {}", season, year))?;

        if let Some(next) = listing.next_page() {
            warn!(limit = self.limit, next = %next, "Season listing truncated, later pages are ignored");
        }

        let mut stats = DiscoveryStats {
            listed: listing.data.len(),
            added: add_ids.len(),
            ..Default::default()
        };

        let listed: Vec<u32> = listing.data.iter().map(|entry| entry.node.id).collect();
        let ids = select_ids(&listed, add_ids, remove_ids);
        stats.removed = listed.iter().filter(|id| remove_ids.contains(id)).count();

        info!(
            listed = stats.listed,
            added = stats.added,
            removed = stats.removed,
            "Season listing fetched"
        );

        let mut shows = Vec::with_capacity(ids.len());
        for (idx, mal_id) in ids.iter().enumerate() {
            info!(
                progress = format!("{}/{}", idx + 1, ids.len()),
                mal_id = mal_id,
                "Fetching seasonal anime"
            );

            let record = match self.client.get_anime(*mal_id, ANIME_FIELDS).await {
                Ok(record) => record,
                Err(e) => {
                    error!(mal_id = mal_id, error = %e, "Failed to fetch anime");
                    stats.errors += 1;
                    continue;
                }
            };

            match seasonal_show(&record) {
                None => stats.skipped_media_type += 1,
                Some(Ok(show)) => shows.push(show),
                Some(Err(e)) => {
                    warn!(mal_id = mal_id, error = %e, "Malformed anime record");
                    stats.errors += 1;
                }
            }
        }

        info!(
            shows = shows.len(),
            skipped_media_type = stats.skipped_media_type,
            errors = stats.errors,
            "Season discovery complete"
        );

        Ok((shows, stats))
    }
}

/// Adapt one fetched record. `None` means the record is not a TV series.
pub fn seasonal_show(record: &Value) -> Option<Result<SeasonalShow, ModelError>> {
    if media_type(record) != Some(TRACKED_MEDIA_TYPE) {
        return None;
    }

    Some(Anime::from_record(record).map(|anime| SeasonalShow {
        prequel: related_prequel(record),
        anime,
    }))
}

/// Listed ids minus `remove_ids`, followed by `add_ids`.
///
/// Listing order is kept; duplicates are dropped.
pub fn select_ids(listed: &[u32], add_ids: &[u32], remove_ids: &[u32]) -> Vec<u32> {
    let removed: HashSet<u32> = remove_ids.iter().copied().collect();
    let mut seen = HashSet::new();

    listed
        .iter()
        .filter(|id| !removed.contains(*id))
        .chain(add_ids.iter())
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}
