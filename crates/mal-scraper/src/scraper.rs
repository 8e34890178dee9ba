//! Main scraper orchestrator.
//!
//! Turns batch definitions into catalog entries, one sequential request at
//! a time, and lays them out as workbook sheets. A failed entry is logged,
//! counted and left out; the rest of the batch carries on.

use crate::api::{MalClient, ANIME_FIELDS, MANGA_FIELDS};
use crate::report::{self, Sheet};
use crate::season::SeasonDiscovery;
use anyhow::{Context, Result};
use serde_json::Value;
use shared::batch::{AdaptationSpec, SeasonBatch, SequelSpec, TypedBatch, WatchlistBatch};
use shared::{Anime, CatalogEntry, CatalogSnapshot, Season};
use tracing::{error, info};

/// Statistics for a scraping session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScraperStats {
    pub requested: usize,
    pub built: usize,
    pub errors: usize,
}

impl ScraperStats {
    /// Count one entity, logging it if it failed
    fn record<T>(&mut self, kind: &str, mal_id: u32, result: Result<T>) -> Option<T> {
        self.requested += 1;
        match result {
            Ok(value) => {
                self.built += 1;
                Some(value)
            }
            Err(e) => {
                error!(kind = kind, mal_id = mal_id, error = %format!("{:#}", e), "Failed to build entry");
                self.errors += 1;
                None
            }
        }
    }
}

/// Main scraper coordinator
pub struct MalScraper {
    client: MalClient,
    snapshot: CatalogSnapshot,
    season_limit: u32,
}

impl MalScraper {
    /// Create a new MAL scraper
    pub fn new(client: MalClient, snapshot: CatalogSnapshot, season_limit: u32) -> Self {
        Self {
            client,
            snapshot,
            season_limit,
        }
    }

    async fn anime_record(&self, anime_id: u32) -> Result<Value> {
        self.client
            .get_anime(anime_id, ANIME_FIELDS)
            .await
            .with_context(|| format!("Failed to fetch anime {}", anime_id))
    }

    async fn manga_record(&self, manga_id: u32) -> Result<Value> {
        self.client
            .get_manga(manga_id, MANGA_FIELDS)
            .await
            .with_context(|| format!("Failed to fetch manga {}", manga_id))
    }

    /// Fetch an anime with no extensions
    pub async fn plain(&self, anime_id: u32) -> Result<CatalogEntry> {
        let record = self.anime_record(anime_id).await?;
        CatalogEntry::plain(&record).with_context(|| format!("Malformed anime {}", anime_id))
    }

    /// Fetch an anime and the manga it adapts
    pub async fn adaptation(&self, spec: &AdaptationSpec) -> Result<CatalogEntry> {
        let anime = self.anime_record(spec.anime).await?;
        let manga = self.manga_record(spec.manga).await?;
        CatalogEntry::adaptation(&anime, &manga)
            .with_context(|| format!("Malformed adaptation {} <- manga {}", spec.anime, spec.manga))
    }

    /// Fetch a sequel and its prequel, plus the source manga if the batch
    /// names one
    pub async fn sequel(&self, spec: &SequelSpec) -> Result<CatalogEntry> {
        let anime = self.anime_record(spec.anime).await?;
        let prequel = self.anime_record(spec.prequel).await?;

        let entry = match spec.manga {
            Some(manga_id) => {
                let manga = self.manga_record(manga_id).await?;
                CatalogEntry::adapted_sequel(&anime, &manga, &prequel, spec.relation.as_str(), spec.season)
            }
            None => CatalogEntry::sequel(&anime, &prequel, spec.relation.as_str(), spec.season),
        };

        entry.with_context(|| format!("Malformed sequel {} <- prequel {}", spec.anime, spec.prequel))
    }

    /// Build the Originals / Adaptations / Light Novels / Sequels sheets
    pub async fn typed_report(&self, batch: &TypedBatch) -> (Vec<Sheet>, ScraperStats) {
        info!(
            originals = batch.originals.len(),
            adaptations = batch.adaptations.len(),
            light_novels = batch.light_novels.len(),
            sequels = batch.sequels.len(),
            "Starting typed report"
        );

        let mut stats = ScraperStats::default();

        let mut originals = Vec::with_capacity(batch.originals.len());
        for anime_id in &batch.originals {
            let result = self.plain(*anime_id).await;
            originals.extend(stats.record("original", *anime_id, result));
        }

        let mut adaptations = Vec::with_capacity(batch.adaptations.len());
        for spec in &batch.adaptations {
            let result = self.adaptation(spec).await;
            adaptations.extend(stats.record("adaptation", spec.anime, result));
        }

        let mut light_novels = Vec::with_capacity(batch.light_novels.len());
        for spec in &batch.light_novels {
            let result = self.adaptation(spec).await;
            light_novels.extend(stats.record("light_novel", spec.anime, result));
        }

        let mut sequels = Vec::with_capacity(batch.sequels.len());
        for spec in &batch.sequels {
            let result = self.sequel(spec).await;
            sequels.extend(stats.record("sequel", spec.anime, result));
        }

        let mut sheets = vec![
            report::originals::sheet(&originals),
            report::adaptations::sheet(report::adaptations::SHEET_NAME, &adaptations, self.snapshot),
        ];
        if !batch.light_novels.is_empty() {
            sheets.push(report::adaptations::sheet(
                report::adaptations::LIGHT_NOVEL_SHEET_NAME,
                &light_novels,
                self.snapshot,
            ));
        }
        sheets.push(report::sequels::sheet(&sequels));

        info!(
            requested = stats.requested,
            built = stats.built,
            errors = stats.errors,
            "Typed report complete"
        );

        (sheets, stats)
    }

    /// Build the sheet listing every TV show of a season
    pub async fn season_report(
        &self,
        year: i32,
        season: Season,
        batch: &SeasonBatch,
    ) -> Result<(Sheet, ScraperStats)> {
        let discovery = SeasonDiscovery::new(&self.client, self.season_limit);
        let (shows, discovery_stats) = discovery
            .fetch(year, season, &batch.add_ids, &batch.remove_ids)
            .await?;

        let stats = ScraperStats {
            requested: shows.len() + discovery_stats.errors,
            built: shows.len(),
            errors: discovery_stats.errors,
        };

        Ok((report::season::sheet(&shows), stats))
    }

    /// Build the watch-status sheet of a fixed list of shows
    pub async fn watchlist_report(&self, batch: &WatchlistBatch) -> (Sheet, ScraperStats) {
        info!(name = %batch.name, shows = batch.ids.len(), "Starting watchlist report");

        let mut stats = ScraperStats::default();
        let mut shows: Vec<Anime> = Vec::with_capacity(batch.ids.len());

        for anime_id in &batch.ids {
            let result = self.plain(*anime_id).await.map(|entry| entry.anime().clone());
            shows.extend(stats.record("watchlist", *anime_id, result));
        }

        (report::watchlist::sheet(&shows, &batch.picked), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_stats_record() {
        let mut stats = ScraperStats::default();

        assert_eq!(stats.record("original", 1, Ok(5)), Some(5));
        assert_eq!(stats.record::<u32>("original", 2, Err(anyhow!("404 Not Found"))), None);

        assert_eq!(
            stats,
            ScraperStats {
                requested: 2,
                built: 1,
                errors: 1
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_counts_errors() {
        let client = MalClient::new(
            "http://127.0.0.1:9".to_string(),
            "test-client-id",
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let scraper = MalScraper::new(client, CatalogSnapshot::default(), 500);

        let batch = TypedBatch {
            originals: vec![1, 2],
            adaptations: vec![AdaptationSpec { anime: 3, manga: 4 }],
            ..Default::default()
        };

        let (sheets, stats) = scraper.typed_report(&batch).await;
        assert_eq!(stats.requested, 3);
        assert_eq!(stats.errors, 3);

        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Originals", "Adaptations", "Sequels"]);
        assert!(sheets.iter().all(|s| s.rows.is_empty()));
    }
}
