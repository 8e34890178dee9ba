//! Catalog record model.
//!
//! Raw MAL API records are adapted into immutable entries here. An entry is
//! a base [`Anime`] with optional extensions: the manga it adapts and the
//! prequel it continues.

use crate::error::{MetricError, ModelError};
use crate::metrics::{self, CatalogSnapshot};
use crate::record;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rating of an anime nobody has scored yet
pub const UNRATED: f64 = -1.0;

/// One anime from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    id: u32,
    title: String,
    favorites: u64,
    plan_to_watch: u64,
    watching: u64,
    completed: u64,
    dropped: u64,
    rating: f64,
    source: Option<String>,
}

impl Anime {
    /// Build an anime from a raw `/anime/{id}` record
    pub fn from_record(record: &Value) -> Result<Self, ModelError> {
        Ok(Self {
            id: record::require_id(record, "id")?,
            title: record::require_text(record, "title")?,
            favorites: record::require_count(record, "num_favorites")?,
            plan_to_watch: record::require_count(record, "statistics.status.plan_to_watch")?,
            watching: record::require_count(record, "statistics.status.watching")?,
            completed: record::require_count(record, "statistics.status.completed")?,
            dropped: record::require_count(record, "statistics.status.dropped")?,
            rating: record::score_or(record, "mean", UNRATED),
            source: record::optional_text(record, "source"),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn favorites(&self) -> u64 {
        self.favorites
    }

    pub fn plan_to_watch(&self) -> u64 {
        self.plan_to_watch
    }

    pub fn watching(&self) -> u64 {
        self.watching
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Mean score, or [`UNRATED`]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Provenance tag (`original`, `manga`, `light_novel`, `game`, ...)
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn favorites_per_hundred_planned(&self) -> Result<f64, MetricError> {
        metrics::favorites_per_hundred_planned(self.favorites, self.plan_to_watch)
    }

    pub fn drop_rate(&self) -> f64 {
        metrics::drop_rate(self.dropped, self.completed, self.watching)
    }

    pub fn link(&self) -> String {
        metrics::anime_url(self.id)
    }
}

impl std::fmt::Display for Anime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// The manga an anime adapts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adaptation {
    manga_id: u32,
    manga_favorites: u64,
    manga_score: f64,
    manga_list_users: u64,
    manga_rank: u32,
    manga_type: String,
}

impl Adaptation {
    /// Build from a raw `/manga/{id}` record.
    ///
    /// An unscored manga gets a score of 0, not [`UNRATED`].
    pub fn from_record(record: &Value) -> Result<Self, ModelError> {
        Ok(Self {
            manga_id: record::require_id(record, "id")?,
            manga_favorites: record::require_count(record, "num_favorites")?,
            manga_score: record::score_or(record, "mean", 0.0),
            manga_list_users: record::require_count(record, "num_list_users")?,
            manga_rank: record::require_rank(record, "rank")?,
            manga_type: record::require_text(record, "media_type")?,
        })
    }

    pub fn manga_id(&self) -> u32 {
        self.manga_id
    }

    pub fn manga_favorites(&self) -> u64 {
        self.manga_favorites
    }

    pub fn manga_score(&self) -> f64 {
        self.manga_score
    }

    pub fn manga_list_users(&self) -> u64 {
        self.manga_list_users
    }

    pub fn manga_rank(&self) -> u32 {
        self.manga_rank
    }

    pub fn manga_type(&self) -> &str {
        &self.manga_type
    }

    pub fn percentile(&self, snapshot: CatalogSnapshot) -> f64 {
        metrics::manga_percentile(self.manga_score, self.manga_rank, snapshot)
    }

    pub fn favorite_to_list_ratio(&self) -> Result<f64, MetricError> {
        metrics::favorite_to_list_ratio(self.manga_favorites, self.manga_list_users)
    }

    pub fn link(&self) -> String {
        metrics::manga_url(self.manga_id)
    }
}

/// The earlier work an anime continues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequel {
    prequel: Anime,
    relation: String,
    season: Option<f64>,
}

impl Sequel {
    pub fn prequel(&self) -> &Anime {
        &self.prequel
    }

    /// Free-text relation (`sequel`, `part 2`, `spin-off`, ...)
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Season ordinal; split seasons are fractional (2.5)
    pub fn season(&self) -> Option<f64> {
        self.season
    }
}

/// Which extensions an entry carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Plain,
    Adaptation,
    Sequel,
    AdaptedSequel,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Plain => write!(f, "plain"),
            EntryKind::Adaptation => write!(f, "adaptation"),
            EntryKind::Sequel => write!(f, "sequel"),
            EntryKind::AdaptedSequel => write!(f, "adapted_sequel"),
        }
    }
}

/// An anime plus whatever related records were fetched with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    anime: Anime,
    adaptation: Option<Adaptation>,
    sequel: Option<Sequel>,
}

impl CatalogEntry {
    pub fn plain(anime_record: &Value) -> Result<Self, ModelError> {
        Ok(Self {
            anime: Anime::from_record(anime_record)?,
            adaptation: None,
            sequel: None,
        })
    }

    pub fn adaptation(anime_record: &Value, manga_record: &Value) -> Result<Self, ModelError> {
        Ok(Self {
            anime: Anime::from_record(anime_record)?,
            adaptation: Some(Adaptation::from_record(manga_record)?),
            sequel: None,
        })
    }

    /// The two records are not checked against each other.
    pub fn sequel(
        anime_record: &Value,
        prequel_record: &Value,
        relation: impl Into<String>,
        season: Option<f64>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            anime: Anime::from_record(anime_record)?,
            adaptation: None,
            sequel: Some(Sequel {
                prequel: Anime::from_record(prequel_record)?,
                relation: relation.into(),
                season,
            }),
        })
    }

    pub fn adapted_sequel(
        anime_record: &Value,
        manga_record: &Value,
        prequel_record: &Value,
        relation: impl Into<String>,
        season: Option<f64>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            anime: Anime::from_record(anime_record)?,
            adaptation: Some(Adaptation::from_record(manga_record)?),
            sequel: Some(Sequel {
                prequel: Anime::from_record(prequel_record)?,
                relation: relation.into(),
                season,
            }),
        })
    }

    pub fn anime(&self) -> &Anime {
        &self.anime
    }

    pub fn adaptation_info(&self) -> Option<&Adaptation> {
        self.adaptation.as_ref()
    }

    pub fn sequel_info(&self) -> Option<&Sequel> {
        self.sequel.as_ref()
    }

    pub fn kind(&self) -> EntryKind {
        match (&self.adaptation, &self.sequel) {
            (None, None) => EntryKind::Plain,
            (Some(_), None) => EntryKind::Adaptation,
            (None, Some(_)) => EntryKind::Sequel,
            (Some(_), Some(_)) => EntryKind::AdaptedSequel,
        }
    }

    /// Manga percentile, or `None` for entries without an adaptation
    pub fn manga_percentile(&self, snapshot: CatalogSnapshot) -> Option<f64> {
        self.adaptation.as_ref().map(|a| a.percentile(snapshot))
    }
}

/// Broadcast season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// The season following `date`, with the year it airs in.
    ///
    /// February to April map to spring, May to July to summer, August to
    /// October to fall and November to January to winter. Winter is
    /// labelled with the year its January falls in.
    pub fn upcoming(date: NaiveDate) -> (Season, i32) {
        match date.month() {
            2..=4 => (Season::Spring, date.year()),
            5..=7 => (Season::Summer, date.year()),
            8..=10 => (Season::Fall, date.year()),
            11 | 12 => (Season::Winter, date.year() + 1),
            _ => (Season::Winter, date.year()),
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Winter => write!(f, "winter"),
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Fall => write!(f, "fall"),
        }
    }
}

impl std::str::FromStr for Season {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            _ => Err(anyhow::anyhow!("Invalid season: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn anime_record() -> Value {
        json!({
            "id": 100,
            "title": "T",
            "num_favorites": 500,
            "statistics": {
                "status": {
                    "plan_to_watch": 1000,
                    "watching": 10,
                    "completed": 5,
                    "dropped": 2
                }
            }
        })
    }

    fn manga_record() -> Value {
        json!({
            "id": 200,
            "num_favorites": 50,
            "mean": 8.0,
            "num_list_users": 2000,
            "rank": 5,
            "media_type": "manga"
        })
    }

    #[test]
    fn test_anime_from_record() {
        let anime = Anime::from_record(&anime_record()).unwrap();
        assert_eq!(anime.id(), 100);
        assert_eq!(anime.title(), "T");
        assert_eq!(anime.favorites(), 500);
        assert_eq!(anime.plan_to_watch(), 1000);
        assert_eq!(anime.watching(), 10);
        assert_eq!(anime.completed(), 5);
        assert_eq!(anime.dropped(), 2);
        assert_eq!(anime.source(), None);
        assert_eq!(anime.link(), "https://myanimelist.net/anime/100");
        assert_eq!(anime.to_string(), "T");
    }

    #[test]
    fn test_rating_sentinel() {
        let unrated = Anime::from_record(&anime_record()).unwrap();
        assert_eq!(unrated.rating(), UNRATED);

        let mut record = anime_record();
        record["mean"] = json!(7.2);
        let rated = Anime::from_record(&record).unwrap();
        assert_eq!(rated.rating(), 7.2);
    }

    #[test]
    fn test_string_status_counts() {
        let mut record = anime_record();
        record["statistics"]["status"]["plan_to_watch"] = json!("1234");
        let anime = Anime::from_record(&record).unwrap();
        assert_eq!(anime.plan_to_watch(), 1234);
    }

    #[test]
    fn test_drop_rate_with_huge_string_counts() {
        let mut record = anime_record();
        record["statistics"]["status"]["watching"] = json!("18446744073709551615");
        record["statistics"]["status"]["completed"] = json!("1");
        let anime = Anime::from_record(&record).unwrap();

        assert_eq!(anime.watching(), u64::MAX);
        let rate = anime.drop_rate();
        assert!(rate >= 0.0 && rate < 1e-9);
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut record = anime_record();
        record["statistics"]["status"]
            .as_object_mut()
            .unwrap()
            .remove("dropped");
        assert_eq!(
            Anime::from_record(&record),
            Err(ModelError::missing("statistics.status.dropped"))
        );

        let mut record = anime_record();
        record.as_object_mut().unwrap().remove("title");
        assert_eq!(Anime::from_record(&record), Err(ModelError::missing("title")));
    }

    #[test]
    fn test_adaptation_round_trip() {
        let snapshot = CatalogSnapshot { total_manga: 19062 };
        let entry = CatalogEntry::adaptation(&anime_record(), &manga_record()).unwrap();
        assert_eq!(entry.kind(), EntryKind::Adaptation);

        let anime = entry.anime();
        assert_eq!(anime.favorites_per_hundred_planned().unwrap(), 50.0);

        let adaptation = entry.adaptation_info().unwrap();
        let expected = (1.0 - 5.0 / 19062.0) * 100.0;
        assert!((adaptation.percentile(snapshot) - expected).abs() < 1e-3);
        assert!((adaptation.percentile(snapshot) - 99.9738).abs() < 1e-3);
        assert!((adaptation.favorite_to_list_ratio().unwrap() - 2.5).abs() < 1e-9);
        assert_eq!(adaptation.manga_type(), "manga");
        assert_eq!(adaptation.link(), "https://myanimelist.net/manga/200");
        assert_eq!(entry.manga_percentile(snapshot), Some(adaptation.percentile(snapshot)));
    }

    #[test]
    fn test_unscored_manga_falls_back_to_zero() {
        let mut manga = manga_record();
        manga.as_object_mut().unwrap().remove("mean");
        let adaptation = Adaptation::from_record(&manga).unwrap();
        assert_eq!(adaptation.manga_score(), 0.0);
        assert_eq!(adaptation.percentile(CatalogSnapshot::default()), -1.0);
    }

    #[test]
    fn test_adaptation_requires_rank_and_list_users() {
        let mut manga = manga_record();
        manga.as_object_mut().unwrap().remove("rank");
        assert_eq!(
            CatalogEntry::adaptation(&anime_record(), &manga),
            Err(ModelError::missing("rank"))
        );

        let mut manga = manga_record();
        manga.as_object_mut().unwrap().remove("num_list_users");
        assert_eq!(
            Adaptation::from_record(&manga),
            Err(ModelError::missing("num_list_users"))
        );
    }

    #[test]
    fn test_sequel_owns_prequel_snapshot() {
        let mut prequel = anime_record();
        prequel["id"] = json!(99);
        prequel["title"] = json!("Prequel");

        let entry = CatalogEntry::sequel(&anime_record(), &prequel, "part 2", Some(2.5)).unwrap();

        prequel["title"] = json!("Changed");
        prequel["statistics"]["status"]["completed"] = json!(999_999);

        let sequel = entry.sequel_info().unwrap();
        assert_eq!(entry.kind(), EntryKind::Sequel);
        assert_eq!(sequel.prequel().title(), "Prequel");
        assert_eq!(sequel.prequel().completed(), 5);
        assert_eq!(sequel.relation(), "part 2");
        assert_eq!(sequel.season(), Some(2.5));
    }

    #[test]
    fn test_sequel_does_not_validate_link() {
        let entry = CatalogEntry::sequel(&anime_record(), &anime_record(), "sequel", None).unwrap();
        assert_eq!(entry.anime().id(), entry.sequel_info().unwrap().prequel().id());
    }

    #[test]
    fn test_adapted_sequel_has_both_extensions() {
        let mut prequel = anime_record();
        prequel["id"] = json!(99);
        let entry =
            CatalogEntry::adapted_sequel(&anime_record(), &manga_record(), &prequel, "sequel", Some(2.0))
                .unwrap();
        assert_eq!(entry.kind(), EntryKind::AdaptedSequel);
        assert_eq!(entry.adaptation_info().unwrap().manga_id(), 200);
        assert_eq!(entry.sequel_info().unwrap().prequel().id(), 99);
    }

    #[test]
    fn test_plain_entry() {
        let entry = CatalogEntry::plain(&anime_record()).unwrap();
        assert_eq!(entry.kind(), EntryKind::Plain);
        assert_eq!(entry.manga_percentile(CatalogSnapshot::default()), None);
        assert_eq!(entry.kind().to_string(), "plain");
    }

    #[test]
    fn test_upcoming_season() {
        let date = |m| NaiveDate::from_ymd_opt(2024, m, 15).unwrap();
        assert_eq!(Season::upcoming(date(1)), (Season::Winter, 2024));
        for m in 2..=4 {
            assert_eq!(Season::upcoming(date(m)), (Season::Spring, 2024));
        }
        for m in 5..=7 {
            assert_eq!(Season::upcoming(date(m)), (Season::Summer, 2024));
        }
        for m in 8..=10 {
            assert_eq!(Season::upcoming(date(m)), (Season::Fall, 2024));
        }
        assert_eq!(Season::upcoming(date(11)), (Season::Winter, 2025));
        assert_eq!(Season::upcoming(date(12)), (Season::Winter, 2025));
    }

    #[test]
    fn test_season_parse_and_display() {
        assert_eq!("Fall".parse::<Season>().unwrap(), Season::Fall);
        assert_eq!("winter".parse::<Season>().unwrap().to_string(), "winter");
        assert!("monsoon".parse::<Season>().is_err());
    }
}
