//! Derived metrics over catalog entries.
//!
//! Every ratio rendered into a report is computed here and nowhere else.
//! All functions are pure.

use crate::error::MetricError;
use serde::{Deserialize, Serialize};

/// Public MyAnimeList site root used for canonical links
pub const CATALOG_HOST: &str = "https://myanimelist.net";

/// Sentinel returned by [`manga_percentile`] for an unscored manga, or one
/// ranked outside the snapshot
pub const NO_PERCENTILE: f64 = -1.0;

/// Manga catalog size at the time a snapshot of rankings was taken.
///
/// Percentiles are only comparable between entries computed against the
/// same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub total_manga: u32,
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self { total_manga: 19062 }
    }
}

/// `favorites / plan_to_watch * 100`.
///
/// Fails when nobody has the anime planned. Callers decide how to render
/// that case.
pub fn favorites_per_hundred_planned(favorites: u64, plan_to_watch: u64) -> Result<f64, MetricError> {
    if plan_to_watch == 0 {
        return Err(MetricError::DivisionByZero {
            metric: "favorites_per_hundred_planned",
        });
    }
    Ok(favorites as f64 / plan_to_watch as f64 * 100.0)
}

/// `dropped / (dropped + completed + watching) * 100`, or 0 when nobody
/// has started the anime.
pub fn drop_rate(dropped: u64, completed: u64, watching: u64) -> f64 {
    let total = dropped as f64 + completed as f64 + watching as f64;
    if total == 0.0 {
        return 0.0;
    }
    dropped as f64 / total * 100.0
}

/// Percentile of a manga's popularity rank within the catalog snapshot.
///
/// A non-positive score means the manga is unscored and yields
/// [`NO_PERCENTILE`]. So does a rank past the end of the snapshot, which
/// happens once the live catalog outgrows the configured size.
pub fn manga_percentile(score: f64, rank: u32, snapshot: CatalogSnapshot) -> f64 {
    if score <= 0.0 || snapshot.total_manga == 0 || rank > snapshot.total_manga {
        return NO_PERCENTILE;
    }
    (1.0 - f64::from(rank) / f64::from(snapshot.total_manga)) * 100.0
}

/// `source_favorites / list_users * 100`
pub fn favorite_to_list_ratio(source_favorites: u64, list_users: u64) -> Result<f64, MetricError> {
    if list_users == 0 {
        return Err(MetricError::DivisionByZero {
            metric: "favorite_to_list_ratio",
        });
    }
    Ok(source_favorites as f64 / list_users as f64 * 100.0)
}

pub fn anime_url(id: u32) -> String {
    format!("{}/anime/{}", CATALOG_HOST, id)
}

pub fn manga_url(id: u32) -> String {
    format!("{}/manga/{}", CATALOG_HOST, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_favorites_per_hundred_planned() {
        for (favorites, planned) in [(500, 1000), (1, 3), (0, 7), (12345, 678)] {
            let expected = favorites as f64 / planned as f64 * 100.0;
            let actual = favorites_per_hundred_planned(favorites, planned).unwrap();
            assert!((actual - expected).abs() < EPSILON);
        }
    }

    #[test]
    fn test_favorites_per_hundred_planned_zero_planned() {
        assert_eq!(
            favorites_per_hundred_planned(10, 0),
            Err(MetricError::DivisionByZero {
                metric: "favorites_per_hundred_planned"
            })
        );
    }

    #[test]
    fn test_drop_rate() {
        assert_eq!(drop_rate(0, 0, 0), 0.0);
        assert!((drop_rate(10, 70, 20) - 10.0).abs() < EPSILON);
        assert!((drop_rate(5, 0, 0) - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_drop_rate_huge_counts() {
        let rate = drop_rate(0, 1, u64::MAX);
        assert_eq!(rate, 0.0);
        assert!((drop_rate(u64::MAX, u64::MAX, 0) - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_manga_percentile_rank_outside_snapshot() {
        let snapshot = CatalogSnapshot::default();
        assert_eq!(manga_percentile(8.0, 40000, snapshot), NO_PERCENTILE);
        assert_eq!(manga_percentile(8.0, 19063, snapshot), NO_PERCENTILE);
        assert_eq!(manga_percentile(8.0, 19062, snapshot), 0.0);
        assert_eq!(manga_percentile(8.0, 1, CatalogSnapshot { total_manga: 0 }), NO_PERCENTILE);
    }

    #[test]
    fn test_manga_percentile_unscored() {
        let snapshot = CatalogSnapshot::default();
        assert_eq!(manga_percentile(0.0, 1, snapshot), NO_PERCENTILE);
        assert_eq!(manga_percentile(0.0, 19000, snapshot), NO_PERCENTILE);
    }

    #[test]
    fn test_manga_percentile_top_rank() {
        let snapshot = CatalogSnapshot { total_manga: 19062 };
        let percentile = manga_percentile(7.5, 1, snapshot);
        assert!((percentile - 99.9948).abs() < 1e-3);
    }

    #[test]
    fn test_manga_percentile_depends_on_snapshot() {
        let older = CatalogSnapshot { total_manga: 18071 };
        let newer = CatalogSnapshot { total_manga: 19062 };
        assert!(manga_percentile(8.0, 500, older) < manga_percentile(8.0, 500, newer));
    }

    #[test]
    fn test_favorite_to_list_ratio() {
        assert!((favorite_to_list_ratio(50, 2000).unwrap() - 2.5).abs() < EPSILON);
        assert!(favorite_to_list_ratio(50, 0).is_err());
    }

    #[test]
    fn test_canonical_links() {
        assert_eq!(anime_url(52991), "https://myanimelist.net/anime/52991");
        assert_eq!(manga_url(2), "https://myanimelist.net/manga/2");
    }
}
