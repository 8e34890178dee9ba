//! File path utilities for report outputs.
//!
//! Centralizes the naming of every file the binaries write so that runs
//! from different days never overwrite each other.

use crate::models::Season;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Timestamp format embedded in workbook names
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

/// File path manager for generated workbooks
#[derive(Debug, Clone)]
pub struct OutputPaths {
    root: PathBuf,
}

impl OutputPaths {
    /// Create a new OutputPaths with the given output directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory
    pub fn create_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create output directory: {}", self.root.display()))
    }

    /// Originals / adaptations / sequels workbook
    pub fn typed_report(&self, now: NaiveDateTime) -> PathBuf {
        self.root
            .join(format!("FAL_typed_data_{}.xlsx", now.format(TIMESTAMP_FORMAT)))
    }

    /// Whole-season workbook, e.g. `fall2024_fal_shows.xlsx`
    pub fn season_report(&self, season: Season, year: i32, for_fal: bool) -> PathBuf {
        let suffix = if for_fal { "_fal" } else { "" };
        self.root
            .join(format!("{}{}{}_shows.xlsx", season, year, suffix))
    }

    /// Watch-status workbook, e.g. `FAL_Fall_2024_data_2024-10-20-18-05.xlsx`
    pub fn watchlist_report(&self, name: &str, now: NaiveDateTime) -> PathBuf {
        self.root
            .join(format!("FAL_{}_data_{}.xlsx", name, now.format(TIMESTAMP_FORMAT)))
    }
}

/// Paths of the weekly ranking CSV exports
#[derive(Debug, Clone)]
pub struct WeeklyPaths {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl WeeklyPaths {
    pub fn new(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Raw MAL export for a week
    pub fn input(&self, week: u32) -> PathBuf {
        self.input_dir.join(format!("week-{}.csv", week))
    }

    /// Re-keyed output for a week
    pub fn output(&self, week: u32) -> PathBuf {
        self.output_dir.join(format!("week-{}.csv", week))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 20)
            .unwrap()
            .and_hms_opt(18, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_report_names() {
        let paths = OutputPaths::new("/reports");

        assert_eq!(
            paths.typed_report(at()),
            PathBuf::from("/reports/FAL_typed_data_2024-10-20-18-05.xlsx")
        );
        assert_eq!(
            paths.season_report(Season::Fall, 2024, true),
            PathBuf::from("/reports/fall2024_fal_shows.xlsx")
        );
        assert_eq!(
            paths.season_report(Season::Winter, 2025, false),
            PathBuf::from("/reports/winter2025_shows.xlsx")
        );
        assert_eq!(
            paths.watchlist_report("Fall_2024", at()),
            PathBuf::from("/reports/FAL_Fall_2024_data_2024-10-20-18-05.xlsx")
        );
    }

    #[test]
    fn test_weekly_paths() {
        let paths = WeeklyPaths::new("input", "output");
        assert_eq!(paths.input(7), PathBuf::from("input/week-7.csv"));
        assert_eq!(paths.output(7), PathBuf::from("output/week-7.csv"));
    }

    #[test]
    fn test_create_dirs() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let paths = OutputPaths::new(temp_dir.path().join("nested/reports"));
        paths.create_dirs()?;
        assert!(paths.root().is_dir());
        Ok(())
    }
}
