//! MAL Scraper library for building FAL workbooks from MyAnimeList data.
//!
//! This library fetches anime and manga records from the MAL v2 API, wraps
//! them in catalog entries and renders them as spreadsheet reports.

pub mod api;
pub mod report;
pub mod scraper;
pub mod season;

pub use api::MalClient;
pub use report::{write_workbook, Sheet};
pub use scraper::{MalScraper, ScraperStats};
pub use season::{SeasonDiscovery, SeasonalShow};
