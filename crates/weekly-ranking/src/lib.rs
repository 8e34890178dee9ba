//! Weekly ranking re-keyer.
//!
//! MAL's weekly ranking export is ordered by weekly points. This crate turns
//! it into a title-keyed table of `title,position,points` so consecutive
//! weeks can be joined on the title.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Column holding the anime title
const TITLE_COLUMN: usize = 2;

/// Column holding the weekly points
const POINTS_COLUMN: usize = 3;

/// Where a title placed in one week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// 1-based row of the title in the export
    pub position: usize,
    pub points: u64,
}

/// Title-keyed placements, iterated in title order
pub type Rankings = BTreeMap<String, Placement>;

/// Parse a points cell such as `"1,234"`. Anything unparsable counts as 0.
pub fn parse_points(raw: &str) -> u64 {
    raw.trim().replace(',', "").parse().unwrap_or(0)
}

/// Read a weekly ranking export.
///
/// The first row is a header. Titles are kept exactly as exported, so two
/// titles differing only in whitespace stay apart. A title listed twice
/// keeps its first placement.
pub fn read_rankings(path: &Path) -> Result<Rankings> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open ranking file: {}", path.display()))?;

    let mut rankings = Rankings::new();
    for (idx, record) in reader.records().enumerate() {
        let position = idx + 1;
        let record = record
            .with_context(|| format!("Failed to read row {} of {}", position, path.display()))?;

        if record.len() <= POINTS_COLUMN {
            bail!(
                "Row {} of {} has {} columns, expected at least {}",
                position,
                path.display(),
                record.len(),
                POINTS_COLUMN + 1
            );
        }

        let title = record[TITLE_COLUMN].to_string();
        let points = parse_points(&record[POINTS_COLUMN]);

        if rankings.contains_key(&title) {
            debug!(title = %title, position = position, "Duplicate title, keeping first placement");
            continue;
        }
        rankings.insert(title, Placement { position, points });
    }

    Ok(rankings)
}

/// Write placements as a header-less `title,position,points` CSV with
/// CRLF line endings
pub fn write_rankings(rankings: &Rankings, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    for (title, placement) in rankings {
        writer
            .serialize((title, placement.position, placement.points))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// Re-key one week's export into `output`. Returns the number of titles.
pub fn rekey_week(input: &Path, output: &Path) -> Result<usize> {
    let rankings = read_rankings(input)?;
    write_rankings(&rankings, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        titles = rankings.len(),
        "Weekly ranking re-keyed"
    );

    Ok(rankings.len())
}
