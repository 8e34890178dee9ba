//! Watchlist sheet: watch-status breakdown of a fixed list of airing shows.

use super::{Cell, Column, Sheet};
use shared::Anime;
use std::collections::HashSet;

pub const SHEET_NAME: &str = "Watchlist";

fn columns() -> Vec<Column> {
    vec![
        Column::new("Title"),
        Column::new("Watching"),
        Column::new("Score"),
        Column::new("Dropped"),
        Column::new("Favourite"),
        Column::new("P2W"),
        Column::new("Drop Rate").note("Dropped/(Dropped+Watching+Completed)"),
        Column::new("Completed"),
    ]
}

/// Build the watchlist sheet. Titles listed in `picked` are bold.
pub fn sheet(shows: &[Anime], picked: &[String]) -> Sheet {
    let picked: HashSet<&str> = picked.iter().map(String::as_str).collect();
    let mut sheet = Sheet::new(SHEET_NAME, columns());

    for anime in shows {
        let title = if picked.contains(anime.title()) {
            Cell::title(anime).bold()
        } else {
            Cell::title(anime)
        };

        sheet.push_row(vec![
            title,
            Cell::count(anime.watching()),
            Cell::Number(anime.rating()),
            Cell::count(anime.dropped()),
            Cell::count(anime.favorites()),
            Cell::count(anime.plan_to_watch()),
            Cell::Number(anime.drop_rate()),
            Cell::count(anime.completed()),
        ]);
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn test_picked_titles_are_bold() {
        let shows = vec![
            Anime::from_record(&fixtures::anime(1, "Ao no Hako", 10, 100)).unwrap(),
            Anime::from_record(&fixtures::anime(2, "Other", 10, 100)).unwrap(),
        ];

        let sheet = sheet(&shows, &["Ao no Hako".to_string()]);
        assert!(matches!(sheet.cell(0, "Title"), Some(Cell::Link { bold: true, .. })));
        assert!(matches!(sheet.cell(1, "Title"), Some(Cell::Link { bold: false, .. })));
    }

    #[test]
    fn test_watch_status_columns() {
        let mut record = fixtures::anime(3, "Unscored", 10, 100);
        record.as_object_mut().unwrap().remove("mean");
        let shows = vec![Anime::from_record(&record).unwrap()];

        let sheet = sheet(&shows, &[]);
        assert_eq!(sheet.cell(0, "Score"), Some(&Cell::Number(-1.0)));
        assert_eq!(sheet.cell(0, "Drop Rate"), Some(&Cell::Number(10.0)));
        assert_eq!(sheet.cell(0, "Completed"), Some(&Cell::Number(700.0)));
        assert_eq!(sheet.cell(0, "P2W"), Some(&Cell::Number(100.0)));
    }
}
