//! Originals sheet: anime with no source material.
//!
//! Plan-to-watch is the only signal worth reading here; favourites of an
//! unaired original are mostly noise and stay hidden.

use super::{Cell, Column, Sheet};
use shared::CatalogEntry;

pub const SHEET_NAME: &str = "Originals";

fn columns() -> Vec<Column> {
    vec![
        Column::new("Title"),
        Column::new("P2W").note("Plan to Watch").scale(5000.0, 10000.0, 25000.0),
        Column::new("Favourites").hidden(),
        Column::new("Favs:P2W")
            .note("Favourite to Plan to Watch. Favourites/Plan to Watch * 100")
            .hidden(),
    ]
}

pub fn sheet(entries: &[CatalogEntry]) -> Sheet {
    let mut sheet = Sheet::new(SHEET_NAME, columns());

    for entry in entries {
        let anime = entry.anime();
        sheet.push_row(vec![
            Cell::title(anime),
            Cell::count(anime.plan_to_watch()),
            Cell::count(anime.favorites()),
            Cell::metric(anime.favorites_per_hundred_planned(), anime),
        ]);
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn test_originals_rows() {
        let entries = vec![
            CatalogEntry::plain(&fixtures::anime(54914, "Original A", 300, 15000)).unwrap(),
            CatalogEntry::plain(&fixtures::anime(55894, "Original B", 4000, 8000)).unwrap(),
        ];

        let sheet = sheet(&entries);
        assert_eq!(sheet.name, "Originals");
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.cell(0, "Title"),
            Some(&Cell::link("Original A", "https://myanimelist.net/anime/54914"))
        );
        assert_eq!(sheet.cell(0, "P2W"), Some(&Cell::Number(15000.0)));
        assert_eq!(sheet.cell(1, "Favs:P2W"), Some(&Cell::Number(50.0)));
    }

    #[test]
    fn test_layout() {
        let sheet = sheet(&[]);
        let hidden: Vec<_> = sheet.columns.iter().filter(|c| c.hidden).map(|c| c.header).collect();
        assert_eq!(hidden, vec!["Favourites", "Favs:P2W"]);
        assert!(sheet.columns[1].color_scale.is_some());
    }
}
