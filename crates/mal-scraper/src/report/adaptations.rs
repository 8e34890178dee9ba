//! Adaptations sheet: anime next to the popularity of their source manga
//! or light novel.

use super::{Cell, Column, Sheet};
use shared::{CatalogEntry, CatalogSnapshot};
use tracing::warn;

pub const SHEET_NAME: &str = "Adaptations";
pub const LIGHT_NOVEL_SHEET_NAME: &str = "Light Novels";

fn columns() -> Vec<Column> {
    vec![
        Column::new("Title"),
        Column::new("Favourites").scale(0.0, 100.0, 1000.0),
        Column::new("P2W").note("Plan to Watch").scale(0.0, 20000.0, 70000.0),
        Column::new("Favs:P2W")
            .note("Favourite to Plan to Watch. Favourites/Plan to Watch * 100")
            .hidden(),
        Column::new("TYPE"),
        Column::new("M_#Users")
            .note("Number of users who have added the manga to their list")
            .scale(5000.0, 10000.0, 50000.0),
        Column::new("M_Favs")
            .note("Number of users who have favorited the manga")
            .scale(0.0, 200.0, 2000.0),
        Column::new("M_Score").note("Mean score of the manga").scale(6.5, 7.5, 8.5),
        Column::new("M_Rank").note("Rank of the manga").hidden(),
        Column::new("M_%ile")
            .note("Percentile of the manga")
            .scale(0.0, 50.0, 100.0)
            .hidden(),
        Column::new("M_Favs:Users")
            .note("Favourites to Number of Users. Favourites/Number of Users * 100")
            .hidden(),
    ]
}

/// Build an adaptations sheet named `name`.
///
/// Entries without an adaptation are skipped.
pub fn sheet(name: &str, entries: &[CatalogEntry], snapshot: CatalogSnapshot) -> Sheet {
    let mut sheet = Sheet::new(name, columns());

    for entry in entries {
        let anime = entry.anime();
        let Some(adaptation) = entry.adaptation_info() else {
            warn!(mal_id = anime.id(), title = %anime.title(), "No source manga, skipping");
            continue;
        };

        sheet.push_row(vec![
            Cell::title(anime),
            Cell::count(anime.favorites()),
            Cell::count(anime.plan_to_watch()),
            Cell::metric(anime.favorites_per_hundred_planned(), anime),
            Cell::text(adaptation.manga_type()),
            Cell::count(adaptation.manga_list_users()),
            Cell::count(adaptation.manga_favorites()),
            Cell::Number(adaptation.manga_score()),
            Cell::Number(f64::from(adaptation.manga_rank())),
            Cell::Number(adaptation.percentile(snapshot)),
            Cell::metric(adaptation.favorite_to_list_ratio(), anime),
        ]);
    }

    sheet
}
