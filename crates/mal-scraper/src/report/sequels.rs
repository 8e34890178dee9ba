//! Sequels sheet: anime next to how their previous part performed.

use super::{Cell, Column, Sheet};
use shared::CatalogEntry;
use tracing::warn;

pub const SHEET_NAME: &str = "Sequels";

fn columns() -> Vec<Column> {
    vec![
        Column::new("Title"),
        Column::new("Favourites"),
        Column::new("P2W").note("Plan to Watch").scale(20000.0, 50000.0, 70000.0),
        Column::new("Favs:P2W")
            .note("Favourite to Plan to Watch. Favourites/Plan to Watch * 100")
            .hidden(),
        Column::new("Type").hidden(),
        Column::new("Season").hidden(),
        Column::new("P Completed")
            .note("Users Completed last part")
            .scale(50000.0, 100000.0, 200000.0),
        Column::new("P Watching").note("Users Watching last part"),
        Column::new("P Dropped").note("Users Dropped last part").hidden(),
        Column::new("P Drop Rate")
            .note("Of last part: Dropped / (Dropped + Completed + Watching) * 100")
            .hidden(),
        Column::new("P Rating").note("Rating of last part").scale(6.5, 7.5, 8.5),
        Column::new("P Title").hidden(),
    ]
}

/// Build the sequels sheet. Entries without a prequel are skipped.
pub fn sheet(entries: &[CatalogEntry]) -> Sheet {
    let mut sheet = Sheet::new(SHEET_NAME, columns());

    for entry in entries {
        let anime = entry.anime();
        let Some(sequel) = entry.sequel_info() else {
            warn!(mal_id = anime.id(), title = %anime.title(), "No prequel, skipping");
            continue;
        };
        let prequel = sequel.prequel();

        sheet.push_row(vec![
            Cell::title(anime),
            Cell::count(anime.favorites()),
            Cell::count(anime.plan_to_watch()),
            Cell::metric(anime.favorites_per_hundred_planned(), anime),
            Cell::text(sequel.relation()),
            sequel
                .season()
                .map(Cell::Number)
                .unwrap_or_else(|| Cell::text("unknown")),
            Cell::count(prequel.completed()),
            Cell::count(prequel.watching()),
            Cell::count(prequel.dropped()),
            Cell::Number(prequel.drop_rate()),
            Cell::Number(prequel.rating()),
            Cell::title(prequel),
        ]);
    }

    sheet
}
