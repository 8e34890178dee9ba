//! Season sheet: every TV show of a season, with its closest relation so
//! sequels can be told apart at a glance.

use super::{Cell, Column, Sheet};
use crate::season::SeasonalShow;
use shared::metrics;

pub const SHEET_NAME: &str = "Season";

fn columns() -> Vec<Column> {
    vec![
        Column::new("Title"),
        Column::new("Favourites"),
        Column::new("P2W").note("Plan to Watch"),
        Column::new("Favs:P2W").note("Favourite to Plan to Watch. Favourites/Plan to Watch * 100"),
        Column::new("Watching"),
        Column::new("id"),
        Column::new("Source"),
        Column::new("Prequel id"),
        Column::new("Relation2Prequel"),
    ]
}

pub fn sheet(shows: &[SeasonalShow]) -> Sheet {
    let mut sheet = Sheet::new(SHEET_NAME, columns());

    for show in shows {
        let anime = &show.anime;
        let (prequel_id, relation) = match &show.prequel {
            Some(edge) => (
                Cell::link(edge.node.id.to_string(), metrics::anime_url(edge.node.id)),
                Cell::text(edge.relation_type.as_str()),
            ),
            None => (Cell::Blank, Cell::Blank),
        };

        sheet.push_row(vec![
            Cell::title(anime),
            Cell::count(anime.favorites()),
            Cell::count(anime.plan_to_watch()),
            Cell::metric(anime.favorites_per_hundred_planned(), anime),
            Cell::count(anime.watching()),
            Cell::Number(f64::from(anime.id())),
            anime.source().map(Cell::text).unwrap_or(Cell::Blank),
            prequel_id,
            relation,
        ]);
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::related_prequel;
    use crate::report::fixtures;
    use serde_json::json;
    use shared::Anime;

    #[test]
    fn test_season_rows() {
        let mut record = fixtures::anime(59131, "Sequel Show", 10, 1000);
        record["related_anime"] = json!([
            {"node": {"id": 52991, "title": "First"}, "relation_type": "prequel"}
        ]);

        let shows = vec![
            SeasonalShow {
                anime: Anime::from_record(&record).unwrap(),
                prequel: related_prequel(&record),
            },
            SeasonalShow {
                anime: Anime::from_record(&fixtures::anime(56967, "New Show", 10, 1000)).unwrap(),
                prequel: None,
            },
        ];

        let sheet = sheet(&shows);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.cell(0, "id"), Some(&Cell::Number(59131.0)));
        assert_eq!(sheet.cell(0, "Source"), Some(&Cell::text("manga")));
        assert_eq!(
            sheet.cell(0, "Prequel id"),
            Some(&Cell::link("52991", "https://myanimelist.net/anime/52991"))
        );
        assert_eq!(sheet.cell(0, "Relation2Prequel"), Some(&Cell::text("prequel")));
        assert_eq!(sheet.cell(1, "Prequel id"), Some(&Cell::Blank));
        assert_eq!(sheet.cell(1, "Watching"), Some(&Cell::Number(200.0)));
    }
}
