//! Workbook reports.
//!
//! Each sheet is described as a list of [`Column`]s plus rows of [`Cell`]s,
//! built by the per-sheet modules from catalog entries. [`write_workbook`]
//! renders them with a common layout: bold centred headers, header notes,
//! frozen title column and header row, hidden helper columns and
//! red/yellow/green colour scales.

pub mod adaptations;
pub mod originals;
pub mod season;
pub mod sequels;
pub mod watchlist;

use anyhow::{Context, Result};
use rust_xlsxwriter::{
    Color, ConditionalFormat3ColorScale, ConditionalFormatType, DocProperties, Format, FormatAlign,
    FormatUnderline, Note, Url, Workbook, Worksheet,
};
use shared::{Anime, MetricError};
use std::path::Path;
use tracing::{info, warn};

const LOW_COLOR: u32 = 0xFF9999;
const MID_COLOR: u32 = 0xFFFF99;
const HIGH_COLOR: u32 = 0x99FF99;

/// Author shown on header notes
const NOTE_AUTHOR: &str = "Author";

/// Width of the title column, in characters
const TITLE_WIDTH: f64 = 45.0;

/// A single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Link { text: String, url: String, bold: bool },
    Blank,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn count(value: u64) -> Self {
        Cell::Number(value as f64)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Cell::Link {
            text: text.into(),
            url: url.into(),
            bold: false,
        }
    }

    /// Title cell linking to the anime's MAL page
    pub fn title(anime: &Anime) -> Self {
        Cell::link(anime.title(), anime.link())
    }

    /// A derived metric; undefined values render blank
    pub fn metric(value: Result<f64, MetricError>, anime: &Anime) -> Self {
        match value {
            Ok(v) => Cell::Number(v),
            Err(e) => {
                warn!(mal_id = anime.id(), title = %anime.title(), error = %e, "Metric left blank");
                Cell::Blank
            }
        }
    }

    pub fn bold(self) -> Self {
        match self {
            Cell::Link { text, url, .. } => Cell::Link { text, url, bold: true },
            other => other,
        }
    }
}

/// Thresholds of a red (min) / yellow (mid) / green (max) colour scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

impl ColorScale {
    pub const fn new(min: f64, mid: f64, max: f64) -> Self {
        Self { min, mid, max }
    }
}

/// Column layout
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub note: Option<&'static str>,
    pub hidden: bool,
    pub color_scale: Option<ColorScale>,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            note: None,
            hidden: false,
            color_scale: None,
        }
    }

    pub const fn note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub const fn scale(mut self, min: f64, mid: f64, max: f64) -> Self {
        self.color_scale = Some(ColorScale::new(min, mid, max));
        self
    }
}

/// A worksheet ready to be written
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Index of the column with the given header
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header == header)
    }

    /// Cell at a data row (0-based, excluding the header) and header
    pub fn cell(&self, row: usize, header: &str) -> Option<&Cell> {
        let col = self.column_index(header)?;
        self.rows.get(row)?.get(col)
    }
}

/// Write sheets, in order, to a new workbook at `path`
pub fn write_workbook(sheets: &[Sheet], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("fal-scraper");
    workbook.set_properties(&properties);

    for sheet in sheets {
        write_sheet(&mut workbook, sheet)
            .with_context(|| format!("Failed to write sheet {}", sheet.name))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook: {}", path.display()))?;

    info!(path = %path.display(), sheets = sheets.len(), "Workbook saved");
    Ok(())
}

fn write_sheet(workbook: &mut Workbook, sheet: &Sheet) -> Result<()> {
    let worksheet = workbook.add_worksheet().set_name(&sheet.name)?;

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let bold_link_format = Format::new()
        .set_bold()
        .set_underline(FormatUnderline::Single)
        .set_font_color(Color::Blue);

    for (col, column) in sheet.columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;

        if let Some(text) = column.note {
            let note = Note::new(text).set_author(NOTE_AUTHOR);
            worksheet.insert_note(0, col, &note)?;
        }
        if column.hidden {
            worksheet.set_column_hidden(col)?;
        }
    }

    worksheet.set_column_width(0, TITLE_WIDTH)?;
    worksheet.set_freeze_panes(1, 1)?;

    for (idx, row) in sheet.rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, cell, &bold_link_format)?;
        }
    }

    if !sheet.rows.is_empty() {
        let last_row = sheet.rows.len() as u32;
        for (col, column) in sheet.columns.iter().enumerate() {
            if let Some(scale) = column.color_scale {
                let col = col as u16;
                worksheet.add_conditional_format(1, col, last_row, col, &color_scale_format(scale))?;
            }
        }
    }

    info!(sheet = %sheet.name, rows = sheet.rows.len(), "Sheet written");
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell, bold_link_format: &Format) -> Result<()> {
    match cell {
        Cell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Cell::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        Cell::Link { text, url, bold } => {
            let link = Url::new(url.as_str()).set_text(text.as_str());
            if *bold {
                worksheet.write_url_with_format(row, col, link, bold_link_format)?;
            } else {
                worksheet.write_url(row, col, link)?;
            }
        }
        Cell::Blank => {}
    }
    Ok(())
}

fn color_scale_format(scale: ColorScale) -> ConditionalFormat3ColorScale {
    ConditionalFormat3ColorScale::new()
        .set_minimum(ConditionalFormatType::Number, scale.min)
        .set_midpoint(ConditionalFormatType::Number, scale.mid)
        .set_maximum(ConditionalFormatType::Number, scale.max)
        .set_minimum_color(Color::RGB(LOW_COLOR))
        .set_midpoint_color(Color::RGB(MID_COLOR))
        .set_maximum_color(Color::RGB(HIGH_COLOR))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn anime(id: u32, title: &str, favorites: u64, plan_to_watch: u64) -> Value {
        json!({
            "id": id,
            "title": title,
            "num_favorites": favorites,
            "mean": 7.8,
            "source": "manga",
            "media_type": "tv",
            "statistics": {
                "status": {
                    "plan_to_watch": plan_to_watch.to_string(),
                    "watching": "200",
                    "completed": "700",
                    "dropped": "100"
                }
            }
        })
    }

    pub fn manga(id: u32) -> Value {
        json!({
            "id": id,
            "num_favorites": 50,
            "mean": 8.0,
            "num_list_users": 2000,
            "rank": 5,
            "media_type": "light_novel"
        })
    }
}
