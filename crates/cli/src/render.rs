// Text and JSON renderings of a grid view

use serde::Serialize;

use taskgrid_core::CellType;
use taskgrid_engine::GridView;

/// Pixels per character when laying out the text table.
const PX_PER_CHAR: f32 = 8.0;
const MIN_CHARS: usize = 4;
const MAX_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct JsonGrid {
    pub select_all: bool,
    pub columns: Vec<JsonColumn>,
    pub rows: Vec<JsonRow>,
}

#[derive(Debug, Serialize)]
pub struct JsonColumn {
    pub index: usize,
    pub label: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub width: f32,
}

#[derive(Debug, Serialize)]
pub struct JsonRow {
    pub index: usize,
    pub selected: bool,
    pub cells: Vec<JsonCell>,
}

#[derive(Debug, Serialize)]
pub struct JsonCell {
    pub value: String,
    pub background: String,
    pub foreground: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

pub fn to_json(view: &GridView) -> JsonGrid {
    JsonGrid {
        select_all: view.select_all,
        columns: view
            .headers
            .iter()
            .map(|h| JsonColumn {
                index: h.col,
                label: h.label.clone(),
                slug: h.slug.clone(),
                cell_type: h.cell_type,
                width: h.width,
            })
            .collect(),
        rows: view
            .rows
            .iter()
            .map(|r| JsonRow {
                index: r.row,
                selected: r.selected,
                cells: r
                    .cells
                    .iter()
                    .map(|c| JsonCell {
                        value: c.value.clone(),
                        background: c.background().to_css(),
                        foreground: c.foreground().to_css(),
                        options: c.editor.options(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn chars_for(width: f32) -> usize {
    ((width / PX_PER_CHAR).round() as usize).clamp(MIN_CHARS, MAX_CHARS)
}

fn fit(text: &str, chars: usize) -> String {
    let clipped: String = text.chars().take(chars).collect();
    format!("{clipped:<chars$}")
}

fn check(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Fixed-width table; column widths follow the stored pixel widths.
pub fn to_text(view: &GridView) -> String {
    let widths: Vec<usize> = view.headers.iter().map(|h| chars_for(h.width)).collect();
    let index_width = view.rows.len().saturating_sub(1).to_string().len();

    let mut out = String::new();
    let mut line = format!("{} {:>index_width$}", check(view.select_all), "#");
    for (header, &w) in view.headers.iter().zip(&widths) {
        line.push_str("  ");
        line.push_str(&fit(&header.label, w));
    }
    out.push_str(line.trim_end());
    out.push('\n');

    for row in &view.rows {
        let mut line = format!("{} {:>index_width$}", check(row.selected), row.row);
        for (cell, &w) in row.cells.iter().zip(&widths) {
            line.push_str("  ");
            line.push_str(&fit(&cell.value, w));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
