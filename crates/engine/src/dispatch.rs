//! Cell dispatch.
//!
//! Each cell's editor is chosen from its column's [`CellType`], and every
//! editor writes back through one gate: [`commit`], which ends in
//! [`GridStore::update_cell`]. Front ends never touch the grid any other way
//! while editing.
//!
//! [`render_grid`] derives the whole visible table (headers, widths, row
//! highlight, per-cell editor and colors) from the store, so a renderer only
//! has to draw what it is given.

use taskgrid_core::registry::{available_column_types, column_slug};
use taskgrid_core::{catalogue_for, Catalogue, CellType, Color, ColumnTypeInfo, Swatch};

use crate::error::GridError;
use crate::grid::GridStore;

/// Background of a selected row's plain cells.
pub const ROW_HIGHLIGHT: u32 = 0xBFDBFE;
const DEFAULT_TEXT: u32 = 0x000000;

/// The editor a cell presents.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor {
    /// Single-select from a catalogue. `swatch` colors the cell for its
    /// current value (none when empty).
    Select {
        catalogue: Catalogue,
        swatch: Option<Swatch>,
    },
    /// Numeric entry, stored exactly as typed.
    Number,
    /// Delegated to an external date picker.
    DatePicker,
    /// Delegated to an external person picker.
    PersonPicker,
    Text,
    /// Free text for columns whose label names no known type.
    Plain,
}

impl Editor {
    pub fn for_cell(cell_type: CellType, value: &str) -> Self {
        match cell_type {
            CellType::Status | CellType::Label => {
                let catalogue = catalogue_for(cell_type);
                Editor::Select {
                    swatch: catalogue.swatch(value),
                    catalogue,
                }
            }
            CellType::Numbers => Editor::Number,
            CellType::Date => Editor::DatePicker,
            CellType::Person => Editor::PersonPicker,
            CellType::Text => Editor::Text,
            CellType::Plain => Editor::Plain,
        }
    }

    /// Turn raw editor output into the stored value. `None` rejects it.
    ///
    /// Selects accept a catalogue key or empty. Numeric entry stores what
    /// was typed when it parses as a finite number and clears the cell
    /// otherwise. Everything else is stored verbatim.
    pub fn accept(&self, input: &str) -> Option<String> {
        match self {
            Editor::Select { catalogue, .. } => {
                (input.is_empty() || catalogue.contains(input)).then(|| input.to_string())
            }
            Editor::Number => {
                let trimmed = input.trim();
                if is_numeric(trimmed) {
                    Some(trimmed.to_string())
                } else {
                    Some(String::new())
                }
            }
            Editor::DatePicker | Editor::PersonPicker | Editor::Text | Editor::Plain => {
                Some(input.to_string())
            }
        }
    }

    /// Options offered by a select, in catalogue order.
    pub fn options(&self) -> Vec<&'static str> {
        match self {
            Editor::Select { catalogue, .. } => catalogue.values(),
            _ => Vec::new(),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Editor::DatePicker | Editor::PersonPicker)
    }
}

fn is_numeric(input: &str) -> bool {
    input.parse::<f64>().map(|n| n.is_finite()).unwrap_or(false)
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub cell_type: CellType,
    pub value: String,
    pub editor: Editor,
    /// The cell's row is selected.
    pub selected: bool,
}

impl CellView {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Option color when filled, row highlight when selected, white otherwise.
    pub fn background(&self) -> Color {
        match &self.editor {
            Editor::Select { swatch: Some(swatch), .. } => swatch.background,
            _ if self.selected => Color::from_hex(ROW_HIGHLIGHT),
            _ => Color::WHITE,
        }
    }

    pub fn foreground(&self) -> Color {
        match &self.editor {
            Editor::Select { swatch: Some(swatch), .. } => swatch.foreground,
            _ => Color::from_hex(DEFAULT_TEXT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub col: usize,
    pub label: String,
    /// Class-style name, e.g. `due-date`.
    pub slug: String,
    pub cell_type: CellType,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub row: usize,
    pub selected: bool,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub select_all: bool,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
}

/// View of one cell. Fails only if the cell does not exist.
pub fn cell_view(grid: &GridStore, row: usize, col: usize) -> Result<CellView, GridError> {
    grid.check_bounds(row, col)?;
    let cell_type = grid.cell_type(col).unwrap_or_default();
    let value = grid.cell(row, col).unwrap_or_default().to_string();
    Ok(CellView {
        row,
        col,
        cell_type,
        editor: Editor::for_cell(cell_type, &value),
        value,
        selected: grid.is_selected(row),
    })
}

pub fn render_grid(grid: &GridStore) -> GridView {
    let headers = grid
        .columns()
        .iter()
        .enumerate()
        .map(|(col, column)| HeaderView {
            col,
            label: column.label().to_string(),
            slug: column_slug(column.label()),
            cell_type: column.cell_type(),
            width: grid.column_width(col),
        })
        .collect();

    let rows = grid
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let selected = grid.is_selected(row);
            let cells = cells
                .iter()
                .zip(grid.columns())
                .enumerate()
                .map(|(col, (value, column))| CellView {
                    row,
                    col,
                    cell_type: column.cell_type(),
                    value: value.clone(),
                    editor: Editor::for_cell(column.cell_type(), value),
                    selected,
                })
                .collect();
            RowView { row, selected, cells }
        })
        .collect();

    GridView {
        select_all: grid.select_all(),
        headers,
        rows,
    }
}

// ============================================================================
// Writes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The cell now holds the editor's value.
    Applied,
    /// The value is outside the editor's domain; the cell is unchanged.
    Rejected,
    /// The editor closed without choosing a value.
    Cancelled,
}

/// The single write gate for editors.
///
/// Normalizes `input` with the cell's editor, then stores it with
/// `update_cell`. Addressing a missing cell means the caller wired an editor
/// to a cell that is not rendered: that panics in debug builds and is logged
/// and returned as an error in release builds.
pub fn commit(grid: &mut GridStore, row: usize, col: usize, input: &str) -> Result<EditOutcome, GridError> {
    let view = cell_view(grid, row, col).map_err(contract_violation)?;
    match view.editor.accept(input) {
        Some(value) => {
            grid.update_cell(row, col, value)?;
            Ok(EditOutcome::Applied)
        }
        None => {
            log::warn!("rejected '{input}' for {} cell ({row}, {col})", view.cell_type);
            Ok(EditOutcome::Rejected)
        }
    }
}

fn contract_violation(err: GridError) -> GridError {
    if cfg!(debug_assertions) {
        panic!("editor addressed a missing cell: {err}");
    }
    log::error!("editor addressed a missing cell: {err}");
    err
}

/// An opaque editor widget: shown the current value, yields a new one or
/// nothing when dismissed. Date and person pickers live behind this.
pub trait ValuePicker {
    fn pick(&mut self, cell_type: CellType, current: &str) -> Option<String>;
}

/// Open `picker` on a cell and commit what it returns.
pub fn edit_with(
    grid: &mut GridStore,
    row: usize,
    col: usize,
    picker: &mut dyn ValuePicker,
) -> Result<EditOutcome, GridError> {
    let view = cell_view(grid, row, col)?;
    match picker.pick(view.cell_type, &view.value) {
        Some(value) => commit(grid, row, col, &value),
        None => Ok(EditOutcome::Cancelled),
    }
}

/// The "add column" chooser.
///
/// Receives the current labels and the column types not yet present; returns
/// the chosen type's label or nothing.
pub trait ColumnPicker {
    fn choose(&mut self, existing: &[String], available: &[&'static ColumnTypeInfo]) -> Option<String>;
}

/// Run the chooser and add the column it picks. `Ok(None)` when dismissed.
pub fn add_column_via(grid: &mut GridStore, picker: &mut dyn ColumnPicker) -> Result<Option<usize>, GridError> {
    let existing = grid.column_labels();
    let available = available_column_types(&existing[..]);
    match picker.choose(&existing, &available) {
        Some(label) => grid.add_column(&label).map(Some),
        None => Ok(None),
    }
}
