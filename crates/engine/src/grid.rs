//! The grid state store.
//!
//! Owns the column list, the rows, per-row selection and column widths, and
//! is the only place any of them change. Every row always has exactly one
//! cell per column; operations that change the shape update columns and rows
//! together inside one `&mut self` call, so a half-applied shape is never
//! observable.
//!
//! Whenever the row count changes the selection is rebuilt with nothing
//! selected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taskgrid_core::CellType;

use crate::error::GridError;
use crate::events::GridEvent;
use crate::selection::Selection;
use crate::widths::{ColumnWidths, GridLimits};

/// Columns a fresh grid starts with.
pub const DEFAULT_COLUMNS: [&str; 3] = ["Task Name", "Owner", "Due date"];

/// A column: display label plus the cell type resolved from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    label: String,
    cell_type: CellType,
}

impl Column {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let cell_type = CellType::from_label(&label);
        Self { label, cell_type }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }
}

/// The persisted parts of a grid: labels, cell values and stored widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: BTreeMap<usize, f32>,
}

impl Default for GridSnapshot {
    fn default() -> Self {
        let columns: Vec<String> = DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = vec![vec![String::new(); columns.len()]];
        Self {
            columns,
            rows,
            widths: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridStore {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    selection: Selection,
    widths: ColumnWidths,
    limits: GridLimits,
    events: Vec<GridEvent>,
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GridStore {
    /// Default columns and one empty row.
    pub fn new() -> Self {
        Self::with_limits(GridLimits::default())
    }

    pub fn with_limits(limits: GridLimits) -> Self {
        let snapshot = GridSnapshot::default();
        let selection = Selection::new(snapshot.rows.len());
        Self {
            columns: snapshot.columns.into_iter().map(Column::new).collect(),
            rows: snapshot.rows,
            selection,
            widths: ColumnWidths::new(),
            limits,
            events: Vec::new(),
        }
    }

    /// Rebuild a grid from persisted parts.
    ///
    /// Fails if there are no columns or any row's length differs from the
    /// column count. Stored widths are re-clamped and entries for positions
    /// past the last column are dropped. Nothing is selected.
    pub fn from_snapshot(snapshot: GridSnapshot, limits: GridLimits) -> Result<Self, GridError> {
        if snapshot.columns.is_empty() {
            return Err(GridError::NoColumns);
        }
        let expected = snapshot.columns.len();
        if let Some((row, cells)) = snapshot
            .rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(GridError::ShapeMismatch {
                row,
                expected,
                found: cells.len(),
            });
        }

        let mut widths = ColumnWidths::new();
        for (col, width) in snapshot.widths {
            widths.insert(col, limits.clamp(width));
        }
        widths.truncate(expected);

        Ok(Self {
            columns: snapshot.columns.into_iter().map(Column::new).collect(),
            selection: Selection::new(snapshot.rows.len()),
            rows: snapshot.rows,
            widths,
            limits,
            events: Vec::new(),
        })
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            columns: self.column_labels(),
            rows: self.rows.clone(),
            widths: self.widths.as_map().clone(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.clone()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|v| v.as_str())
    }

    pub fn cell_type(&self, col: usize) -> Option<CellType> {
        self.columns.get(col).map(|c| c.cell_type)
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.columns.iter().any(|c| c.label == label)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selection.is_selected(row)
    }

    pub fn select_all(&self) -> bool {
        self.selection.select_all()
    }

    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    /// Stored width, or the default for columns never resized.
    pub fn column_width(&self, col: usize) -> f32 {
        self.widths.width_or(col, self.limits.default_width)
    }

    pub fn limits(&self) -> GridLimits {
        self.limits
    }

    /// Pending change events, oldest first.
    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    /// Drain pending change events.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Shape
    // =========================================================================

    /// Append a row with `first_cell` in column 0 and empty cells elsewhere.
    /// Returns the new row's index.
    pub fn add_row(&mut self, first_cell: &str) -> usize {
        let mut cells = vec![String::new(); self.columns.len()];
        if let Some(first) = cells.first_mut() {
            *first = first_cell.to_string();
        }
        self.rows.push(cells);
        let row = self.rows.len() - 1;
        log::debug!("added row {row}");
        self.events.push(GridEvent::RowAdded { row });
        self.sync_selection();
        row
    }

    /// The "add task" entry: trims `input` and adds a row named with it.
    /// Blank input adds nothing.
    pub fn submit_task(&mut self, input: &str) -> Option<usize> {
        let name = input.trim();
        if name.is_empty() {
            return None;
        }
        Some(self.add_row(name))
    }

    /// Append a column and widen every row by one empty cell.
    ///
    /// Rejects a label that exactly matches (case-sensitive) an existing one;
    /// the grid is left unchanged. Returns the new column's index.
    pub fn add_column(&mut self, label: &str) -> Result<usize, GridError> {
        if self.has_column(label) {
            log::warn!("rejected duplicate column '{label}'");
            return Err(GridError::DuplicateColumn {
                label: label.to_string(),
            });
        }

        let column = Column::new(label);
        let cell_type = column.cell_type;
        self.columns.push(column);
        for row in &mut self.rows {
            row.push(String::new());
        }
        let col = self.columns.len() - 1;
        log::debug!("added column {col} '{label}' ({cell_type})");
        self.events.push(GridEvent::ColumnAdded { col, cell_type });
        Ok(col)
    }

    // =========================================================================
    // Cells
    // =========================================================================

    /// Replace one cell's value. Selection and shape are untouched.
    pub fn update_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        self.rows[row][col] = value.into();
        self.events.push(GridEvent::CellUpdated { row, col });
        Ok(())
    }

    pub fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows.len() {
            return Err(GridError::RowOutOfBounds {
                row,
                rows: self.rows.len(),
            });
        }
        if col >= self.columns.len() {
            return Err(GridError::ColumnOutOfBounds {
                col,
                cols: self.columns.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Set one row's checkbox; `select_all` becomes the AND of all rows.
    pub fn set_selected(&mut self, row: usize, checked: bool) -> Result<(), GridError> {
        if !self.selection.set(row, checked) {
            return Err(GridError::RowOutOfBounds {
                row,
                rows: self.rows.len(),
            });
        }
        self.push_selection_event();
        Ok(())
    }

    /// Clicking a row flips its selection. Returns the new flag.
    pub fn toggle_row(&mut self, row: usize) -> Result<bool, GridError> {
        let checked = !self.selection.is_selected(row);
        self.set_selected(row, checked)?;
        Ok(checked)
    }

    /// Header checkbox: every row and `select_all` take `checked` directly.
    pub fn set_select_all(&mut self, checked: bool) {
        self.selection.set_all(checked);
        self.push_selection_event();
    }

    fn sync_selection(&mut self) {
        if self.selection.len() != self.rows.len() {
            self.selection.reset(self.rows.len());
            self.push_selection_event();
        }
    }

    fn push_selection_event(&mut self) {
        self.events.push(GridEvent::SelectionChanged {
            selected: self.selection.count(),
            select_all: self.selection.select_all(),
        });
    }

    // =========================================================================
    // Widths
    // =========================================================================

    /// Store a column width, floored at the minimum. Returns the stored width.
    pub fn set_column_width(&mut self, col: usize, width: f32) -> f32 {
        let width = self.limits.clamp(width);
        self.widths.insert(col, width);
        self.events.push(GridEvent::WidthChanged { col, width });
        width
    }
}
