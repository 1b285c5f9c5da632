//! Change notifications emitted by the grid store.
//!
//! The store records one event per applied mutation, in application order.
//! The persistence layer drains them to decide whether to write, and a front
//! end can drain them to decide what to repaint.

use taskgrid_core::CellType;

#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// A row was appended at `row`.
    RowAdded { row: usize },
    /// A column was appended at `col`; every row grew by one cell.
    ColumnAdded { col: usize, cell_type: CellType },
    /// One cell's value was replaced.
    CellUpdated { row: usize, col: usize },
    /// A column's stored width changed (value after clamping).
    WidthChanged { col: usize, width: f32 },
    /// Selection flags or the select-all flag changed.
    SelectionChanged { selected: usize, select_all: bool },
}

impl GridEvent {
    /// Rows, columns and widths are persisted; selection is session-only.
    pub fn touches_persisted_state(&self) -> bool {
        !matches!(self, GridEvent::SelectionChanged { .. })
    }
}
