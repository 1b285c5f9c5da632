//! `taskgrid-engine`: the grid state model and typed-cell dispatch.
//!
//! [`GridStore`] owns the data; [`ResizeController`] turns pointer drags into
//! width changes; [`dispatch`] maps cells to editors and funnels every edit
//! back into the store.

pub mod dispatch;
pub mod error;
pub mod events;
pub mod grid;
pub mod resize;
pub mod selection;
pub mod widths;

pub use dispatch::{commit, render_grid, ColumnPicker, EditOutcome, Editor, GridView, ValuePicker};
pub use error::GridError;
pub use events::GridEvent;
pub use grid::{Column, GridSnapshot, GridStore, DEFAULT_COLUMNS};
pub use resize::{PointerEvent, ResizeController, ResizeState};
pub use selection::Selection;
pub use widths::{ColumnWidths, GridLimits, DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};
