//! Column resize gesture.
//!
//! A press on a column's right border starts a gesture; every pointer move
//! after that rewrites the column's width (continuously, not once at the
//! end); a release anywhere ends it. Move and release must be fed from the
//! broadest event scope the front end has (the window, not the border
//! element), otherwise a release outside the border would leave the gesture
//! stuck.
//!
//! Only one gesture runs at a time. A press while resizing is ignored.

use crate::grid::GridStore;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing {
        col: usize,
        start_x: f32,
        start_width: f32,
    },
}

/// Pointer input as seen by the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Press on the right border of column `border`.
    Down { border: usize, x: f32 },
    Move { x: f32 },
    Up,
}

#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    state: ResizeState,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    pub fn active_column(&self) -> Option<usize> {
        match self.state {
            ResizeState::Resizing { col, .. } => Some(col),
            ResizeState::Idle => None,
        }
    }

    /// Start resizing `col` from pointer position `x`.
    ///
    /// Returns false (and changes nothing) if a gesture is already active or
    /// `col` is not a column of `grid`.
    pub fn pointer_down(&mut self, grid: &GridStore, col: usize, x: f32) -> bool {
        if self.is_resizing() {
            log::debug!("ignoring press on column {col} border: resize already active");
            return false;
        }
        if col >= grid.column_count() {
            return false;
        }
        self.state = ResizeState::Resizing {
            col,
            start_x: x,
            start_width: grid.column_width(col),
        };
        true
    }

    /// Apply the drag to the active column. Returns the stored width, or
    /// `None` when idle.
    pub fn pointer_move(&mut self, grid: &mut GridStore, x: f32) -> Option<f32> {
        match self.state {
            ResizeState::Resizing { col, start_x, start_width } => {
                Some(grid.set_column_width(col, start_width + (x - start_x)))
            }
            ResizeState::Idle => None,
        }
    }

    /// End the gesture. Returns the column that was being resized.
    pub fn pointer_up(&mut self) -> Option<usize> {
        let col = self.active_column();
        self.state = ResizeState::Idle;
        if let Some(col) = col {
            log::debug!("finished resizing column {col}");
        }
        col
    }

    /// Route one window-level pointer event.
    pub fn handle(&mut self, grid: &mut GridStore, event: PointerEvent) {
        match event {
            PointerEvent::Down { border, x } => {
                self.pointer_down(grid, border, x);
            }
            PointerEvent::Move { x } => {
                self.pointer_move(grid, x);
            }
            PointerEvent::Up => {
                self.pointer_up();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_widens_from_default() {
        let mut grid = GridStore::new();
        let mut resize = ResizeController::new();

        assert!(resize.pointer_down(&grid, 1, 300.0));
        assert_eq!(
            resize.state(),
            ResizeState::Resizing { col: 1, start_x: 300.0, start_width: 150.0 }
        );
        assert_eq!(resize.pointer_move(&mut grid, 340.0), Some(190.0));
        assert_eq!(grid.column_width(1), 190.0);
    }

    #[test]
    fn test_every_move_writes_relative_to_start() {
        let mut grid = GridStore::new();
        grid.set_column_width(0, 200.0);
        let mut resize = ResizeController::new();
        resize.pointer_down(&grid, 0, 100.0);

        resize.pointer_move(&mut grid, 150.0);
        assert_eq!(grid.column_width(0), 250.0);
        resize.pointer_move(&mut grid, 90.0);
        assert_eq!(grid.column_width(0), 190.0);
    }

    #[test]
    fn test_drag_clamps_to_minimum() {
        let mut grid = GridStore::new();
        let mut resize = ResizeController::new();
        resize.pointer_down(&grid, 2, 500.0);
        assert_eq!(resize.pointer_move(&mut grid, 0.0), Some(50.0));
    }

    #[test]
    fn test_second_press_is_ignored_while_resizing() {
        let mut grid = GridStore::new();
        let mut resize = ResizeController::new();
        assert!(resize.pointer_down(&grid, 0, 10.0));
        assert!(!resize.pointer_down(&grid, 2, 400.0));
        assert_eq!(resize.active_column(), Some(0));

        resize.pointer_move(&mut grid, 30.0);
        assert_eq!(grid.column_width(0), 170.0);
        assert!(grid.widths().get(2).is_none());
    }

    #[test]
    fn test_up_returns_to_idle_and_moves_stop_applying() {
        let mut grid = GridStore::new();
        let mut resize = ResizeController::new();
        resize.pointer_down(&grid, 0, 0.0);
        resize.pointer_move(&mut grid, 20.0);
        assert_eq!(resize.pointer_up(), Some(0));
        assert!(!resize.is_resizing());

        assert_eq!(resize.pointer_move(&mut grid, 400.0), None);
        assert_eq!(grid.column_width(0), 170.0);
        assert_eq!(resize.pointer_up(), None);
    }

    #[test]
    fn test_press_outside_grid_is_ignored() {
        let grid = GridStore::new();
        let mut resize = ResizeController::new();
        assert!(!resize.pointer_down(&grid, 9, 0.0));
        assert!(!resize.is_resizing());
    }

    #[test]
    fn test_edits_during_resize_are_unaffected() {
        let mut grid = GridStore::new();
        let mut resize = ResizeController::new();
        resize.handle(&mut grid, PointerEvent::Down { border: 0, x: 0.0 });
        grid.update_cell(0, 1, "alice").unwrap();
        resize.handle(&mut grid, PointerEvent::Move { x: 50.0 });
        resize.handle(&mut grid, PointerEvent::Up);

        assert_eq!(grid.cell(0, 1), Some("alice"));
        assert_eq!(grid.column_width(0), 200.0);
        assert!(!resize.is_resizing());
    }
}
