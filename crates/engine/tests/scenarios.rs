use taskgrid_core::{type_of, CellType};
use taskgrid_engine::dispatch::{self, EditOutcome};
use taskgrid_engine::{GridError, GridStore, PointerEvent, ResizeController};

// -------------------------------------------------------------------------
// Shape
// -------------------------------------------------------------------------

#[test]
fn add_row_then_status_column() {
    let mut grid = GridStore::new();
    assert_eq!(grid.column_labels(), vec!["Task Name", "Owner", "Due date"]);
    assert_eq!(grid.row_count(), 1);

    grid.add_row("Buy milk");
    grid.add_column("Status").unwrap();

    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.row(1).unwrap(), &["Buy milk", "", "", ""]);
    assert_eq!(grid.row(0).unwrap(), &["", "", "", ""]);
}

#[test]
fn duplicate_status_column_is_rejected() {
    let mut grid = GridStore::new();
    grid.add_column("Status").unwrap();
    let before = grid.column_count();

    let err = grid.add_column("Status").unwrap_err();
    assert_eq!(err, GridError::DuplicateColumn { label: "Status".to_string() });
    assert_eq!(grid.column_count(), before);
    for row in grid.rows() {
        assert_eq!(row.len(), before);
    }
}

// -------------------------------------------------------------------------
// Type resolution
// -------------------------------------------------------------------------

#[test]
fn labels_resolve_case_insensitively() {
    assert_eq!(type_of("Due Date"), CellType::Date);
    assert_eq!(type_of("people"), CellType::Person);
    assert_eq!(type_of("NUMBERS"), CellType::Numbers);
    assert_eq!(type_of("random"), CellType::Plain);
}

// -------------------------------------------------------------------------
// Selection
// -------------------------------------------------------------------------

#[test]
fn select_all_sets_every_row() {
    let mut grid = GridStore::new();
    grid.add_row("a");
    grid.add_row("b");
    grid.set_select_all(true);

    for row in 0..grid.row_count() {
        assert!(grid.is_selected(row));
    }
    assert!(grid.select_all());
}

#[test]
fn selecting_each_row_individually_sets_select_all() {
    let mut grid = GridStore::new();
    grid.add_row("a");
    grid.add_row("b");
    for row in 0..grid.row_count() {
        grid.set_selected(row, true).unwrap();
    }
    assert!(grid.select_all());
}

#[test]
fn clicking_rows_toggles_and_clears_select_all() {
    let mut grid = GridStore::new();
    grid.add_row("a");
    grid.set_select_all(true);
    assert!(!grid.toggle_row(1).unwrap());
    assert!(!grid.select_all());
    assert!(grid.toggle_row(1).unwrap());
    assert!(grid.select_all());
}

// -------------------------------------------------------------------------
// Widths and resize
// -------------------------------------------------------------------------

#[test]
fn narrow_width_is_clamped() {
    let mut grid = GridStore::new();
    grid.set_column_width(0, 10.0);
    assert_eq!(grid.widths().get(0), Some(50.0));
}

#[test]
fn resize_gesture_released_elsewhere_still_ends() {
    let mut grid = GridStore::new();
    let mut resize = ResizeController::new();

    // Release far outside the header: the window-level handler still sees it
    for event in [
        PointerEvent::Down { border: 2, x: 600.0 },
        PointerEvent::Move { x: 650.0 },
        PointerEvent::Move { x: 2000.0 },
        PointerEvent::Up,
    ] {
        resize.handle(&mut grid, event);
    }
    assert!(!resize.is_resizing());
    assert_eq!(grid.column_width(2), 1550.0);

    resize.handle(&mut grid, PointerEvent::Move { x: 0.0 });
    assert_eq!(grid.column_width(2), 1550.0);
}

// -------------------------------------------------------------------------
// Editing through the dispatcher
// -------------------------------------------------------------------------

#[test]
fn every_column_type_edits_through_one_gate() {
    let mut grid = GridStore::new();
    for label in ["Status", "Label", "Numbers", "Text"] {
        grid.add_column(label).unwrap();
    }
    grid.take_events();

    let edits = [
        (0, "Ship it"),
        (1, "alice"),
        (2, "2026-05-01"),
        (3, "Done"),
        (4, "Research"),
        (5, "12.5"),
        (6, "free text"),
    ];
    for (col, value) in edits {
        assert_eq!(dispatch::commit(&mut grid, 0, col, value).unwrap(), EditOutcome::Applied);
    }

    assert_eq!(
        grid.row(0).unwrap(),
        &["Ship it", "alice", "2026-05-01", "Done", "Research", "12.5", "free text"]
    );
    assert_eq!(grid.take_events().len(), edits.len());
}

#[test]
fn rendered_view_matches_store() {
    let mut grid = GridStore::new();
    grid.add_row("Buy milk");
    grid.add_column("Label").unwrap();
    grid.update_cell(1, 3, "Label").unwrap();

    let view = dispatch::render_grid(&grid);
    assert_eq!(view.headers.len(), grid.column_count());
    assert_eq!(view.rows.len(), grid.row_count());
    for row in &view.rows {
        assert_eq!(row.cells.len(), grid.column_count());
        for cell in &row.cells {
            assert_eq!(Some(cell.value.as_str()), grid.cell(cell.row, cell.col));
        }
    }
    assert_eq!(view.rows[1].cells[3].foreground().to_hex(), 0x1F2937);
}
