//! Grid persistence bridge.
//!
//! The grid is stored as three independent JSON blobs: the row matrix, the
//! column labels and the width map (keys are column positions as strings).
//! Each blob decodes on its own, so a corrupt width map never costs the user
//! their rows. After decoding, the parts must still fit together; if they
//! don't (ragged rows, no columns) the whole grid falls back to defaults.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use taskgrid_engine::{GridError, GridEvent, GridLimits, GridSnapshot, GridStore};

use crate::blob::{BlobStore, StoreError};

pub const ROWS_KEY: &str = "tableRows";
pub const COLUMNS_KEY: &str = "tableColumns";
pub const WIDTHS_KEY: &str = "tableColumnWidths";

/// A stored blob that could not be decoded. Never fatal: the field falls
/// back to its default.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not decode '{}': {}", self.key, self.message)
    }
}

impl std::error::Error for DecodeError {}

/// What happened while restoring a grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Fields that were present but unreadable.
    pub decode_errors: Vec<DecodeError>,
    /// Set when the decoded parts were inconsistent and the grid was reset.
    pub reset: Option<GridError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.decode_errors.is_empty() && self.reset.is_none()
    }
}

fn decode_field<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &'static str,
) -> Result<Option<T>, DecodeError> {
    match store.get(key) {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| DecodeError {
            key,
            message: e.to_string(),
        }),
    }
}

fn field_or<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &'static str,
    default: T,
    report: &mut LoadReport,
) -> T {
    match decode_field(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            log::warn!("{e}; using default");
            report.decode_errors.push(e);
            default
        }
    }
}

/// Drop unusable width entries (`null`, non-finite); the column falls back to
/// the default width and the other entries survive.
fn finite_widths(stored: BTreeMap<usize, Option<f32>>) -> BTreeMap<usize, f32> {
    stored
        .into_iter()
        .filter_map(|(col, width)| match width {
            Some(w) if w.is_finite() => Some((col, w)),
            _ => {
                log::warn!("ignoring stored width for column {col}");
                None
            }
        })
        .collect()
}

/// Restore a grid from `store`.
///
/// Missing keys take their defaults, which is how a first run starts with
/// the default columns and one empty row.
pub fn load_grid(store: &dyn BlobStore, limits: GridLimits) -> (GridStore, LoadReport) {
    let defaults = GridSnapshot::default();
    let mut report = LoadReport::default();

    let columns: Vec<String> = field_or(store, COLUMNS_KEY, defaults.columns, &mut report);
    let rows: Vec<Vec<String>> = field_or(store, ROWS_KEY, defaults.rows, &mut report);
    let widths = finite_widths(field_or(
        store,
        WIDTHS_KEY,
        BTreeMap::<usize, Option<f32>>::new(),
        &mut report,
    ));

    let snapshot = GridSnapshot { columns, rows, widths };
    match GridStore::from_snapshot(snapshot, limits) {
        Ok(grid) => (grid, report),
        Err(e) => {
            log::warn!("stored grid is inconsistent ({e}); starting from defaults");
            report.reset = Some(e);
            (GridStore::with_limits(limits), report)
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Encode(e.to_string()))
}

/// Write all three blobs. Selection is not persisted.
pub fn save_grid(grid: &GridStore, store: &mut dyn BlobStore) -> Result<(), StoreError> {
    let snapshot = grid.snapshot();
    store.set(ROWS_KEY, &encode(&snapshot.rows)?)?;
    store.set(COLUMNS_KEY, &encode(&snapshot.columns)?)?;
    store.set(WIDTHS_KEY, &encode(&snapshot.widths)?)?;
    Ok(())
}

/// Remove every stored blob so the next load starts from defaults.
pub fn clear_grid(store: &mut dyn BlobStore) -> Result<(), StoreError> {
    for key in [ROWS_KEY, COLUMNS_KEY, WIDTHS_KEY] {
        store.remove(key)?;
    }
    Ok(())
}

/// A grid bound to a blob store, written through after every mutation.
///
/// All mutations go through [`PersistedGrid::update`]. A write happens when
/// the mutation changed rows, columns or widths; selection-only changes are
/// not written. Write failures are logged and the in-memory state is kept;
/// the most recent one can be collected with
/// [`take_write_error`](PersistedGrid::take_write_error).
pub struct PersistedGrid<B: BlobStore> {
    grid: GridStore,
    store: B,
    report: LoadReport,
    last_events: Vec<GridEvent>,
    write_error: Option<StoreError>,
}

impl<B: BlobStore> PersistedGrid<B> {
    /// Load from `store`, falling back to defaults as described in
    /// [`load_grid`].
    pub fn open(store: B, limits: GridLimits) -> Self {
        let (grid, report) = load_grid(&store, limits);
        Self {
            grid,
            store,
            report,
            last_events: Vec::new(),
            write_error: None,
        }
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Events produced by the most recent `update`.
    pub fn last_events(&self) -> &[GridEvent] {
        &self.last_events
    }

    /// Apply `f` to the grid, then persist if anything persisted changed.
    pub fn update<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut GridStore) -> R,
    {
        let result = f(&mut self.grid);
        self.flush();
        result
    }

    fn flush(&mut self) {
        self.last_events = self.grid.take_events();
        if !self.last_events.iter().any(GridEvent::touches_persisted_state) {
            return;
        }
        if let Err(e) = save_grid(&self.grid, &mut self.store) {
            log::warn!("failed to persist grid: {e}");
            self.write_error = Some(e);
        }
    }

    pub fn take_write_error(&mut self) -> Option<StoreError> {
        self.write_error.take()
    }

    pub fn into_parts(self) -> (GridStore, B) {
        (self.grid, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;

    fn stored(columns: &str, rows: &str, widths: &str) -> MemoryBlobStore {
        let mut store = MemoryBlobStore::new();
        store.set(COLUMNS_KEY, columns).unwrap();
        store.set(ROWS_KEY, rows).unwrap();
        store.set(WIDTHS_KEY, widths).unwrap();
        store
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = MemoryBlobStore::new();
        let (grid, report) = load_grid(&store, GridLimits::default());
        assert!(report.is_clean());
        assert_eq!(grid.column_labels(), vec!["Task Name", "Owner", "Due date"]);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.row(0).unwrap(), &["", "", ""]);
        assert!(grid.widths().is_empty());
    }

    #[test]
    fn test_widths_use_string_keys() {
        let mut grid = GridStore::new();
        grid.set_column_width(0, 200.0);
        grid.set_column_width(2, 75.5);
        let mut store = MemoryBlobStore::new();
        save_grid(&grid, &mut store).unwrap();
        assert_eq!(store.get(WIDTHS_KEY).unwrap(), r#"{"0":200.0,"2":75.5}"#);
        assert_eq!(store.get(COLUMNS_KEY).unwrap(), r#"["Task Name","Owner","Due date"]"#);
        assert_eq!(store.get(ROWS_KEY).unwrap(), r#"[["","",""]]"#);
    }

    #[test]
    fn test_save_then_load_restores_grid() {
        let mut grid = GridStore::new();
        grid.add_column("Status").unwrap();
        grid.add_row("Buy milk");
        grid.update_cell(1, 3, "Done").unwrap();
        grid.set_column_width(3, 90.0);
        grid.set_select_all(true);

        let mut store = MemoryBlobStore::new();
        save_grid(&grid, &mut store).unwrap();
        let (restored, report) = load_grid(&store, GridLimits::default());

        assert!(report.is_clean());
        assert_eq!(restored.snapshot(), grid.snapshot());
        assert_eq!(restored.selection().count(), 0);
        assert!(!restored.select_all());
    }

    #[test]
    fn test_malformed_widths_keep_rows_and_columns() {
        let store = stored(r#"["Task Name","Status"]"#, r#"[["Ship","Done"]]"#, "not json");
        let (grid, report) = load_grid(&store, GridLimits::default());

        assert_eq!(report.decode_errors.len(), 1);
        assert_eq!(report.decode_errors[0].key, WIDTHS_KEY);
        assert!(report.reset.is_none());
        assert_eq!(grid.column_labels(), vec!["Task Name", "Status"]);
        assert_eq!(grid.cell(0, 1), Some("Done"));
        assert!(grid.widths().is_empty());
    }

    #[test]
    fn test_infinite_width_survives_reload() {
        let mut grid = GridStore::new();
        grid.set_column_width(0, 200.0);
        grid.set_column_width(1, f32::INFINITY);
        let mut store = MemoryBlobStore::new();
        save_grid(&grid, &mut store).unwrap();
        assert!(!store.get(WIDTHS_KEY).unwrap().contains("null"));

        let (restored, report) = load_grid(&store, GridLimits::default());
        assert!(report.is_clean());
        assert_eq!(restored.widths().get(0), Some(200.0));
        assert_eq!(restored.widths().get(1), Some(f32::MAX));
    }

    #[test]
    fn test_null_width_only_drops_that_column() {
        let store = stored(r#"["A","B"]"#, r#"[["",""]]"#, r#"{"0":200.0,"1":null}"#);
        let (grid, report) = load_grid(&store, GridLimits::default());
        assert!(report.decode_errors.is_empty());
        assert_eq!(grid.widths().get(0), Some(200.0));
        assert_eq!(grid.widths().get(1), None);
        assert_eq!(grid.column_width(1), 150.0);
    }

    #[test]
    fn test_inconsistent_fields_reset_everything() {
        // Columns decode fine but rows do not, so the default one-row matrix
        // no longer matches the stored four columns.
        let store = stored(r#"["A","B","C","D"]"#, "[[1,2]]", r#"{"0":80}"#);
        let (grid, report) = load_grid(&store, GridLimits::default());

        assert_eq!(report.decode_errors.len(), 1);
        assert!(matches!(report.reset, Some(GridError::ShapeMismatch { .. })));
        assert_eq!(grid.snapshot(), GridSnapshot::default());
    }

    #[test]
    fn test_ragged_rows_reset() {
        let store = stored(r#"["A","B"]"#, r#"[["x","y"],["z"]]"#, "{}");
        let (grid, report) = load_grid(&store, GridLimits::default());
        assert_eq!(
            report.reset,
            Some(GridError::ShapeMismatch { row: 1, expected: 2, found: 1 })
        );
        assert_eq!(grid.column_count(), 3);
    }

    #[test]
    fn test_stored_widths_are_clamped_and_trimmed() {
        let store = stored(r#"["A","B"]"#, r#"[["",""]]"#, r#"{"0":10,"1":120,"5":300}"#);
        let (grid, _) = load_grid(&store, GridLimits::default());
        assert_eq!(grid.widths().get(0), Some(50.0));
        assert_eq!(grid.widths().get(1), Some(120.0));
        assert_eq!(grid.widths().get(5), None);
    }

    #[test]
    fn test_update_writes_through() {
        let mut persisted = PersistedGrid::open(MemoryBlobStore::new(), GridLimits::default());
        let row = persisted.update(|grid| grid.add_row("Buy milk"));
        assert_eq!(row, 1);
        assert_eq!(
            persisted.store().get(ROWS_KEY).unwrap(),
            r#"[["","",""],["Buy milk","",""]]"#
        );
        assert!(persisted
            .last_events()
            .contains(&GridEvent::RowAdded { row: 1 }));
    }

    #[test]
    fn test_selection_only_update_does_not_write() {
        let mut persisted = PersistedGrid::open(MemoryBlobStore::new(), GridLimits::default());
        persisted.update(|grid| grid.set_select_all(true));
        assert!(persisted.grid().select_all());
        assert_eq!(persisted.store().get(ROWS_KEY), None);
        assert_eq!(persisted.last_events().len(), 1);
    }

    #[test]
    fn test_rejected_mutation_does_not_write() {
        let mut persisted = PersistedGrid::open(MemoryBlobStore::new(), GridLimits::default());
        let result = persisted.update(|grid| grid.add_column("Owner"));
        assert!(result.is_err());
        assert!(persisted.last_events().is_empty());
        assert!(persisted.store().is_empty());
    }

    struct ReadOnly(MemoryBlobStore);

    impl BlobStore for ReadOnly {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("read-only".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("read-only".into()))
        }
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut persisted = PersistedGrid::open(ReadOnly(MemoryBlobStore::new()), GridLimits::default());
        persisted.update(|grid| grid.add_row("offline"));
        assert_eq!(persisted.grid().row_count(), 2);
        assert!(matches!(persisted.take_write_error(), Some(StoreError::Io(_))));
        assert!(persisted.take_write_error().is_none());
    }

    #[test]
    fn test_clear_grid_returns_to_defaults() {
        let mut persisted = PersistedGrid::open(MemoryBlobStore::new(), GridLimits::default());
        persisted.update(|grid| grid.add_column("Status")).unwrap();
        let (_, mut store) = persisted.into_parts();
        clear_grid(&mut store).unwrap();
        assert!(store.is_empty());

        let (grid, _) = load_grid(&store, GridLimits::default());
        assert_eq!(grid.column_count(), 3);
    }
}
