// Grid commands: each opens the stored grid, applies at most one change
// through the write-through bridge, and reports on stdout.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use taskgrid_config::Settings;
use taskgrid_core::registry::{available_column_types, column_type, AVAILABLE_COLUMN_TYPES};
use taskgrid_core::{CellType, ColumnTypeInfo};
use taskgrid_engine::dispatch::{add_column_via, edit_with};
use taskgrid_engine::{
    commit, render_grid, ColumnPicker, EditOutcome, Editor, GridError, GridStore, PointerEvent,
    ResizeController, ValuePicker,
};
use taskgrid_io::{clear_grid, PersistedGrid, SqliteBlobStore};

use crate::render;
use crate::CliError;

type Grid = PersistedGrid<SqliteBlobStore>;

/// Where settings and the grid database come from for this invocation.
pub struct Context {
    db: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl Context {
    pub fn new(db: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        Self { db, config }
    }

    fn settings_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Settings::config_path)
    }

    fn settings(&self) -> Settings {
        match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        }
    }

    fn db_path(&self, settings: &Settings) -> PathBuf {
        self.db.clone().unwrap_or_else(|| settings.storage_path())
    }

    fn open_store(&self, settings: &Settings) -> Result<SqliteBlobStore, CliError> {
        let path = self.db_path(settings);
        log::debug!("opening grid database {}", path.display());
        SqliteBlobStore::open(&path).map_err(|e| {
            CliError::from(e).with_hint(format!("check that {} is writable", path.display()))
        })
    }

    fn open(&self) -> Result<Grid, CliError> {
        let settings = self.settings();
        let store = self.open_store(&settings)?;
        let grid = PersistedGrid::open(store, settings.grid_limits());
        if let Some(reset) = &grid.load_report().reset {
            eprintln!("note: stored grid was unreadable ({reset}); started from defaults");
        }
        Ok(grid)
    }
}

/// Apply `f` and surface a failed write as a storage error.
fn mutate<R>(grid: &mut Grid, f: impl FnOnce(&mut GridStore) -> R) -> Result<R, CliError> {
    let result = grid.update(f);
    match grid.take_write_error() {
        Some(e) => Err(e.into()),
        None => Ok(result),
    }
}

/// Resolve COLUMN: an exact label, a label ignoring case, or an index.
fn resolve_column(grid: &GridStore, column: &str) -> Result<usize, CliError> {
    let labels = grid.column_labels();
    if let Some(col) = labels.iter().position(|l| l == column) {
        return Ok(col);
    }
    if let Some(col) = labels.iter().position(|l| l.eq_ignore_ascii_case(column.trim())) {
        return Ok(col);
    }
    if let Ok(col) = column.trim().parse::<usize>() {
        if col < grid.column_count() {
            return Ok(col);
        }
        return Err(GridError::ColumnOutOfBounds { col, cols: grid.column_count() }.into());
    }
    Err(CliError::usage(format!("no column named '{column}'"))
        .with_hint(format!("columns: {}", labels.join(", "))))
}

// ============================================================================
// show
// ============================================================================

pub fn cmd_show(ctx: &Context, json: bool, select: &[usize], select_all: bool) -> Result<(), CliError> {
    let mut grid = ctx.open()?;
    mutate(&mut grid, |g| -> Result<(), GridError> {
        if select_all {
            g.set_select_all(true);
        }
        for &row in select {
            g.set_selected(row, true)?;
        }
        Ok(())
    })??;

    let view = render_grid(grid.grid());
    if json {
        let out = serde_json::to_string_pretty(&render::to_json(&view))
            .map_err(|e| CliError::other(e.to_string()))?;
        println!("{out}");
    } else {
        print!("{}", render::to_text(&view));
    }
    Ok(())
}

// ============================================================================
// rows and columns
// ============================================================================

pub fn cmd_add_row(ctx: &Context, text: &str) -> Result<(), CliError> {
    let mut grid = ctx.open()?;
    let row = mutate(&mut grid, |g| g.add_row(text))?;
    println!("added row {row}");
    Ok(())
}

pub fn cmd_add_task(ctx: &Context, name: &str) -> Result<(), CliError> {
    let mut grid = ctx.open()?;
    match mutate(&mut grid, |g| g.submit_task(name))? {
        Some(row) => {
            println!("added row {row}");
            Ok(())
        }
        None => Err(CliError::usage("task name is empty")),
    }
}

/// Picks the column type named on the command line, if it is still offered.
struct TypeChoice<'a>(&'a ColumnTypeInfo);

impl ColumnPicker for TypeChoice<'_> {
    fn choose(&mut self, _existing: &[String], available: &[&'static ColumnTypeInfo]) -> Option<String> {
        available
            .iter()
            .find(|info| info.id == self.0.id)
            .map(|info| info.label.to_string())
    }
}

pub fn cmd_add_column(ctx: &Context, label: Option<String>, kind: Option<String>) -> Result<(), CliError> {
    let mut grid = ctx.open()?;

    let added = match (label, kind) {
        (Some(label), _) => mutate(&mut grid, |g| g.add_column(&label))??,
        (None, Some(kind)) => {
            let info = column_type(&kind).ok_or_else(|| {
                let ids: Vec<&str> = AVAILABLE_COLUMN_TYPES.iter().map(|t| t.id).collect();
                CliError::usage(format!("unknown column type '{kind}'"))
                    .with_hint(format!("types: {}", ids.join(", ")))
            })?;
            mutate(&mut grid, |g| add_column_via(g, &mut TypeChoice(info)))??.ok_or_else(|| {
                CliError::validation(format!("a {} column already exists", info.label))
                    .with_hint("see `tgrid types` for what can still be added")
            })?
        }
        (None, None) => return Err(CliError::usage("give a column label or --type")),
    };

    let g = grid.grid();
    let cell_type = g.cell_type(added).unwrap_or_default();
    println!("added column {added} '{}' ({cell_type})", g.columns()[added].label());
    Ok(())
}

// ============================================================================
// cells
// ============================================================================

/// Hands a value that was already chosen on the command line to an
/// external-editor cell.
struct Supplied(String);

impl ValuePicker for Supplied {
    fn pick(&mut self, _cell_type: CellType, _current: &str) -> Option<String> {
        Some(std::mem::take(&mut self.0))
    }
}

/// Accepts YYYY-MM-DD or MM/DD/YYYY; stores YYYY-MM-DD. Empty clears.
fn parse_date(input: &str) -> Result<String, CliError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| CliError::validation(format!("'{input}' is not a date")).with_hint("use YYYY-MM-DD"))
}

pub fn cmd_set(ctx: &Context, row: usize, column: &str, value: &str) -> Result<(), CliError> {
    let mut grid = ctx.open()?;
    let col = resolve_column(grid.grid(), column)?;
    grid.grid().check_bounds(row, col)?;

    let cell_type = grid.grid().cell_type(col).unwrap_or_default();
    let current = grid.grid().cell(row, col).unwrap_or_default().to_string();
    let editor = Editor::for_cell(cell_type, &current);

    let outcome = if editor.is_external() {
        let value = match cell_type {
            CellType::Date => parse_date(value)?,
            _ => value.to_string(),
        };
        mutate(&mut grid, |g| edit_with(g, row, col, &mut Supplied(value)))??
    } else {
        mutate(&mut grid, |g| commit(g, row, col, value))??
    };

    match outcome {
        EditOutcome::Applied => {
            let stored = grid.grid().cell(row, col).unwrap_or_default();
            println!("row {row}, {}: {stored:?}", grid.grid().columns()[col].label());
            Ok(())
        }
        EditOutcome::Rejected => Err(CliError::validation(format!(
            "'{value}' is not a {cell_type} option"
        ))
        .with_hint(format!("options: {}", editor.options().join(", ")))),
        EditOutcome::Cancelled => Ok(()),
    }
}

// ============================================================================
// widths
// ============================================================================

pub fn cmd_width(ctx: &Context, column: &str, px: f32) -> Result<(), CliError> {
    let mut grid = ctx.open()?;
    let col = resolve_column(grid.grid(), column)?;
    let width = mutate(&mut grid, |g| g.set_column_width(col, px))?;
    println!("{}: {width}px", grid.grid().columns()[col].label());
    Ok(())
}

pub fn cmd_resize(ctx: &Context, column: &str, from: f32, to: &[f32]) -> Result<(), CliError> {
    let mut grid = ctx.open()?;
    let col = resolve_column(grid.grid(), column)?;

    let mut resize = ResizeController::new();
    let width = mutate(&mut grid, |g| {
        resize.handle(g, PointerEvent::Down { border: col, x: from });
        for &x in to {
            resize.handle(g, PointerEvent::Move { x });
            log::debug!("drag to {x}: width {}", g.column_width(col));
        }
        resize.handle(g, PointerEvent::Up);
        g.column_width(col)
    })?;
    println!("{}: {width}px", grid.grid().columns()[col].label());
    Ok(())
}

// ============================================================================
// types, reset, paths
// ============================================================================

#[derive(Serialize)]
struct TypeEntry {
    id: &'static str,
    label: &'static str,
    accent: String,
}

pub fn cmd_types(ctx: &Context, json: bool) -> Result<(), CliError> {
    let grid = ctx.open()?;
    let labels = grid.grid().column_labels();
    let available = available_column_types(&labels[..]);

    if json {
        let entries: Vec<TypeEntry> = available
            .iter()
            .map(|info| TypeEntry {
                id: info.id,
                label: info.label,
                accent: info.accent_color().to_css(),
            })
            .collect();
        let out = serde_json::to_string_pretty(&entries).map_err(|e| CliError::other(e.to_string()))?;
        println!("{out}");
    } else {
        for info in available {
            println!("{:<8} {:<8} {}", info.id, info.label, info.accent_color().to_css());
        }
    }
    Ok(())
}

pub fn cmd_reset(ctx: &Context) -> Result<(), CliError> {
    let settings = ctx.settings();
    let mut store = ctx.open_store(&settings)?;
    clear_grid(&mut store)?;
    println!("grid reset");
    Ok(())
}

pub fn cmd_paths(ctx: &Context) -> Result<(), CliError> {
    let settings = ctx.settings();
    println!("settings: {}", ctx.settings_path().display());
    println!("database: {}", ctx.db_path(&settings).display());
    Ok(())
}
