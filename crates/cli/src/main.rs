// tgrid - task grid from the command line
// Every mutating command loads the grid, applies one change and writes it back.

mod exit_codes;
mod grid_ops;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use taskgrid_engine::GridError;
use taskgrid_io::StoreError;

use exit_codes::{grid_exit_code, EXIT_ERROR, EXIT_STORAGE, EXIT_SUCCESS, EXIT_USAGE, EXIT_VALIDATION};

#[derive(Parser)]
#[command(name = "tgrid")]
#[command(about = "Task grid: typed columns, selectable rows, resizable widths")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Grid database (overrides storage.path in settings)
    #[arg(long, global = true, env = "TGRID_DB")]
    db: Option<PathBuf>,

    /// Settings file (defaults to <config_dir>/taskgrid/settings.json)
    #[arg(long, global = true, env = "TGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nbuild:   ", env!("TGRID_PROFILE"),
        "\ntarget:  ", env!("TARGET"),
    )
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid
    #[command(after_help = "\
Selection is not stored; --select and --select-all apply to this view only.

Examples:
  tgrid show
  tgrid show --select 0 --select 2
  tgrid show --json")]
    Show {
        /// Output JSON (headers, rows, colors, editor options)
        #[arg(long)]
        json: bool,

        /// Mark a row as selected. Repeatable.
        #[arg(long, value_name = "ROW")]
        select: Vec<usize>,

        /// Tick the header checkbox (selects every row)
        #[arg(long)]
        select_all: bool,
    },

    /// Append a row whose first cell is TEXT (other cells empty)
    AddRow {
        #[arg(default_value = "")]
        text: String,
    },

    /// Append a task; the name is trimmed and must not be empty
    AddTask { name: String },

    /// Append a column by label or by type id
    #[command(after_help = "\
Examples:
  tgrid add-column Status
  tgrid add-column --type numbers
  tgrid add-column 'Review notes'")]
    AddColumn {
        /// Column label (type is inferred from it)
        #[arg(required_unless_present = "kind", conflicts_with = "kind")]
        label: Option<String>,

        /// Pick one of the available column types (see `tgrid types`)
        #[arg(long = "type", value_name = "ID")]
        kind: Option<String>,
    },

    /// Set a cell through its column's editor
    #[command(after_help = "\
COLUMN is a zero-based index or a column label.
Status and Label cells only accept their options (or an empty value).
Numbers cells store the trimmed number; anything else clears the cell.
Date cells accept YYYY-MM-DD or MM/DD/YYYY and store YYYY-MM-DD.

Examples:
  tgrid set 0 Status Done
  tgrid set 1 3 'Working on it'
  tgrid set 0 'Due date' 2024-05-01")]
    Set {
        row: usize,
        column: String,
        value: String,
    },

    /// Empty a cell
    Clear { row: usize, column: String },

    /// Set a column's width in pixels (clamped to the minimum)
    Width { column: String, px: f32 },

    /// Replay a border drag: press at --from, move through each --to, release
    #[command(after_help = "\
Example:
  tgrid resize Owner --from 300 --to 320 --to 360")]
    Resize {
        column: String,

        #[arg(long)]
        from: f32,

        /// Pointer positions while dragging. Repeatable.
        #[arg(long, required = true)]
        to: Vec<f32>,
    },

    /// List column types that can still be added
    Types {
        #[arg(long)]
        json: bool,
    },

    /// Delete the stored grid (next run starts from the defaults)
    Reset,

    /// Show the settings and database locations in use
    Paths,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self { code: EXIT_VALIDATION, message: msg.into(), hint: None }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_STORAGE, message: msg.into(), hint: None }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<GridError> for CliError {
    fn from(err: GridError) -> Self {
        Self { code: grid_exit_code(&err), message: err.to_string(), hint: None }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::storage(err.to_string())
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    // A second init (tests) is harmless.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = grid_ops::Context::new(cli.db, cli.config);
    let result = match cli.command {
        Commands::Show { json, select, select_all } => grid_ops::cmd_show(&ctx, json, &select, select_all),
        Commands::AddRow { text } => grid_ops::cmd_add_row(&ctx, &text),
        Commands::AddTask { name } => grid_ops::cmd_add_task(&ctx, &name),
        Commands::AddColumn { label, kind } => grid_ops::cmd_add_column(&ctx, label, kind),
        Commands::Set { row, column, value } => grid_ops::cmd_set(&ctx, row, &column, &value),
        Commands::Clear { row, column } => grid_ops::cmd_set(&ctx, row, &column, ""),
        Commands::Width { column, px } => grid_ops::cmd_width(&ctx, &column, px),
        Commands::Resize { column, from, to } => grid_ops::cmd_resize(&ctx, &column, from, &to),
        Commands::Types { json } => grid_ops::cmd_types(&ctx, json),
        Commands::Reset => grid_ops::cmd_reset(&ctx),
        Commands::Paths => grid_ops::cmd_paths(&ctx),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
