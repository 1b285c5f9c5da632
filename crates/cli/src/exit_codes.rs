//! CLI Exit Code Registry
//!
//! Single source of truth for `tgrid` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success                                                  |
//! | 1    | General error (unspecified)                              |
//! | 2    | Usage error (bad arguments, empty task name)             |
//! | 3    | Validation (duplicate column, value outside the options) |
//! | 4    | Bounds (row or column does not exist)                    |
//! | 5    | Storage (database could not be opened or written)        |

use taskgrid_engine::GridError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// The grid refused a value: duplicate column label, a value that is not in
/// the column's options, an unparseable date.
pub const EXIT_VALIDATION: u8 = 3;

/// Row or column index outside the grid.
pub const EXIT_BOUNDS: u8 = 4;

/// The blob store could not be opened or written.
pub const EXIT_STORAGE: u8 = 5;

/// Map a grid error to its exit code.
pub fn grid_exit_code(err: &GridError) -> u8 {
    if err.is_bounds() {
        EXIT_BOUNDS
    } else if err.is_validation() {
        EXIT_VALIDATION
    } else {
        EXIT_ERROR
    }
}
