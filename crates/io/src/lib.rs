//! taskgrid-io: where the grid lives between sessions.
//!
//! - [`blob`]: string key-value stores (in-memory and SQLite)
//! - [`persistence`]: encoding the grid into blobs and the write-through
//!   [`PersistedGrid`] wrapper

pub mod blob;
pub mod persistence;

pub use blob::{BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError};
pub use persistence::{
    clear_grid, load_grid, save_grid, DecodeError, LoadReport, PersistedGrid, COLUMNS_KEY,
    ROWS_KEY, WIDTHS_KEY,
};
