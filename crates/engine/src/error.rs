use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// A column with this exact label already exists.
    DuplicateColumn { label: String },
    /// Row index past the end of the grid.
    RowOutOfBounds { row: usize, rows: usize },
    /// Column index past the end of the grid.
    ColumnOutOfBounds { col: usize, cols: usize },
    /// A restored row does not have one cell per column.
    ShapeMismatch { row: usize, expected: usize, found: usize },
    /// A restored grid has no columns.
    NoColumns,
}

impl GridError {
    /// Rejected user input: report it, the grid is unchanged.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::DuplicateColumn { .. })
    }

    /// Caller addressed a cell that does not exist: a contract violation.
    pub fn is_bounds(&self) -> bool {
        matches!(self, Self::RowOutOfBounds { .. } | Self::ColumnOutOfBounds { .. })
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateColumn { label } => write!(f, "column '{label}' already exists"),
            Self::RowOutOfBounds { row, rows } => {
                write!(f, "row {row} is out of bounds (grid has {rows} row(s))")
            }
            Self::ColumnOutOfBounds { col, cols } => {
                write!(f, "column {col} is out of bounds (grid has {cols} column(s))")
            }
            Self::ShapeMismatch { row, expected, found } => {
                write!(f, "row {row} has {found} cell(s), expected {expected}")
            }
            Self::NoColumns => write!(f, "grid has no columns"),
        }
    }
}

impl std::error::Error for GridError {}
