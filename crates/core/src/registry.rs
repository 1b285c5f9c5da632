//! Column registry: the column types a user can add, and the lookups that
//! map a column label to its behavior.

use crate::catalogue::{Catalogue, LABEL_OPTIONS, STATUS_OPTIONS};
use crate::cell_type::CellType;
use crate::Color;

/// Display metadata for an addable column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeInfo {
    /// Stable identifier (lowercase).
    pub id: &'static str,
    /// Label given to the new column; also what the resolver matches on.
    pub label: &'static str,
    /// Icon accent color (0xRRGGBB).
    pub accent: u32,
}

impl ColumnTypeInfo {
    pub fn cell_type(&self) -> CellType {
        CellType::from_label(self.label)
    }

    pub fn accent_color(&self) -> Color {
        Color::from_hex(self.accent)
    }
}

/// Column types offered by the "add column" chooser, in menu order.
pub const AVAILABLE_COLUMN_TYPES: &[ColumnTypeInfo] = &[
    ColumnTypeInfo { id: "status", label: "Status", accent: 0x4ADE80 },
    ColumnTypeInfo { id: "text", label: "Text", accent: 0xFDE047 },
    ColumnTypeInfo { id: "people", label: "People", accent: 0x60A5FA },
    ColumnTypeInfo { id: "label", label: "Label", accent: 0xC084FC },
    ColumnTypeInfo { id: "date", label: "Date", accent: 0xC084FC },
    ColumnTypeInfo { id: "numbers", label: "Numbers", accent: 0xFACC15 },
];

/// Resolve a column label to its cell type.
pub fn type_of(label: &str) -> CellType {
    CellType::from_label(label)
}

/// Option catalogue for single-select types; `Catalogue::None` otherwise.
pub fn catalogue_for(cell_type: CellType) -> Catalogue {
    match cell_type {
        CellType::Status => Catalogue::Status(STATUS_OPTIONS),
        CellType::Label => Catalogue::Label(LABEL_OPTIONS),
        _ => Catalogue::None,
    }
}

/// Look up an addable column type by id (case-insensitive).
pub fn column_type(id: &str) -> Option<&'static ColumnTypeInfo> {
    let id = id.trim();
    AVAILABLE_COLUMN_TYPES
        .iter()
        .find(|info| info.id.eq_ignore_ascii_case(id) || info.label.eq_ignore_ascii_case(id))
}

/// Column types not already present among `existing_labels`.
///
/// Comparison is case-insensitive on the label, so an existing "status"
/// column hides the "Status" choice.
pub fn available_column_types<S: AsRef<str>>(existing_labels: &[S]) -> Vec<&'static ColumnTypeInfo> {
    AVAILABLE_COLUMN_TYPES
        .iter()
        .filter(|info| {
            !existing_labels
                .iter()
                .any(|label| label.as_ref().trim().eq_ignore_ascii_case(info.label))
        })
        .collect()
}

/// Class-style slug for a column label: lowercase, whitespace runs -> `-`.
pub fn column_slug(label: &str) -> String {
    label
        .split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
