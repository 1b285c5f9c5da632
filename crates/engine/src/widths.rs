use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;
pub const MIN_COLUMN_WIDTH: f32 = 50.0;

/// Width policy applied by the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLimits {
    /// Width of a column with no stored entry.
    pub default_width: f32,
    /// Floor applied to every stored width.
    pub min_width: f32,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_COLUMN_WIDTH,
            min_width: MIN_COLUMN_WIDTH,
        }
    }
}

impl GridLimits {
    /// Floor `width` at the minimum and keep it finite.
    pub fn clamp(&self, width: f32) -> f32 {
        if width == f32::INFINITY {
            return f32::MAX;
        }
        // f32::max drops NaN, so a NaN width lands on the floor
        width.max(self.min_width)
    }
}

/// Column position -> pixel width. Absent entries use the default width.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnWidths {
    widths: BTreeMap<usize, f32>,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, col: usize) -> Option<f32> {
        self.widths.get(&col).copied()
    }

    pub fn width_or(&self, col: usize, default: f32) -> f32 {
        self.get(col).unwrap_or(default)
    }

    pub(crate) fn insert(&mut self, col: usize, width: f32) {
        self.widths.insert(col, width);
    }

    /// Drop entries for positions at or past `cols`.
    pub(crate) fn truncate(&mut self, cols: usize) {
        self.widths.retain(|col, _| *col < cols);
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn as_map(&self) -> &BTreeMap<usize, f32> {
        &self.widths
    }
}

impl From<BTreeMap<usize, f32>> for ColumnWidths {
    fn from(widths: BTreeMap<usize, f32>) -> Self {
        Self { widths }
    }
}
