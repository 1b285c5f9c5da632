//! `taskgrid-core`: cell types, the column registry and option catalogues.
//!
//! Pure lookup crate: no state, no IO.

pub mod catalogue;
pub mod cell_type;
pub mod registry;

pub use catalogue::{Catalogue, LabelOption, StatusOption, Swatch, LABEL_OPTIONS, STATUS_OPTIONS};
pub use cell_type::CellType;
pub use registry::{catalogue_for, type_of, ColumnTypeInfo, AVAILABLE_COLUMN_TYPES};

/// Framework-agnostic RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);

    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert from hex u32 (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b, a: 1.0 }
    }

    /// Convert back to hex u32 (0xRRGGBB), ignoring alpha
    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| ((v.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xFF;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// CSS-style `#RRGGBB` string
    pub fn to_css(&self) -> String {
        format!("#{:06X}", self.to_hex())
    }
}
