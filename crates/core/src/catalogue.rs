//! Static option catalogues backing single-select columns.
//!
//! An option's `value` is both its canonical key (what the cell stores) and
//! its display text. `color_token` names the visual category; [`Swatch`]
//! turns it into concrete colors.

use crate::Color;

/// One entry of the Status catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub value: &'static str,
    pub color_token: &'static str,
}

/// One entry of the Label catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelOption {
    pub value: &'static str,
    pub color_token: &'static str,
}

pub const STATUS_OPTIONS: &[StatusOption] = &[
    StatusOption { value: "Done", color_token: "done" },
    StatusOption { value: "Working on it", color_token: "working" },
    StatusOption { value: "Not started", color_token: "idle" },
    StatusOption { value: "Stuck", color_token: "stuck" },
];

pub const LABEL_OPTIONS: &[LabelOption] = &[
    LabelOption { value: "Label", color_token: "neutral" },
    LabelOption { value: "Feature", color_token: "blue" },
    LabelOption { value: "Research", color_token: "purple" },
];

/// Background/foreground pair for a filled cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub background: Color,
    pub foreground: Color,
}

const DARK_TEXT: u32 = 0x1F2937;

fn status_fill(token: &str) -> Option<u32> {
    match token {
        "done" => Some(0x00C875),
        "working" => Some(0xFDAB3D),
        "idle" => Some(0xC4C4C4),
        "stuck" => Some(0xDF2F4A),
        _ => None,
    }
}

fn label_fill(token: &str) -> Option<u32> {
    match token {
        "neutral" => Some(0xC4C4C4),
        "blue" => Some(0x3B82F6),
        "purple" => Some(0xA855F7),
        _ => None,
    }
}

/// The option list for a column, chosen by its cell type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalogue {
    Status(&'static [StatusOption]),
    Label(&'static [LabelOption]),
    None,
}

impl Catalogue {
    pub fn is_none(&self) -> bool {
        matches!(self, Catalogue::None)
    }

    pub fn len(&self) -> usize {
        match self {
            Catalogue::Status(options) => options.len(),
            Catalogue::Label(options) => options.len(),
            Catalogue::None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Option keys in catalogue order.
    pub fn values(&self) -> Vec<&'static str> {
        match self {
            Catalogue::Status(options) => options.iter().map(|o| o.value).collect(),
            Catalogue::Label(options) => options.iter().map(|o| o.value).collect(),
            Catalogue::None => Vec::new(),
        }
    }

    /// Exact (case-sensitive) key membership.
    pub fn contains(&self, value: &str) -> bool {
        self.color_token(value).is_some()
    }

    pub fn color_token(&self, value: &str) -> Option<&'static str> {
        match self {
            Catalogue::Status(options) => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.color_token),
            Catalogue::Label(options) => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.color_token),
            Catalogue::None => None,
        }
    }

    /// Colors for a cell holding `value`, or `None` when the value is empty
    /// or not in the catalogue (the cell keeps its default background).
    pub fn swatch(&self, value: &str) -> Option<Swatch> {
        let token = self.color_token(value)?;
        match self {
            Catalogue::Status(_) => status_fill(token).map(|bg| Swatch {
                background: Color::from_hex(bg),
                foreground: Color::WHITE,
            }),
            Catalogue::Label(_) => label_fill(token).map(|bg| Swatch {
                background: Color::from_hex(bg),
                foreground: if token == "neutral" {
                    Color::from_hex(DARK_TEXT)
                } else {
                    Color::WHITE
                },
            }),
            Catalogue::None => None,
        }
    }
}
