use std::fmt;

use serde::{Deserialize, Serialize};

/// The editing behavior a column's values follow.
///
/// Resolved once from the column label; everything downstream switches on
/// the variant and never re-reads the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Status,
    Label,
    Numbers,
    Date,
    Person,
    Text,
    /// Fallback for labels that name no known type.
    #[default]
    Plain,
}

impl CellType {
    pub const ALL: [CellType; 7] = [
        CellType::Status,
        CellType::Label,
        CellType::Numbers,
        CellType::Date,
        CellType::Person,
        CellType::Text,
        CellType::Plain,
    ];

    /// Resolve a column label to its cell type.
    ///
    /// Case-insensitive. Leading/trailing whitespace is ignored and inner
    /// whitespace runs compare as a single space, so `" Due   DATE "` is a
    /// date column. Never fails: anything unmatched is `Plain`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match normalized.as_str() {
            "status" => CellType::Status,
            "label" => CellType::Label,
            "numbers" => CellType::Numbers,
            "date" | "due date" => CellType::Date,
            "owner" | "people" => CellType::Person,
            "text" => CellType::Text,
            _ => CellType::Plain,
        }
    }

    /// Single-select from a fixed option catalogue.
    pub fn is_select(&self) -> bool {
        matches!(self, CellType::Status | CellType::Label)
    }

    /// Editing is delegated to an external picker widget.
    pub fn uses_external_editor(&self) -> bool {
        matches!(self, CellType::Date | CellType::Person)
    }

    /// Free-form or numeric entry edited inline.
    pub fn is_inline_entry(&self) -> bool {
        matches!(self, CellType::Numbers | CellType::Text | CellType::Plain)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CellType::Status => "status",
            CellType::Label => "label",
            CellType::Numbers => "numbers",
            CellType::Date => "date",
            CellType::Person => "person",
            CellType::Text => "text",
            CellType::Plain => "plain",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_labels() {
        assert_eq!(CellType::from_label("Status"), CellType::Status);
        assert_eq!(CellType::from_label("Label"), CellType::Label);
        assert_eq!(CellType::from_label("Numbers"), CellType::Numbers);
        assert_eq!(CellType::from_label("Date"), CellType::Date);
        assert_eq!(CellType::from_label("Due date"), CellType::Date);
        assert_eq!(CellType::from_label("Owner"), CellType::Person);
        assert_eq!(CellType::from_label("People"), CellType::Person);
        assert_eq!(CellType::from_label("Text"), CellType::Text);
        assert_eq!(CellType::from_label("Task Name"), CellType::Plain);
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(CellType::from_label("Due Date"), CellType::Date);
        assert_eq!(CellType::from_label("people"), CellType::Person);
        assert_eq!(CellType::from_label("NUMBERS"), CellType::Numbers);
        assert_eq!(CellType::from_label("random"), CellType::Plain);
    }

    #[test]
    fn test_resolution_ignores_surrounding_and_repeated_whitespace() {
        assert_eq!(CellType::from_label("  status "), CellType::Status);
        assert_eq!(CellType::from_label("due   date"), CellType::Date);
        assert_eq!(CellType::from_label("\tDue\nDate"), CellType::Date);
        // Whitespace inside a keyword is not forgiven
        assert_eq!(CellType::from_label("sta tus"), CellType::Plain);
        assert_eq!(CellType::from_label("duedate"), CellType::Plain);
    }

    #[test]
    fn test_empty_label_is_plain() {
        assert_eq!(CellType::from_label(""), CellType::Plain);
        assert_eq!(CellType::from_label("   "), CellType::Plain);
    }

    #[test]
    fn test_editor_families_are_disjoint() {
        for t in CellType::ALL {
            let families = [t.is_select(), t.uses_external_editor(), t.is_inline_entry()];
            assert_eq!(families.iter().filter(|f| **f).count(), 1, "{t}");
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&CellType::Numbers).unwrap(), "\"numbers\"");
        let parsed: CellType = serde_json::from_str("\"person\"").unwrap();
        assert_eq!(parsed, CellType::Person);
    }
}
