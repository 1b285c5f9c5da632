/// Per-row selection flags plus the aggregate "select all" flag.
///
/// `select_all` is derived: every single-row change recomputes it as the
/// AND of all flags. Only [`Selection::set_all`] writes it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<bool>,
    select_all: bool,
}

impl Selection {
    /// All rows unselected.
    pub fn new(rows: usize) -> Self {
        Self {
            selected: vec![false; rows],
            select_all: false,
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn flags(&self) -> &[bool] {
        &self.selected
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.get(row).copied().unwrap_or(false)
    }

    pub fn select_all(&self) -> bool {
        self.select_all
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    pub fn selected_rows(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.then_some(i))
            .collect()
    }

    /// Set one row's flag. Returns false if `row` is out of range.
    pub fn set(&mut self, row: usize, checked: bool) -> bool {
        match self.selected.get_mut(row) {
            Some(flag) => {
                *flag = checked;
                self.recompute();
                true
            }
            None => false,
        }
    }

    /// Flip one row's flag, returning the new value.
    pub fn toggle(&mut self, row: usize) -> Option<bool> {
        let checked = !*self.selected.get(row)?;
        self.set(row, checked);
        Some(checked)
    }

    /// Bulk toggle: every flag and `select_all` take `checked` directly.
    pub fn set_all(&mut self, checked: bool) {
        self.selected.iter_mut().for_each(|flag| *flag = checked);
        self.select_all = checked;
    }

    /// Rebuild for a new row count. Nothing stays selected.
    pub fn reset(&mut self, rows: usize) {
        self.selected = vec![false; rows];
        self.select_all = false;
    }

    fn recompute(&mut self) {
        self.select_all = self.selected.iter().all(|s| *s);
    }
}
