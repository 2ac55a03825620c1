use std::collections::BTreeSet;

use crate::color::SeriesColors;
use crate::data::model::LossTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Currently loaded table. Replaced wholesale by File → Open.
    pub table: LossTable,

    /// Names of series hidden from the plot.
    pub hidden: BTreeSet<String>,

    /// Stable per-series colours for the current table.
    pub colors: SeriesColors,

    /// Draw the y = 0 reference line.
    pub show_zero_line: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: LossTable) -> Self {
        let colors = SeriesColors::new(&table);
        Self {
            table,
            hidden: BTreeSet::new(),
            colors,
            show_zero_line: true,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table, resetting visibility and colours.
    pub fn set_table(&mut self, table: LossTable) {
        self.colors = SeriesColors::new(&table);
        self.hidden.clear();
        self.table = table;
        self.status_message = None;
    }

    /// Whether a series is currently drawn.
    pub fn is_visible(&self, name: &str) -> bool {
        !self.hidden.contains(name)
    }

    /// Flip a single series between shown and hidden.
    pub fn toggle_series(&mut self, name: &str) {
        if !self.hidden.remove(name) {
            self.hidden.insert(name.to_string());
        }
    }

    /// Show every series.
    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    /// Hide every series.
    pub fn hide_all(&mut self) {
        self.hidden = self.table.names().map(String::from).collect();
    }

    /// Number of series currently drawn.
    pub fn visible_count(&self) -> usize {
        self.table.names().filter(|&n| self.is_visible(n)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_series_state() -> AppState {
        AppState::new(LossTable::from_columns(vec![
            ("train".to_string(), vec![1.0, 0.5]),
            ("val".to_string(), vec![1.2, 0.8]),
        ]))
    }

    #[test]
    fn all_series_visible_initially() {
        let state = two_series_state();
        assert_eq!(state.visible_count(), 2);
        assert!(state.is_visible("train"));
        assert!(state.is_visible("val"));
    }

    #[test]
    fn toggle_hides_and_shows() {
        let mut state = two_series_state();
        state.toggle_series("train");
        assert!(!state.is_visible("train"));
        assert_eq!(state.visible_count(), 1);
        state.toggle_series("train");
        assert!(state.is_visible("train"));
    }

    #[test]
    fn set_table_resets_visibility() {
        let mut state = two_series_state();
        state.hide_all();
        state.set_table(LossTable::from_columns(vec![(
            "train".to_string(),
            vec![0.1],
        )]));
        assert_eq!(state.visible_count(), 1);
    }
}
