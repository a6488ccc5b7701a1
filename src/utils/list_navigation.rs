//! Wrapping selection for the section list.

use ratatui::widgets::ListState;

pub trait ListStateExt {
    /// Select the previous row, wrapping from the first row to the last
    fn select_previous_wrap(&mut self, total_items: usize);

    /// Select the next row, wrapping from the last row to the first
    fn select_next_wrap(&mut self, total_items: usize);

    fn select_first_item(&mut self, total_items: usize);

    fn select_last_item(&mut self, total_items: usize);

    /// Selected row, selecting the first one when nothing is selected
    fn selected_or_first(&mut self, total_items: usize) -> Option<usize>;
}

impl ListStateExt for ListState {
    fn select_previous_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0).min(total_items - 1);
        self.select(Some((current + total_items - 1) % total_items));
    }

    fn select_next_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0).min(total_items - 1);
        self.select(Some((current + 1) % total_items));
    }

    fn select_first_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(0));
        }
    }

    fn select_last_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(total_items - 1));
        }
    }

    fn selected_or_first(&mut self, total_items: usize) -> Option<usize> {
        if total_items == 0 {
            return None;
        }
        if self.selected().is_none_or(|i| i >= total_items) {
            self.select(Some(0));
        }
        self.selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_both_ways() {
        let mut state = ListState::default();
        state.select_previous_wrap(5);
        assert_eq!(state.selected(), Some(4));
        state.select_next_wrap(5);
        assert_eq!(state.selected(), Some(0));
        state.select_next_wrap(5);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn test_empty_list_is_untouched() {
        let mut state = ListState::default();
        state.select_next_wrap(0);
        state.select_last_item(0);
        assert_eq!(state.selected(), None);
        assert_eq!(state.selected_or_first(0), None);
    }

    #[test]
    fn test_selected_or_first_repairs_stale_index() {
        let mut state = ListState::default();
        state.select(Some(9));
        assert_eq!(state.selected_or_first(3), Some(0));
        state.select_last_item(3);
        assert_eq!(state.selected_or_first(3), Some(2));
    }
}
