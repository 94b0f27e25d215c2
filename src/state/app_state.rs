//! Application state definitions

use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Aliases,
    Profile,
}

impl View {
    pub const ALL: [View; 2] = [View::Aliases, View::Profile];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Aliases => "Aliases",
            Self::Profile => "Profile",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Selection
    pub selected_index: usize,
    pub namespace_index: usize,

    // Messages
    errors: VecDeque<String>,
    pub status_message: Option<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    pub fn next_namespace(&mut self, count: usize) {
        if count > 0 {
            self.namespace_index = (self.namespace_index + 1) % count;
            self.reset_selection();
        }
    }

    pub fn prev_namespace(&mut self, count: usize) {
        if count > 0 {
            self.namespace_index = (self.namespace_index + count - 1) % count;
            self.reset_selection();
        }
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_view_is_aliases() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Aliases);
        assert_eq!(View::Profile.label(), "Profile");
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_move_within_bounds() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
            state.move_selection_down(0);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_clamp_after_delete() {
            let mut state = AppState {
                selected_index: 4,
                ..Default::default()
            };
            state.clamp_selection(2);
            assert_eq!(state.selected_index, 1);
            state.clamp_selection(0);
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_namespace_cycling_wraps_and_resets() {
            let mut state = AppState {
                selected_index: 3,
                ..Default::default()
            };
            state.prev_namespace(3);
            assert_eq!(state.namespace_index, 2);
            assert_eq!(state.selected_index, 0);
            state.next_namespace(3);
            assert_eq!(state.namespace_index, 0);
            state.next_namespace(0);
            assert_eq!(state.namespace_index, 0);
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_shown_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first");
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }
}
