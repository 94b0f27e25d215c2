//! Reusable UI components

mod button;
mod dialog;

pub use button::{Button, ButtonState, BUTTON_HEIGHT};
pub use dialog::{centered_rect, render_confirm_dialog, render_error_dialog};
