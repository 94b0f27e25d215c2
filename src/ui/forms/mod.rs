//! Form rendering module
//!
//! - `field_renderer`: bordered field boxes with cursor and inline errors

mod field_renderer;

pub use field_renderer::{draw_field, draw_field_with_value, draw_help_text};
