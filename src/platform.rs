//! Platform-specific key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Platform-appropriate command modifier
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display for help text.
/// Ctrl+S works on all platforms; Cmd+S also works where the terminal forwards it.
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

pub const RESET_SHORTCUT: &str = "Ctrl+R";

/// Whether `key` is Ctrl+`c` (or the platform command modifier + `c`)
pub fn is_command(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c)
        && (key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(COMMAND_MODIFIER))
}
