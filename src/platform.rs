//! Platform-specific keyboard shortcut labels

/// Save shortcut display for form help text
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Quit shortcut display
pub const QUIT_SHORTCUT: &str = "Ctrl+C";
