//! Open/closed state of the navigation menu.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

/// Class the menu panel always carries.
pub const MENU_OPTIONS_CLASS: &str = "menu-options";
/// Class added to the menu panel while it is open.
pub const MENU_OPEN_CLASS: &str = "show-menu-options";

/// Whether the navigation menu panel is shown. Starts closed on every load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    /// Flip between shown and hidden.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Class list for the menu panel element.
    #[must_use]
    pub fn options_class(self) -> &'static str {
        if self.open { "menu-options show-menu-options" } else { MENU_OPTIONS_CLASS }
    }
}
