//! Masking mode of a password input and its reveal-button glyph.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

/// Glyph shown while the password is masked (click to show).
pub const SHOW_GLYPH: &str = "\u{1F441}\u{FE0F}";
/// Glyph shown while the password is readable (click to hide).
pub const HIDE_GLYPH: &str = "\u{1F648}";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PasswordVisibility {
    #[default]
    Masked,
    Plain,
}

impl PasswordVisibility {
    pub fn toggle(&mut self) {
        *self = match self {
            PasswordVisibility::Masked => PasswordVisibility::Plain,
            PasswordVisibility::Plain => PasswordVisibility::Masked,
        };
    }

    /// Value for the input's `type` attribute.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            PasswordVisibility::Masked => "password",
            PasswordVisibility::Plain => "text",
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            PasswordVisibility::Masked => SHOW_GLYPH,
            PasswordVisibility::Plain => HIDE_GLYPH,
        }
    }

    /// Accessible label for the reveal button.
    #[must_use]
    pub fn button_label(self) -> &'static str {
        match self {
            PasswordVisibility::Masked => "Show password",
            PasswordVisibility::Plain => "Hide password",
        }
    }
}
