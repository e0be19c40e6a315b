//! Request/response panel state for the in-place balance check.
//!
//! DESIGN
//! ======
//! The page shows exactly one of two panels. Submitting clears any earlier
//! result and flips to the response panel with a loading line; the server's
//! answer either fills in the amount or sends the customer back to the
//! request panel with an alert. Only [`BalanceCheckState::begin_submit`] and
//! [`BalanceCheckState::finish`] move between panels.

#[cfg(test)]
#[path = "balance_test.rs"]
mod balance_test;

use crate::net::types::BalanceOutcome;
use crate::util::money::format_balance;

pub const LOADING_TEXT: &str = "\u{23F3} Fetching balance...";
pub const GENERIC_FAILURE: &str = "Something went wrong. Try again.";
pub const BALANCE_HEADING: &str = "Your current balance is";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Request,
    Response,
}

/// Content of the response panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum BalanceView {
    #[default]
    Empty,
    Loading,
    Balance(f64),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceCheckState {
    pub panel: Panel,
    pub view: BalanceView,
    /// Alert text shown above the form after a failed check.
    pub alert: Option<String>,
}

impl BalanceCheckState {
    /// Clear the previous result, show the loading line, swap panels.
    pub fn begin_submit(&mut self) {
        self.alert = None;
        self.view = BalanceView::Loading;
        self.panel = Panel::Response;
    }

    /// Apply the result of the request. `Err` covers transport and parse
    /// failures; the caller has already logged the detail.
    pub fn finish(&mut self, result: Result<BalanceOutcome, String>) {
        match result {
            Ok(BalanceOutcome::Balance(amount)) => {
                self.view = BalanceView::Balance(amount);
                self.panel = Panel::Response;
            }
            Ok(BalanceOutcome::Error(message)) => self.fail(message),
            Err(_) => self.fail(GENERIC_FAILURE.to_owned()),
        }
    }

    fn fail(&mut self, message: String) {
        self.view = BalanceView::Empty;
        self.alert = Some(message);
        self.panel = Panel::Request;
    }

    #[must_use]
    pub fn request_visible(&self) -> bool {
        self.panel == Panel::Request
    }

    #[must_use]
    pub fn response_visible(&self) -> bool {
        self.panel == Panel::Response
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.view == BalanceView::Loading
    }

    /// Formatted amount once the server has answered with a balance.
    #[must_use]
    pub fn formatted_balance(&self) -> Option<String> {
        match self.view {
            BalanceView::Balance(amount) => Some(format_balance(amount)),
            _ => None,
        }
    }

    /// Text the customer can currently see, newline separated.
    #[must_use]
    pub fn rendered_text(&self) -> String {
        let mut lines = Vec::new();
        match self.panel {
            Panel::Request => {
                if let Some(alert) = &self.alert {
                    lines.push(alert.clone());
                }
            }
            Panel::Response => match &self.view {
                BalanceView::Empty => {}
                BalanceView::Loading => lines.push(LOADING_TEXT.to_owned()),
                BalanceView::Balance(amount) => {
                    lines.push(BALANCE_HEADING.to_owned());
                    lines.push(format_balance(*amount));
                }
            },
        }
        lines.join("\n")
    }
}
