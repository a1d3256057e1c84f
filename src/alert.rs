//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts are rendered as htmx out-of-band swaps into the fixed
//! `#alert-container` element on every page, so any endpoint can respond with
//! one regardless of which page issued the request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Alert message types for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders alert messages with appropriate styling.
#[derive(Debug, Clone)]
pub struct AlertTemplate {
    pub alert_type: AlertType,
    pub message: String,
    pub details: String,
}

impl AlertTemplate {
    /// Create a new success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_markup(self) -> Markup {
        let (container_style, heading_style) = match self.alert_type {
            AlertType::Success => (
                "p-4 mb-4 rounded-lg bg-green-50 dark:bg-gray-800 border border-green-300",
                "font-semibold text-green-800 dark:text-green-400",
            ),
            AlertType::Error => (
                "p-4 mb-4 rounded-lg bg-red-50 dark:bg-gray-800 border border-red-300",
                "font-semibold text-red-800 dark:text-red-400",
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    p class=(heading_style) { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm text-gray-700 dark:text-gray-300" { (self.details) }
                    }
                }
            }
        }
    }

    /// Render the alert as an HTML response with `status_code`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_markup()).into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use axum::http::StatusCode;

    use super::AlertTemplate;

    #[test]
    fn error_alert_renders_message_and_details() {
        let markup = AlertTemplate::error("Something failed", "Try again.").into_markup();

        let html = markup.into_string();
        assert!(html.contains("Something failed"));
        assert!(html.contains("Try again."));
        assert!(html.contains("hx-swap-oob"));
    }

    #[test]
    fn success_alert_omits_empty_details() {
        let html = AlertTemplate::success("Saved", "").into_markup().into_string();

        assert!(html.contains("Saved"));
        assert!(!html.contains("text-gray-700"));
    }

    #[test]
    fn response_carries_the_status_code() {
        let response = AlertTemplate::error("Nope", "")
            .into_response_with_status(StatusCode::BAD_REQUEST);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
