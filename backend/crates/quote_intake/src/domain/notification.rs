//! Quote notification
//!
//! Renders an accepted quote request as the plain-text and HTML bodies of
//! the email sent to dispatch.

use kernel::QuoteSubmission;
use platform::client::ClientAddress;
use platform::html::escape_html;

use crate::domain::entities::ContactDetails;

/// Rendered in place of an absent or empty value
pub const PLACEHOLDER: &str = "-";

const CELL_STYLE: &str = "padding:8px 12px;border:1px solid #E7E5E4;";
const LABEL_STYLE: &str = "font-weight:600;vertical-align:top;";

/// One labelled line of the notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    pub label: &'static str,
    pub value: String,
}

/// The field table of a quote request, in notification order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteNotification {
    rows: Vec<NotificationRow>,
}

impl QuoteNotification {
    pub fn compose(
        submission: &QuoteSubmission,
        contact: &ContactDetails,
        client: &ClientAddress,
    ) -> Self {
        let optional = |value: Option<String>| match value {
            Some(v) if !v.is_empty() => v,
            _ => PLACEHOLDER.to_string(),
        };

        let rows = [
            ("Locale", optional(submission.locale.clone())),
            ("Name", contact.name.clone()),
            ("Phone", contact.phone.clone()),
            ("Email", contact.email.clone()),
            ("Pickup", contact.pickup.clone()),
            ("Dropoff", contact.dropoff.clone()),
            ("Date", optional(submission.date.clone())),
            ("Time", optional(submission.time.clone())),
            (
                "Passengers",
                optional(submission.passengers.as_ref().map(ToString::to_string)),
            ),
            ("Message", optional(submission.message.clone())),
            ("IP", client.to_string()),
        ]
        .into_iter()
        .map(|(label, value)| NotificationRow { label, value })
        .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[NotificationRow] {
        &self.rows
    }

    /// Rendered value of a row, by label
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    /// `Label: value` lines
    pub fn text_body(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("{}: {}", row.label, row.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Bordered table inside a titled wrapper; every label and value escaped
    pub fn html_body(&self) -> String {
        let rows: String = self
            .rows
            .iter()
            .map(|row| {
                format!(
                    r#"<tr><td style="{CELL_STYLE}{LABEL_STYLE}">{}</td><td style="{CELL_STYLE}">{}</td></tr>"#,
                    escape_html(row.label),
                    escape_html(&row.value),
                )
            })
            .collect();

        format!(
            r#"<div style="font-family:Arial,Helvetica,sans-serif;color:#0D0D0D;">
  <h2 style="margin:0 0 16px 0;">New Quote Request</h2>
  <table style="border-collapse:collapse;width:100%;max-width:720px;">{rows}</table>
</div>"#
        )
    }
}
