//! Form state
//!
//! Raw input values, the messages currently shown, and where the form is
//! in its lifecycle: `Editing -> Submitting -> Success`, or back to
//! `Editing` with a message.

use kernel::rules::{QuoteDraft, RequiredField};
use kernel::{Passengers, QuoteSubmission};

use crate::fields::FormField;
use crate::locale::Locale;

/// Input values exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub pickup: String,
    pub dropoff: String,
    pub date: String,
    pub time: String,
    pub passengers: String,
    pub message: String,
    pub company: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::Passengers => &self.passengers,
            FormField::Pickup => &self.pickup,
            FormField::Dropoff => &self.dropoff,
            FormField::Date => &self.date,
            FormField::Time => &self.time,
            FormField::Message => &self.message,
            FormField::Company => &self.company,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Phone => &mut self.phone,
            FormField::Email => &mut self.email,
            FormField::Passengers => &mut self.passengers,
            FormField::Pickup => &mut self.pickup,
            FormField::Dropoff => &mut self.dropoff,
            FormField::Date => &mut self.date,
            FormField::Time => &mut self.time,
            FormField::Message => &mut self.message,
            FormField::Company => &mut self.company,
        };
        *slot = value;
    }

    /// Request body for the endpoint
    ///
    /// Values are sent untrimmed. `passengers` goes out as a number when the
    /// input parses as one and is left out otherwise.
    pub fn to_submission(&self, locale: Locale) -> QuoteSubmission {
        QuoteSubmission {
            name: Some(self.name.clone()),
            phone: Some(self.phone.clone()),
            email: Some(self.email.clone()),
            pickup: Some(self.pickup.clone()),
            dropoff: Some(self.dropoff.clone()),
            date: Some(self.date.clone()),
            time: Some(self.time.clone()),
            passengers: parse_passengers(&self.passengers),
            message: Some(self.message.clone()),
            company: Some(self.company.clone()),
            locale: Some(locale.as_str().to_string()),
        }
    }
}

fn parse_passengers(input: &str) -> Option<Passengers> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(n) = input.parse::<u64>() {
        return Some(Passengers::Count(n.into()));
    }
    input
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Passengers::Count)
}

impl QuoteDraft for FormFields {
    fn required_value(&self, field: RequiredField) -> Option<&str> {
        let value = match field {
            RequiredField::Name => &self.name,
            RequiredField::Phone => &self.phone,
            RequiredField::Email => &self.email,
            RequiredField::Pickup => &self.pickup,
            RequiredField::Dropoff => &self.dropoff,
        };
        Some(value.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Editing,
    /// Request in flight; submit is disabled
    Submitting,
    /// Terminal: the form is replaced by the thank-you view
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub fields: FormFields,
    /// Local validation messages, in form order
    pub errors: Vec<String>,
    /// Generic failure message after a rejected or failed request
    pub server_error: Option<String>,
    pub phase: Phase,
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn is_success(&self) -> bool {
        self.phase == Phase::Success
    }
}
