//! Quote form controller
//!
//! Holds the form state and drives one submission at a time through the
//! gateway. Local validation uses the shared rule set, so a request that
//! reaches the network has already passed the same contact checks as the
//! endpoint.

use kernel::{QuoteResponse, QuoteSubmission, rules};

use crate::copy::FormCopy;
use crate::fields::FormField;
use crate::gateway::{GatewayError, QuoteGateway};
use crate::links::ContactLinks;
use crate::locale::Locale;
use crate::state::{FormState, Phase};

/// What a call to [`QuoteFormController::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent
    Invalid,
    /// Sent and accepted
    Accepted,
    /// Sent, but rejected or lost on the way
    Failed,
    /// Not in the editing phase; nothing happened
    Ignored,
}

pub struct QuoteFormController<G: QuoteGateway> {
    gateway: G,
    locale: Locale,
    state: FormState,
}

impl<G: QuoteGateway> QuoteFormController<G> {
    pub fn new(gateway: G, locale: Locale) -> Self {
        Self {
            gateway,
            locale,
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn copy(&self) -> &'static FormCopy {
        FormCopy::for_locale(self.locale)
    }

    /// Update one input. Ignored outside the editing phase.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if self.state.phase == Phase::Editing {
            self.state.fields.set(field, value.into());
        }
    }

    /// Localized messages for every broken contact rule, in form order
    pub fn validate(&self) -> Vec<String> {
        let copy = self.copy();
        rules::contact_violations(&self.state.fields)
            .into_iter()
            .map(|violation| copy.violation(violation).to_string())
            .collect()
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state.phase {
            Phase::Submitting => self.copy().submitting,
            _ => self.copy().submit,
        }
    }

    /// Alternative contact paths, offered once the request went through
    pub fn contact_links(&self) -> Option<ContactLinks> {
        self.state
            .is_success()
            .then(|| ContactLinks::for_locale(self.locale))
    }

    /// Validate and enter the submitting phase
    ///
    /// Returns the request body to send, or the outcome when there is
    /// nothing to send.
    pub fn begin_submission(&mut self) -> Result<QuoteSubmission, SubmitOutcome> {
        if self.state.phase != Phase::Editing {
            return Err(SubmitOutcome::Ignored);
        }
        self.state.server_error = None;

        let errors = self.validate();
        if !errors.is_empty() {
            self.state.errors = errors;
            return Err(SubmitOutcome::Invalid);
        }
        self.state.errors.clear();

        self.state.phase = Phase::Submitting;
        Ok(self.state.fields.to_submission(self.locale))
    }

    /// Leave the submitting phase with the gateway's answer
    pub fn complete_submission(
        &mut self,
        result: Result<QuoteResponse, GatewayError>,
    ) -> SubmitOutcome {
        if self.state.phase != Phase::Submitting {
            return SubmitOutcome::Ignored;
        }

        let accepted = match result {
            Ok(response) if response.ok => true,
            Ok(response) => {
                tracing::warn!(reason = ?response.error, "Quote not accepted");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Quote request failed");
                false
            }
        };

        if accepted {
            self.state.phase = Phase::Success;
            SubmitOutcome::Accepted
        } else {
            self.state.server_error = Some(self.copy().error_generic.to_string());
            self.state.phase = Phase::Editing;
            SubmitOutcome::Failed
        }
    }

    /// Validate, send and record the answer
    pub async fn submit(&mut self) -> SubmitOutcome {
        let submission = match self.begin_submission() {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };
        let result = self.gateway.submit(&submission).await;
        self.complete_submission(result)
    }
}
