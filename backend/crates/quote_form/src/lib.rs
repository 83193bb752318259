//! Quote Form Controller
//!
//! Client-side counterpart of the quote intake endpoint: keeps the form
//! state, checks the contact rules locally, submits through a
//! [`QuoteGateway`] and maps the answer to one of the form phases.
//!
//! Reason codes from the endpoint are logged, never shown. The user sees
//! the localized generic error instead.

pub mod controller;
pub mod copy;
pub mod fields;
pub mod gateway;
pub mod links;
pub mod locale;
pub mod state;

// Re-exports for convenience
pub use controller::{QuoteFormController, SubmitOutcome};
pub use copy::FormCopy;
pub use fields::{FieldDescriptor, FormField, InputType};
pub use gateway::{GatewayError, HttpQuoteGateway, QuoteGateway};
pub use links::ContactLinks;
pub use locale::Locale;
pub use state::{FormFields, FormState, Phase};
