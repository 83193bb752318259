//! User-facing copy of the quote form
//!
//! Server reason codes never reach the user; every server or network
//! failure is shown as [`FormCopy::error_generic`].

use kernel::rules::{RequiredField, RuleViolation};

use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCopy {
    pub required_name: &'static str,
    pub required_phone: &'static str,
    pub required_email: &'static str,
    pub invalid_email: &'static str,
    pub required_pickup: &'static str,
    pub required_dropoff: &'static str,
    pub error_summary_title: &'static str,
    pub error_generic: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub success_title: &'static str,
    pub success_note: &'static str,
    pub whatsapp: &'static str,
    pub call_now: &'static str,
}

const EN: FormCopy = FormCopy {
    required_name: "Please enter your name.",
    required_phone: "Please enter your phone number.",
    required_email: "Please enter your email address.",
    invalid_email: "Please enter a valid email address.",
    required_pickup: "Please enter the pickup location.",
    required_dropoff: "Please enter the drop-off location.",
    error_summary_title: "Please review the following:",
    error_generic: "We could not send your request. Please try again or contact us on WhatsApp.",
    submit: "Request a quote",
    submitting: "Sending...",
    success_title: "Thank you, we have received your request",
    success_note: "We will reply with your quote shortly. For urgent trips, message or call us directly.",
    whatsapp: "WhatsApp",
    call_now: "Call now",
};

const ES: FormCopy = FormCopy {
    required_name: "Introduce tu nombre.",
    required_phone: "Introduce tu número de teléfono.",
    required_email: "Introduce tu correo electrónico.",
    invalid_email: "Introduce un correo electrónico válido.",
    required_pickup: "Indica el lugar de recogida.",
    required_dropoff: "Indica el destino.",
    error_summary_title: "Revisa lo siguiente:",
    error_generic: "No hemos podido enviar tu solicitud. Inténtalo de nuevo o escríbenos por WhatsApp.",
    submit: "Pedir presupuesto",
    submitting: "Enviando...",
    success_title: "Gracias, hemos recibido tu solicitud",
    success_note: "Te enviaremos el presupuesto en breve. Para viajes urgentes, escríbenos o llámanos directamente.",
    whatsapp: "WhatsApp",
    call_now: "Llamar ahora",
};

impl FormCopy {
    pub fn for_locale(locale: Locale) -> &'static FormCopy {
        match locale {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }

    pub fn required(&self, field: RequiredField) -> &'static str {
        match field {
            RequiredField::Name => self.required_name,
            RequiredField::Phone => self.required_phone,
            RequiredField::Email => self.required_email,
            RequiredField::Pickup => self.required_pickup,
            RequiredField::Dropoff => self.required_dropoff,
        }
    }

    /// Message shown for a broken contact rule
    pub fn violation(&self, violation: RuleViolation) -> &'static str {
        match violation {
            RuleViolation::Missing(field) => self.required(field),
            RuleViolation::InvalidEmail => self.invalid_email,
        }
    }
}
