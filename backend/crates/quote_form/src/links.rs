//! Direct contact links offered once a request was sent

use crate::locale::Locale;

/// Dispatch phone number, E.164
pub const DISPATCH_PHONE: &str = "+34617629115";

const WHATSAPP_EN: &str =
    "https://wa.me/34617629115?text=Hello%20I%20would%20like%20a%20quote%20for%20a%20taxi%20in%20Barcelona.";
const WHATSAPP_ES: &str = "https://wa.me/34617629115?text=Hola%20me%20gustar%C3%ADa%20pedir%20un%20presupuesto%20para%20un%20taxi%20en%20Barcelona.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLinks {
    /// Chat with a prefilled message in the form's language
    pub whatsapp: &'static str,
    /// `tel:` link to dispatch
    pub call: String,
}

impl ContactLinks {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            whatsapp: match locale {
                Locale::En => WHATSAPP_EN,
                Locale::Es => WHATSAPP_ES,
            },
            call: format!("tel:{DISPATCH_PHONE}"),
        }
    }
}
