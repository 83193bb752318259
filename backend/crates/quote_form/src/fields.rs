//! Form field descriptors
//!
//! What a renderer needs to know about each input. The `company` field is
//! the honeypot: a real visitor never sees, reaches or fills it.

use kernel::rules::RequiredField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Phone,
    Email,
    Passengers,
    Pickup,
    Dropoff,
    Date,
    Time,
    Message,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Tel,
    Email,
    Number,
    Date,
    Time,
    TextArea,
}

impl InputType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Tel => "tel",
            InputType::Email => "email",
            InputType::Number => "number",
            InputType::Date => "date",
            InputType::Time => "time",
            InputType::TextArea => "textarea",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: FormField,
    /// JSON key and HTML `name`
    pub name: &'static str,
    pub input_type: InputType,
    pub required: bool,
    /// Visually hidden
    pub hidden: bool,
    pub tab_index: Option<i32>,
    pub autocomplete: Option<&'static str>,
    pub aria_hidden: bool,
}

impl FieldDescriptor {
    const fn visible(field: FormField, name: &'static str, input_type: InputType, required: bool) -> Self {
        Self {
            field,
            name,
            input_type,
            required,
            hidden: false,
            tab_index: None,
            autocomplete: None,
            aria_hidden: false,
        }
    }

    pub const fn is_honeypot(&self) -> bool {
        matches!(self.field, FormField::Company)
    }
}

impl FormField {
    /// Every field, in render order
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Passengers,
        FormField::Pickup,
        FormField::Dropoff,
        FormField::Date,
        FormField::Time,
        FormField::Message,
        FormField::Company,
    ];

    pub const fn descriptor(&self) -> FieldDescriptor {
        use FieldDescriptor as D;
        match self {
            FormField::Name => D::visible(*self, "name", InputType::Text, true),
            FormField::Phone => D::visible(*self, "phone", InputType::Tel, true),
            FormField::Email => D::visible(*self, "email", InputType::Email, true),
            FormField::Passengers => D::visible(*self, "passengers", InputType::Number, false),
            FormField::Pickup => D::visible(*self, "pickup", InputType::Text, true),
            FormField::Dropoff => D::visible(*self, "dropoff", InputType::Text, true),
            FormField::Date => D::visible(*self, "date", InputType::Date, false),
            FormField::Time => D::visible(*self, "time", InputType::Time, false),
            FormField::Message => D::visible(*self, "message", InputType::TextArea, false),
            FormField::Company => FieldDescriptor {
                field: FormField::Company,
                name: "company",
                input_type: InputType::Text,
                required: false,
                hidden: true,
                tab_index: Some(-1),
                autocomplete: Some("off"),
                aria_hidden: true,
            },
        }
    }

    pub const fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// The rule-set field this input feeds, if it is a required one
    pub const fn required_field(&self) -> Option<RequiredField> {
        match self {
            FormField::Name => Some(RequiredField::Name),
            FormField::Phone => Some(RequiredField::Phone),
            FormField::Email => Some(RequiredField::Email),
            FormField::Pickup => Some(RequiredField::Pickup),
            FormField::Dropoff => Some(RequiredField::Dropoff),
            _ => None,
        }
    }
}
