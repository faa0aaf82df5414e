// contact.rs - Contact form validation and simulated submission
//
// Nothing is ever sent anywhere. A valid form moves through
// Submitting -> Succeeded -> Closed on fixed delays, driven by whoever owns
// the clock (gloo timers in the browser, plain calls in tests).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUBMIT_DELAY_MS: f64 = 1500.0;
pub const CLOSE_DELAY_MS: f64 = 2000.0;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());
static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [FormField::Name, FormField::Email, FormField::Phone, FormField::Message];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(FormField::Name),
            "email" => Some(FormField::Email),
            "phone" => Some(FormField::Phone),
            "message" => Some(FormField::Message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Message => &mut self.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Email is invalid")]
    EmailInvalid,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Please enter a valid 10-digit phone number")]
    PhoneInvalid,
    #[error("Message is required")]
    MessageRequired,
}

pub fn validate_field(field: FormField, value: &str) -> Option<FieldError> {
    let value = value.trim();
    match field {
        FormField::Name if value.is_empty() => Some(FieldError::NameRequired),
        FormField::Email if value.is_empty() => Some(FieldError::EmailRequired),
        FormField::Email if !EMAIL.is_match(value) => Some(FieldError::EmailInvalid),
        FormField::Phone if value.is_empty() => Some(FieldError::PhoneRequired),
        FormField::Phone if !PHONE.is_match(&NON_DIGIT.replace_all(value, "")) => Some(FieldError::PhoneInvalid),
        FormField::Message if value.is_empty() => Some(FieldError::MessageRequired),
        _ => None,
    }
}

/// Per-field errors, in field order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    errors: Vec<(FormField, FieldError)>,
}

impl FormErrors {
    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.errors.iter().find(|(f, _)| *f == field).map(|(_, e)| *e)
    }

    pub fn clear(&mut self, field: FormField) {
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.errors.iter().copied()
    }

    /// `{field: message}` map for the page
    pub fn to_json(&self) -> serde_json::Value {
        self.errors
            .iter()
            .map(|(f, e)| (format!("{:?}", f).to_lowercase(), serde_json::Value::String(e.to_string())))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

pub fn validate(data: &FormData) -> FormErrors {
    FormErrors {
        errors: FormField::ALL
            .iter()
            .filter_map(|&f| validate_field(f, data.get(f)).map(|e| (f, e)))
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Submission {
    #[default]
    Editing,
    Submitting { elapsed_ms: f64 },
    Succeeded { elapsed_ms: f64 },
    Closed,
}

/// Transitions reported by ContactForm::advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submitted,
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    data: FormData,
    errors: FormErrors,
    state: Submission,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn state(&self) -> Submission {
        self.state
    }

    /// Edit a field; clears that field's error. Ignored unless editing.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        if self.state != Submission::Editing {
            return;
        }
        *self.data.slot(field) = value.into();
        self.errors.clear(field);
    }

    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.data);
        self.errors.is_empty()
    }

    /// Start the simulated submission if the form is valid
    pub fn submit(&mut self) -> bool {
        if self.state != Submission::Editing || !self.validate() {
            return false;
        }
        log::debug!("contact form submitting");
        self.state = Submission::Submitting { elapsed_ms: 0.0 };
        true
    }

    /// Advance the submission clock by `dt_ms`
    pub fn advance(&mut self, dt_ms: f64) -> Option<FormEvent> {
        let dt = dt_ms.max(0.0);
        match self.state {
            Submission::Submitting { elapsed_ms } if elapsed_ms + dt >= SUBMIT_DELAY_MS => {
                self.data = FormData::default();
                self.state = Submission::Succeeded { elapsed_ms: 0.0 };
                Some(FormEvent::Submitted)
            }
            Submission::Submitting { elapsed_ms } => {
                self.state = Submission::Submitting { elapsed_ms: elapsed_ms + dt };
                None
            }
            Submission::Succeeded { elapsed_ms } if elapsed_ms + dt >= CLOSE_DELAY_MS => {
                self.state = Submission::Closed;
                Some(FormEvent::Closed)
            }
            Submission::Succeeded { elapsed_ms } => {
                self.state = Submission::Succeeded { elapsed_ms: elapsed_ms + dt };
                None
            }
            Submission::Editing | Submission::Closed => None,
        }
    }

    /// Escape key; closes unless a submission is in flight
    pub fn escape(&mut self) -> bool {
        match self.state {
            Submission::Submitting { .. } => false,
            Submission::Closed => true,
            _ => {
                self.state = Submission::Closed;
                true
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == Submission::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(FormField::Name, "Ada");
        form.set(FormField::Email, "a@b.co");
        form.set(FormField::Phone, "555-123-4567");
        form.set(FormField::Message, "hi");
        form
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let mut form = filled();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_all_blank_reports_every_field() {
        let errors = validate(&FormData { name: "   ".into(), ..Default::default() });
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(FormField::Name), Some(FieldError::NameRequired));
        assert_eq!(errors.get(FormField::Email), Some(FieldError::EmailRequired));
        assert_eq!(errors.get(FormField::Phone), Some(FieldError::PhoneRequired));
        assert_eq!(errors.get(FormField::Message), Some(FieldError::MessageRequired));
    }

    #[test]
    fn test_bad_email_and_short_phone() {
        let mut form = filled();
        form.set(FormField::Email, "a@b");
        form.set(FormField::Phone, "123");
        assert!(!form.validate());
        assert_eq!(form.errors().get(FormField::Email), Some(FieldError::EmailInvalid));
        assert_eq!(form.errors().get(FormField::Phone), Some(FieldError::PhoneInvalid));
        assert_eq!(FieldError::PhoneInvalid.to_string(), "Please enter a valid 10-digit phone number");
    }

    #[test]
    fn test_phone_formatting_is_stripped() {
        assert_eq!(validate_field(FormField::Phone, "(555) 123 4567"), None);
        assert_eq!(validate_field(FormField::Phone, "+1 555 123 4567"), Some(FieldError::PhoneInvalid));
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut form = ContactForm::new();
        form.validate();
        form.set(FormField::Email, "x");
        assert_eq!(form.errors().get(FormField::Email), None);
        assert_eq!(form.errors().get(FormField::Name), Some(FieldError::NameRequired));
    }

    #[test]
    fn test_submission_timeline() {
        let mut form = filled();
        assert!(form.submit());
        assert!(!form.submit());

        assert_eq!(form.advance(1000.0), None);
        assert_eq!(form.advance(500.0), Some(FormEvent::Submitted));
        assert_eq!(form.data(), &FormData::default());
        assert!(matches!(form.state(), Submission::Succeeded { .. }));

        assert_eq!(form.advance(1999.0), None);
        assert_eq!(form.advance(1.0), Some(FormEvent::Closed));
        assert!(form.is_closed());
        assert_eq!(form.advance(5000.0), None);
    }

    #[test]
    fn test_invalid_form_does_not_submit() {
        let mut form = ContactForm::new();
        assert!(!form.submit());
        assert_eq!(form.state(), Submission::Editing);
    }

    #[test]
    fn test_escape_closes() {
        let mut form = filled();
        assert!(form.escape());
        assert!(form.is_closed());

        let mut busy = filled();
        busy.submit();
        assert!(!busy.escape());
    }

    #[test]
    fn test_errors_json() {
        let errors = validate(&FormData { name: "Ada".into(), message: "hi".into(), phone: "1".into(), ..Default::default() });
        let json = errors.to_json();
        assert_eq!(json["email"], "Email is required");
        assert_eq!(json["phone"], "Please enter a valid 10-digit phone number");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(FormField::parse("phone"), Some(FormField::Phone));
        assert_eq!(FormField::parse("subject"), None);
    }
}
