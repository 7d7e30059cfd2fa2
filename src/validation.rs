//! Form sanitization pipeline
//!
//! Every submitted form goes through the same steps: trim whitespace, run the
//! `validator` rules, collect messages per field, escape HTML-unsafe
//! characters, then coerce the strings into typed values. The pipeline never
//! touches the store.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::book_instance::BookInstanceStatus;

/// Upper bound for author name parts
pub const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Human readable validation messages, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Whether any message concerns `field`
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Convert `validator` output, labelling each message with the field's
    /// display name and ordering by the form's field order.
    pub fn from_validation(errors: &ValidationErrors, fields: &[(&str, &str)]) -> Self {
        let position = |name: &str| {
            fields
                .iter()
                .position(|(field, _)| *field == name)
                .unwrap_or(fields.len())
        };
        let label = |name: &str| {
            fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| name.to_string())
        };

        let mut collected = Vec::new();
        for (field, list) in errors.field_errors() {
            let name = field.to_string();
            for error in list.iter() {
                let text = error
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("is invalid ({}).", error.code));
                collected.push(FieldError {
                    message: format!("{} {}", label(&name), text),
                    field: name.clone(),
                });
            }
        }
        collected.sort_by_key(|e| position(&e.field));
        Self(collected)
    }
}

/// A form whose fields can be run through [`sanitize`]
pub trait FormInput: Validate + Sized {
    /// Typed value produced by a valid form
    type Output;

    /// `(field, label)` pairs in the order the form shows them
    const FIELDS: &'static [(&'static str, &'static str)];

    fn trim(&mut self);

    fn escape(&mut self);

    /// Only called once validation has passed
    fn coerce(&self) -> Result<Self::Output, FormErrors>;
}

/// Outcome of the sanitization pipeline
#[derive(Debug)]
pub enum Sanitized<F: FormInput> {
    Valid(F::Output),
    /// The trimmed and escaped form, for re-rendering
    Invalid { form: F, errors: FormErrors },
}

/// Trim, validate, escape and coerce a submitted form
pub fn sanitize<F: FormInput>(mut form: F) -> Sanitized<F> {
    form.trim();
    let checked = form.validate();
    form.escape();

    match checked {
        Ok(()) => match form.coerce() {
            Ok(value) => Sanitized::Valid(value),
            Err(errors) => Sanitized::Invalid { form, errors },
        },
        Err(errors) => Sanitized::Invalid {
            errors: FormErrors::from_validation(&errors, F::FIELDS),
            form,
        },
    }
}

pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Replace `& < > " ' / \` and backtick with HTML entities
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_in_place(value: &mut String) {
    if value.contains(['&', '<', '>', '"', '\'', '/', '\\', '`']) {
        *value = escape_html(value);
    }
}

/// Accepts `YYYY-MM-DD` and ISO-8601 date-times, keeping the calendar date
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Empty means absent. Values reaching here passed `validate_optional_date`.
pub fn parse_optional_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        None
    } else {
        parse_iso8601_date(value)
    }
}

pub fn parse_identifier(value: &str, field: &str, errors: &mut FormErrors) -> Option<Uuid> {
    let parsed = Uuid::parse_str(value).ok();
    if parsed.is_none() {
        errors.push(field, format!("{} is not a valid selection.", value));
    }
    parsed
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Author name parts: letters and digits only, bounded length
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > NAME_MAX_LEN {
        return Err(rule("max_length", "must be at most 100 characters."));
    }
    if !value.chars().all(char::is_alphanumeric) {
        return Err(rule("alphanumeric", "has non-alphanumeric characters."));
    }
    Ok(())
}

pub fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_iso8601_date(value).is_some() {
        Ok(())
    } else {
        Err(rule("iso8601", "is not a valid date."))
    }
}

/// Emptiness is left to the `length` rule
pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(rule("identifier", "is not a valid selection."))
    }
}

pub fn validate_identifiers(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| Uuid::parse_str(v).is_ok()) {
        Ok(())
    } else {
        Err(rule("identifier", "contains an invalid selection."))
    }
}

/// Empty selects the default status
pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookInstanceStatus>().is_ok() {
        Ok(())
    } else {
        Err(rule("status", "must be one of Maintenance, Available, Loaned or Reserved."))
    }
}
