//! Book instance (physical copy) model and form

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use super::book::Book;
use crate::display;
use crate::validation::{
    escape_in_place, parse_identifier, parse_optional_date, trim_in_place, validate_identifier,
    validate_optional_date, validate_status, FormErrors, FormInput,
};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, sqlx::Type)]
#[sqlx(type_name = "book_instance_status")]
pub enum BookInstanceStatus {
    #[default]
    Maintenance,
    Available,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown book instance status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored copy
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

/// Copy with its book resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceInput {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstanceInput {
    pub fn into_instance(self, id: Uuid) -> BookInstance {
        BookInstance {
            id,
            book_id: self.book_id,
            imprint: self.imprint,
            status: self.status,
            due_back: self.due_back,
        }
    }
}

/// Submitted copy form. Empty status means Maintenance, empty due date
/// means today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "must be specified."),
        custom(function = "validate_identifier")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "must be specified."))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date"))]
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: display::input_date(instance.due_back),
        }
    }
}

impl FormInput for BookInstanceForm {
    type Output = BookInstanceInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("book", "Book"),
        ("imprint", "Imprint"),
        ("status", "Status"),
        ("due_back", "Date when book available"),
    ];

    fn trim(&mut self) {
        trim_in_place(&mut self.book);
        trim_in_place(&mut self.imprint);
        trim_in_place(&mut self.status);
        trim_in_place(&mut self.due_back);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.book);
        escape_in_place(&mut self.imprint);
        escape_in_place(&mut self.status);
        escape_in_place(&mut self.due_back);
    }

    fn coerce(&self) -> Result<BookInstanceInput, FormErrors> {
        let mut errors = FormErrors::default();
        let book_id = parse_identifier(&self.book, "book", &mut errors);
        let due_back = parse_optional_date(&self.due_back);
        let status = if self.status.is_empty() {
            BookInstanceStatus::default()
        } else {
            self.status.parse().unwrap_or_else(|e: UnknownStatus| {
                errors.push("status", e.to_string());
                BookInstanceStatus::default()
            })
        };

        match book_id {
            Some(book_id) if errors.is_empty() => Ok(BookInstanceInput {
                book_id,
                imprint: self.imprint.clone(),
                status,
                due_back: due_back.unwrap_or_else(|| Utc::now().date_naive()),
            }),
            _ => Err(errors),
        }
    }
}
