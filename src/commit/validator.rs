use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::commit::command::CommitRequest;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Time,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Date, Field::Time, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Time => "time",
            Field::Message => "message",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Date => "A date is required.",
            Field::Time => "A time is required.",
            Field::Message => "A commit message is required.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FieldError {
    #[error("{}", .0.required_message())]
    Missing(Field),
    #[error("'{input}' is not a calendar date, expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("Pick a date between {min} and {max}.")]
    OutsidePicker { min: NaiveDate, max: NaiveDate },
    #[error("'{input}' is not a time, expected 24-hour HH:MM")]
    InvalidTime { input: String },
    #[error("time '{input}' is out of range, hours run 00-23 and minutes 00-59")]
    TimeOutOfRange { input: String },
    #[error("A commit message cannot be blank.")]
    BlankMessage,
}

impl FieldError {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldError::Missing(_))
    }
}

/// Per-field rejection reasons, ordered date, time, message.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Field, FieldError> {
        self.errors.iter()
    }

    pub(crate) fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, error)) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.errors
                .iter()
                .map(|(field, error)| (field, error.to_string())),
        )
    }
}

/// Raw form values as entered, before any validation.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CommitDraft {
    pub date: Option<String>,
    pub time: Option<String>,
    pub message: Option<String>,
}

impl CommitDraft {
    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Date => self.date.as_deref(),
            Field::Time => self.time.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }
}

pub fn validate(draft: &CommitDraft) -> Result<CommitRequest, ValidationErrors> {
    let date = validate_date(draft.date.as_deref());
    let time = validate_time(draft.time.as_deref());
    let message = validate_message(draft.message.as_deref());

    match (date, time, message) {
        (Ok(date), Ok(time), Ok(message)) => Ok(CommitRequest::from_parts(date, time, message)),
        (date, time, message) => {
            let mut errors = ValidationErrors::default();
            if let Err(err) = date {
                errors.insert(Field::Date, err);
            }
            if let Err(err) = time {
                errors.insert(Field::Time, err);
            }
            if let Err(err) = message {
                errors.insert(Field::Message, err);
            }
            Err(errors)
        }
    }
}

pub fn validate_date(input: Option<&str>) -> Result<NaiveDate, FieldError> {
    let text = required_trimmed(Field::Date, input)?;
    let invalid = || FieldError::InvalidDate {
        input: text.to_string(),
    };

    if !has_shape(text, "dddd-dd-dd") {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

pub fn validate_time(input: Option<&str>) -> Result<String, FieldError> {
    let text = required_trimmed(Field::Time, input)?;
    if !has_shape(text, "dd:dd") {
        return Err(FieldError::InvalidTime {
            input: text.to_string(),
        });
    }

    let hour = text[..2].parse::<u32>().unwrap_or(u32::MAX);
    let minute = text[3..].parse::<u32>().unwrap_or(u32::MAX);
    if NaiveTime::from_hms_opt(hour, minute, 0).is_none() {
        return Err(FieldError::TimeOutOfRange {
            input: text.to_string(),
        });
    }
    Ok(text.to_string())
}

/// Messages are kept verbatim; surrounding whitespace is not stripped.
pub fn validate_message(input: Option<&str>) -> Result<String, FieldError> {
    match input {
        None | Some("") => Err(FieldError::Missing(Field::Message)),
        Some(text) if text.trim().is_empty() => Err(FieldError::BlankMessage),
        Some(text) => Ok(text.to_string()),
    }
}

fn required_trimmed(field: Field, input: Option<&str>) -> Result<&str, FieldError> {
    match input.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(FieldError::Missing(field)),
    }
}

// 'd' matches an ASCII digit, anything else matches itself.
fn has_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(byte, expected)| {
            if expected == b'd' {
                byte.is_ascii_digit()
            } else {
                byte == expected
            }
        })
}
