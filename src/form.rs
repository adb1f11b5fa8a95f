use chrono::NaiveDate;

use crate::commit::validator::{DATE_FORMAT, validate_date, validate_message, validate_time};
use crate::commit::{CommitDraft, CommitRequest, Field, FieldError, ValidationErrors, validate};
use crate::picker::DateBounds;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FieldState {
    Empty,
    Invalid(String),
    Valid,
}

impl FieldState {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldState::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            FieldState::Invalid(reason) => Some(reason),
            FieldState::Empty | FieldState::Valid => None,
        }
    }
}

/// The three commit fields plus the picker window. Field states are derived
/// from the raw inputs on every query, so there is nothing to keep in sync.
#[derive(Debug, Clone)]
pub struct CommitForm {
    draft: CommitDraft,
    bounds: DateBounds,
}

impl CommitForm {
    pub fn new(bounds: DateBounds) -> Self {
        Self::with_draft(CommitDraft::default(), bounds)
    }

    pub fn with_draft(draft: CommitDraft, bounds: DateBounds) -> Self {
        Self { draft, bounds }
    }

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn value(&self, field: Field) -> &str {
        self.draft.value(field).unwrap_or_default()
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.date = Some(date.format(DATE_FORMAT).to_string());
    }

    pub fn set_date_text(&mut self, text: impl Into<String>) {
        self.draft.date = Some(text.into());
    }

    pub fn set_time(&mut self, text: impl Into<String>) {
        self.draft.time = Some(text.into());
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.draft.message = Some(text.into());
    }

    /// The entered date if it parses, whether or not the picker allows it.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        validate_date(self.draft.date.as_deref()).ok()
    }

    pub fn field_state(&self, field: Field) -> FieldState {
        let checked = match field {
            Field::Date => validate_date(self.draft.date.as_deref())
                .and_then(|date| self.check_bounds(date)),
            Field::Time => validate_time(self.draft.time.as_deref()).map(|_| ()),
            Field::Message => validate_message(self.draft.message.as_deref()).map(|_| ()),
        };

        match checked {
            Ok(()) => FieldState::Valid,
            Err(err) if err.is_missing() => FieldState::Empty,
            Err(err) => FieldState::Invalid(err.to_string()),
        }
    }

    pub fn submit_enabled(&self) -> bool {
        Field::ALL
            .iter()
            .all(|field| self.field_state(*field).is_valid())
    }

    pub fn submit(&self) -> Result<CommitRequest, ValidationErrors> {
        let mut errors = match validate(&self.draft) {
            Ok(request) => match self.check_bounds(request.date()) {
                Ok(()) => return Ok(request),
                Err(_) => ValidationErrors::default(),
            },
            Err(errors) => errors,
        };

        if !errors.contains(Field::Date)
            && let Some(date) = self.selected_date()
            && let Err(err) = self.check_bounds(date)
        {
            errors.insert(Field::Date, err);
        }
        Err(errors)
    }

    fn check_bounds(&self, date: NaiveDate) -> Result<(), FieldError> {
        if self.bounds.contains(date) {
            Ok(())
        } else {
            Err(FieldError::OutsidePicker {
                min: self.bounds.min(),
                max: self.bounds.max(),
            })
        }
    }
}
