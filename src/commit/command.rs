use std::fmt;

use chrono::NaiveDate;

use crate::commit::validator::DATE_FORMAT;

/// A date, time and message that passed validation. Only the validator builds these.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommitRequest {
    date: NaiveDate,
    time: String,
    message: String,
}

impl CommitRequest {
    pub(crate) fn from_parts(date: NaiveDate, time: String, message: String) -> Self {
        Self {
            date,
            time,
            message,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommitCommand {
    text: String,
    timestamp: String,
}

impl CommitCommand {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl fmt::Display for CommitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds `git commit --date="<timestamp>" -m "<message>"`.
///
/// The message is wrapped in double quotes but embedded quotes are not
/// escaped, so a message like `say "hi"` yields a command the shell splits
/// differently than intended. Callers that paste into a shell own the quoting.
pub fn generate(request: &CommitRequest) -> CommitCommand {
    let timestamp = format_timestamp(request.date(), request.time());
    let text = format!(
        "git commit --date=\"{timestamp}\" -m \"{}\"",
        request.message()
    );
    CommitCommand { text, timestamp }
}

/// `YYYY-MM-DDTHH:MMZ` from the calendar fields of `date`.
///
/// The trailing `Z` is a literal suffix. No UTC conversion happens, so the
/// timestamp claims UTC while carrying whatever wall-clock time was entered.
pub fn format_timestamp(date: NaiveDate, time: &str) -> String {
    format!("{}T{time}Z", date.format(DATE_FORMAT))
}
