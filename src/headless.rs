use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::commit::{CommitCommand, ValidationErrors};
use crate::form::CommitForm;
use crate::notify::Notifier;
use crate::session::CommandSession;

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOptions {
    pub copy: bool,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrintStatus {
    Printed,
    Rejected,
}

#[derive(Serialize)]
struct CommandReport<'a> {
    command: &'a str,
    timestamp: &'a str,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    errors: &'a ValidationErrors,
}

/// The print-mode clipboard. The process exits as soon as `run` returns, so the
/// copy has to hold the text until something else owns the clipboard.
pub fn clipboard() -> SystemClipboard {
    SystemClipboard::blocking()
}

/// Submits the form once and writes the command to `out`. Field errors go to
/// stderr, or to `out` as JSON when requested.
pub fn run(
    form: &CommitForm,
    options: PrintOptions,
    out: &mut impl Write,
    clipboard: &mut dyn ClipboardWriter,
    notifier: &mut dyn Notifier,
) -> Result<PrintStatus> {
    let mut session = CommandSession::default();
    match session.generate(form) {
        Ok(command) => write_command(out, command, options.json)?,
        Err(errors) => {
            write_errors(out, &errors, options.json)?;
            return Ok(PrintStatus::Rejected);
        }
    }

    if options.copy {
        out.flush().context("failed to flush command")?;
        session.recopy(clipboard, notifier);
    }
    Ok(PrintStatus::Printed)
}

fn write_command(out: &mut impl Write, command: &CommitCommand, json: bool) -> Result<()> {
    if json {
        let report = CommandReport {
            command: command.as_str(),
            timestamp: command.timestamp(),
        };
        serde_json::to_writer(&mut *out, &report).context("failed to encode command report")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{command}").context("failed to write command")?;
    }
    Ok(())
}

fn write_errors(out: &mut impl Write, errors: &ValidationErrors, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &ErrorReport { errors })
            .context("failed to encode error report")?;
        writeln!(out)?;
    } else {
        for (field, error) in errors.iter() {
            eprintln!("{field}: {error}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;

    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::commit::CommitDraft;
    use crate::picker::DateBounds;
    use crate::session::{COPIED_TITLE, COPY_FAILED_TITLE};

    struct StubClipboard {
        fail: bool,
        writes: usize,
    }

    impl ClipboardWriter for StubClipboard {
        fn copy(&mut self, _text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Write("denied".to_string()));
            }
            self.writes += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Titles(Vec<String>);

    impl Notifier for Titles {
        fn notify(&mut self, title: &str) {
            self.0.push(title.to_string());
        }
    }

    fn form(draft: CommitDraft) -> CommitForm {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("date");
        CommitForm::with_draft(draft, DateBounds::up_to(today))
    }

    fn complete() -> CommitDraft {
        CommitDraft {
            date: Some("2024-03-15".to_string()),
            time: Some("14:30".to_string()),
            message: Some("fix bug".to_string()),
        }
    }

    fn print(
        draft: CommitDraft,
        options: PrintOptions,
    ) -> (PrintStatus, String, StubClipboard, Titles) {
        let mut out = Vec::new();
        let mut clipboard = StubClipboard {
            fail: false,
            writes: 0,
        };
        let mut titles = Titles::default();
        let status = run(&form(draft), options, &mut out, &mut clipboard, &mut titles)
            .expect("print should not error");
        (
            status,
            String::from_utf8(out).expect("utf8 output"),
            clipboard,
            titles,
        )
    }

    #[test]
    fn prints_command_line() {
        let (status, out, clipboard, titles) = print(complete(), PrintOptions::default());
        assert_eq!(status, PrintStatus::Printed);
        assert_eq!(out, "git commit --date=\"2024-03-15T14:30Z\" -m \"fix bug\"\n");
        assert_eq!(clipboard.writes, 0);
        assert!(titles.0.is_empty());
    }

    #[test]
    fn json_report_carries_command_and_timestamp() {
        let options = PrintOptions {
            json: true,
            ..Default::default()
        };
        let (_, out, _, _) = print(complete(), options);
        let report: Value = serde_json::from_str(&out).expect("json report");
        assert_eq!(report["timestamp"], "2024-03-15T14:30Z");
        assert_eq!(
            report["command"],
            "git commit --date=\"2024-03-15T14:30Z\" -m \"fix bug\""
        );
    }

    #[test]
    fn rejected_form_prints_json_errors() {
        let options = PrintOptions {
            json: true,
            ..Default::default()
        };
        let (status, out, _, _) = print(
            CommitDraft {
                time: Some("14:30".to_string()),
                ..Default::default()
            },
            options,
        );
        assert_eq!(status, PrintStatus::Rejected);
        let report: Value = serde_json::from_str(&out).expect("json report");
        assert_eq!(report["errors"]["date"], "A date is required.");
        assert_eq!(report["errors"]["message"], "A commit message is required.");
        assert!(report["errors"].get("time").is_none());
    }

    #[test]
    fn copy_runs_after_printing() {
        let options = PrintOptions {
            copy: true,
            ..Default::default()
        };
        let (status, out, clipboard, titles) = print(complete(), options);
        assert_eq!(status, PrintStatus::Printed);
        assert!(out.starts_with("git commit"));
        assert_eq!(clipboard.writes, 1);
        assert_eq!(titles.0, vec![COPIED_TITLE.to_string()]);
    }

    #[test]
    fn copy_failure_still_prints() {
        let mut out = Vec::new();
        let mut clipboard = StubClipboard {
            fail: true,
            writes: 0,
        };
        let mut titles = Titles::default();
        let options = PrintOptions {
            copy: true,
            json: false,
        };
        let status = run(&form(complete()), options, &mut out, &mut clipboard, &mut titles)
            .expect("print should not error");
        assert_eq!(status, PrintStatus::Printed);
        assert!(!out.is_empty());
        assert_eq!(titles.0, vec![COPY_FAILED_TITLE.to_string()]);
    }

    #[test]
    fn print_mode_holds_the_clipboard_until_taken_over() {
        assert!(clipboard().waits_for_owner());
    }
}
