use tracing::{debug, info, warn};

use crate::clipboard::ClipboardWriter;
use crate::commit::{CommitCommand, ValidationErrors, generate};
use crate::form::CommitForm;
use crate::notify::Notifier;

pub const COPIED_TITLE: &str = "Commit message has been copied to your clipboard !";
pub const COPY_FAILED_TITLE: &str = "Could not copy the command to your clipboard.";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Owns the most recent command. Only `generate` and `submit` replace it.
#[derive(Debug, Default)]
pub struct CommandSession {
    current: Option<CommitCommand>,
}

impl CommandSession {
    pub fn current(&self) -> Option<&CommitCommand> {
        self.current.as_ref()
    }

    /// Validates the form and stores a fresh command without touching the clipboard.
    pub fn generate(&mut self, form: &CommitForm) -> Result<&CommitCommand, ValidationErrors> {
        let request = form.submit().inspect_err(|errors| {
            debug!(%errors, "commit form rejected");
        })?;
        let command = generate(&request);
        info!(timestamp = command.timestamp(), "generated commit command");
        Ok(&*self.current.insert(command))
    }

    /// Generate, then copy. The stored command is set before the copy runs and
    /// stays as generated whatever the clipboard does.
    pub fn submit(
        &mut self,
        form: &CommitForm,
        clipboard: &mut dyn ClipboardWriter,
        notifier: &mut dyn Notifier,
    ) -> Result<CopyOutcome, ValidationErrors> {
        let command = self.generate(form)?;
        Ok(copy_command(command, clipboard, notifier))
    }

    pub fn recopy(
        &self,
        clipboard: &mut dyn ClipboardWriter,
        notifier: &mut dyn Notifier,
    ) -> Option<CopyOutcome> {
        let command = self.current.as_ref()?;
        Some(copy_command(command, clipboard, notifier))
    }
}

fn copy_command(
    command: &CommitCommand,
    clipboard: &mut dyn ClipboardWriter,
    notifier: &mut dyn Notifier,
) -> CopyOutcome {
    match clipboard.copy(command.as_str()) {
        Ok(()) => {
            notifier.notify(COPIED_TITLE);
            CopyOutcome::Copied
        }
        Err(err) => {
            warn!(error = %err, "clipboard copy failed");
            notifier.notify(COPY_FAILED_TITLE);
            CopyOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::picker::DateBounds;

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Vec<String>,
        fail: bool,
    }

    impl ClipboardWriter for RecordingClipboard {
        fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("no display".to_string()));
            }
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        titles: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, title: &str) {
            self.titles.push(title.to_string());
        }
    }

    fn filled_form() -> CommitForm {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("date");
        let mut form = CommitForm::new(DateBounds::up_to(today));
        form.set_date_text("2024-03-15");
        form.set_time("14:30");
        form.set_message("fix bug");
        form
    }

    const EXPECTED: &str = "git commit --date=\"2024-03-15T14:30Z\" -m \"fix bug\"";

    #[test]
    fn submit_stores_copies_and_notifies() {
        let mut session = CommandSession::default();
        let mut clipboard = RecordingClipboard::default();
        let mut notifier = RecordingNotifier::default();

        let outcome = session
            .submit(&filled_form(), &mut clipboard, &mut notifier)
            .expect("valid form");

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(session.current().map(CommitCommand::as_str), Some(EXPECTED));
        assert_eq!(clipboard.writes, vec![EXPECTED.to_string()]);
        assert_eq!(notifier.titles, vec![COPIED_TITLE.to_string()]);
    }

    #[test]
    fn failed_copy_keeps_the_command() {
        let mut session = CommandSession::default();
        let mut clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let mut notifier = RecordingNotifier::default();

        let outcome = session
            .submit(&filled_form(), &mut clipboard, &mut notifier)
            .expect("valid form");

        assert_eq!(outcome, CopyOutcome::Failed);
        assert_eq!(session.current().map(CommitCommand::as_str), Some(EXPECTED));
        assert_eq!(notifier.titles, vec![COPY_FAILED_TITLE.to_string()]);
    }

    #[test]
    fn rejected_submit_leaves_previous_command() {
        let mut session = CommandSession::default();
        let mut clipboard = RecordingClipboard::default();
        let mut notifier = RecordingNotifier::default();
        session
            .submit(&filled_form(), &mut clipboard, &mut notifier)
            .expect("valid form");

        let mut broken = filled_form();
        broken.set_message("");
        let errors = session
            .submit(&broken, &mut clipboard, &mut notifier)
            .expect_err("missing message should be rejected");

        assert_eq!(errors.iter().count(), 1);
        assert_eq!(session.current().map(CommitCommand::as_str), Some(EXPECTED));
        assert_eq!(clipboard.writes.len(), 1);
        assert_eq!(notifier.titles.len(), 1);
    }

    #[test]
    fn new_submission_replaces_command() {
        let mut session = CommandSession::default();
        let mut form = filled_form();
        session.generate(&form).expect("first");
        form.set_time("09:00");
        let command = session.generate(&form).expect("second");
        assert_eq!(command.timestamp(), "2024-03-15T09:00Z");
        assert_eq!(
            session.current().map(CommitCommand::timestamp),
            Some("2024-03-15T09:00Z")
        );
    }

    #[test]
    fn recopy_repeats_current_command() {
        let mut session = CommandSession::default();
        let mut clipboard = RecordingClipboard::default();
        let mut notifier = RecordingNotifier::default();
        assert_eq!(session.recopy(&mut clipboard, &mut notifier), None);

        session.generate(&filled_form()).expect("valid form");
        assert_eq!(
            session.recopy(&mut clipboard, &mut notifier),
            Some(CopyOutcome::Copied)
        );
        assert_eq!(
            session.recopy(&mut clipboard, &mut notifier),
            Some(CopyOutcome::Copied)
        );
        assert_eq!(clipboard.writes, vec![EXPECTED.to_string(); 2]);
    }
}
