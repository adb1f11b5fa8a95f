use crate::clock::Clock;
use crate::commit::CommitDraft;
use crate::form::CommitForm;
use crate::picker::DateBounds;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Everything the front-ends need, resolved from the command line once at startup.
pub struct AppConfig {
    pub theme: Theme,
    pub clock: Box<dyn Clock>,
    pub draft: CommitDraft,
}

impl AppConfig {
    pub fn bounds(&self) -> DateBounds {
        DateBounds::up_to(self.clock.today())
    }

    pub fn form(&self) -> CommitForm {
        CommitForm::with_draft(self.draft.clone(), self.bounds())
    }
}
