pub mod command;
pub mod validator;

pub use command::{CommitCommand, CommitRequest, generate};
pub use validator::{CommitDraft, Field, FieldError, ValidationErrors, validate};
