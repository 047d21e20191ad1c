//! Two-step confirmation for destructive operations
//!
//! A caller first invokes the operation with [`Confirmation::Pending`] and
//! gets back a [`ConfirmationRequest`] describing what would happen. Nothing
//! is touched until the caller repeats the call with
//! [`Confirmation::Confirmed`].

use std::fmt;

/// The caller's answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Not asked yet
    Pending,
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// The operation awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Delete { id: i64 },
    Import { count: usize },
}

/// What the caller is asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub action: PendingAction,
    pub prompt: String,
}

impl ConfirmationRequest {
    pub(crate) fn delete(id: i64, statement: Option<&str>) -> Self {
        let prompt = match statement {
            Some(statement) => format!("Delete claim {} (\"{}\")?", id, statement),
            None => format!("Delete claim {}?", id),
        };
        Self {
            action: PendingAction::Delete { id },
            prompt,
        }
    }

    pub(crate) fn import(count: usize) -> Self {
        let noun = if count == 1 { "claim" } else { "claims" };
        Self {
            action: PendingAction::Import { count },
            prompt: format!("Import {} {} into local storage?", count, noun),
        }
    }
}

impl fmt::Display for ConfirmationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt)
    }
}

/// Outcome of a confirmable operation
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    /// Nothing was done; ask the caller and call again
    ConfirmationRequired(ConfirmationRequest),
    Done(T),
    Cancelled,
}

impl<T> Step<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    pub fn into_done(self) -> Option<T> {
        match self {
            Step::Done(value) => Some(value),
            _ => None,
        }
    }
}
