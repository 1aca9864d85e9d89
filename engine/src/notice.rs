//! User-facing notices for the outcome of an inventory action.

use crate::{error::Result, Error, Removal, Snapshot};
use serde::{Deserialize, Serialize};

/// The successful value of an inventory action.
pub trait Outcome {
    /// Check if the action changed nothing, so no success should be shown.
    fn is_noop(&self) -> bool {
        false
    }
}

impl Outcome for Snapshot {}

impl Outcome for Removal {
    fn is_noop(&self) -> bool {
        !self.existed()
    }
}

/// The action a caller performed against the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Add,
    Remove,
    UpdateQuantity,
    Refresh,
}

impl Action {
    /// Message shown when the action succeeds, if any.
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Action::Add => Some("Item added successfully"),
            Action::Remove => Some("Item removed successfully"),
            Action::UpdateQuantity => Some("Item quantity updated successfully"),
            Action::Refresh => None,
        }
    }

    /// Message shown when a store call behind the action fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::Add => "Error adding item",
            Action::Remove => "Error removing item",
            Action::UpdateQuantity => "Error updating item quantity",
            Action::Refresh => "Error fetching inventory",
        }
    }
}

/// A message to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    /// Turn an operation result into the notice the user should see.
    ///
    /// Validation errors carry their own message. Store errors are replaced
    /// by the action's generic failure message; the detail goes to the log.
    /// An outcome that changed nothing yields no notice.
    pub fn for_result<T: Outcome>(action: Action, result: &Result<T>) -> Option<Notice> {
        match result {
            Ok(outcome) if outcome.is_noop() => None,
            Ok(_) => action
                .success_message()
                .map(|message| Notice::Success(message.to_string())),
            Err(Error::Validation { message }) => Some(Notice::Error(message.clone())),
            Err(e @ Error::Store { .. }) => {
                tracing::debug!(?action, error = %e, "store failure reported to user");
                Some(Notice::Error(action.failure_message().to_string()))
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}
