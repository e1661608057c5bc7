//! Alerts: modals specialized to a short message and a few tagged actions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinator::ActionContext;

/// Disposition tag of an alert action.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRole {
    #[default]
    Default,
    Destructive,
    Cancel,
}

/// What an action handler asks for once it has run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AlertResponse {
    /// Remove the alert from the modal stack.
    #[default]
    Dismiss,
    /// Leave the alert presented.
    KeepPresented,
}

/// Opaque callback run when the user taps an action.
pub type ActionHandler =
    Arc<dyn Fn(&mut ActionContext) -> anyhow::Result<AlertResponse> + Send + Sync>;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Alert '{title}' has {count} cancel actions; at most one is allowed")]
    MultipleCancelActions { title: String, count: usize },
}

/// One button of an alert.
#[derive(Clone)]
pub struct AlertAction {
    label: String,
    role: ActionRole,
    handler: ActionHandler,
}

impl AlertAction {
    pub fn new<F>(label: impl Into<String>, role: ActionRole, handler: F) -> Self
    where
        F: Fn(&mut ActionContext) -> anyhow::Result<AlertResponse> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            role,
            handler: Arc::new(handler),
        }
    }

    /// An action whose only effect is dismissing the alert.
    pub fn dismissing(label: impl Into<String>, role: ActionRole) -> Self {
        Self::new(label, role, |_| Ok(AlertResponse::Dismiss))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn role(&self) -> ActionRole {
        self.role
    }

    pub(crate) fn handler(&self) -> ActionHandler {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("label", &self.label)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

// Handlers are opaque: two actions are equal when they look the same.
impl PartialEq for AlertAction {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.role == other.role
    }
}

impl Eq for AlertAction {}

/// A confirmation or notification dialog.
///
/// Invariant: at most one action carries [`ActionRole::Cancel`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    title: String,
    message: Option<String>,
    actions: Vec<AlertAction>,
}

impl Alert {
    pub fn builder(title: impl Into<String>) -> AlertBuilder {
        AlertBuilder {
            title: title.into(),
            message: None,
            actions: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn actions(&self) -> &[AlertAction] {
        &self.actions
    }

    pub fn action(&self, index: usize) -> Option<&AlertAction> {
        self.actions.get(index)
    }

    /// Index of the first action with the given label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.actions.iter().position(|a| a.label == label)
    }

    pub fn cancel_index(&self) -> Option<usize> {
        self.actions.iter().position(|a| a.role == ActionRole::Cancel)
    }
}

pub struct AlertBuilder {
    title: String,
    message: Option<String>,
    actions: Vec<AlertAction>,
}

impl AlertBuilder {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn action(mut self, action: AlertAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Shorthand for a plain cancel button.
    pub fn cancel(self, label: impl Into<String>) -> Self {
        self.action(AlertAction::dismissing(label, ActionRole::Cancel))
    }

    pub fn build(self) -> Result<Alert, AlertError> {
        let count = self
            .actions
            .iter()
            .filter(|a| a.role == ActionRole::Cancel)
            .count();
        if count > 1 {
            return Err(AlertError::MultipleCancelActions {
                title: self.title,
                count,
            });
        }
        Ok(Alert {
            title: self.title,
            message: self.message,
            actions: self.actions,
        })
    }
}
