//! Workflow error types.
//!
//! The engine reports exactly why a transition was refused so the
//! calling UI can explain a disabled button: `InvalidTransition` means
//! the action is not reachable from the current state, `Forbidden` means
//! the state was fine but the actor's role or ownership failed the
//! guard. The engine supplies the reason code, never the message text
//! shown to users.

use thiserror::Error;

/// Errors that can occur during workflow transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The requested action is not reachable from the current state.
    #[error("Cannot {action} from status {from}")]
    InvalidTransition {
        /// The current status.
        from: String,
        /// The attempted action.
        action: String,
    },

    /// The state allows the action but the actor's role or ownership
    /// fails the guard.
    #[error("Role {role} may not {action} this item")]
    Forbidden {
        /// The actor's effective role.
        role: String,
        /// The attempted action.
        action: String,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::RejectionReasonRequired => 400,
            Self::Forbidden { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
        }
    }

    pub(crate) fn invalid(from: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            action: action.into(),
        }
    }

    pub(crate) fn forbidden(role: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Forbidden {
            role: role.into(),
            action: action.into(),
        }
    }
}
