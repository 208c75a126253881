//! Flow-level error types.

use std::time::Duration;

use thiserror::Error;
use validator::ValidationErrors;

use crate::flow::FlowPhase;
use crate::ports::{TransportError, VerificationError};

/// Errors returned by [`PostFlow`](crate::flow::PostFlow) transitions.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Form has invalid fields: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Cannot {action} while in {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: FlowPhase,
    },

    #[error("Cannot edit a post that has no id")]
    MissingPostId,

    #[error("A submission is already in flight")]
    SubmitInFlight,

    #[error("Submission cancelled")]
    Cancelled,

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Why a submission failed. Kept on the flow as the submit-error banner.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("Bot verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Editing a post requires a logged-in session")]
    Unauthenticated,

    #[error("No response after {0:?}")]
    TimedOut(Duration),
}
