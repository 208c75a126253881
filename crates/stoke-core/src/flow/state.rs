use std::fmt;

use crate::domain::{Post, PostForm};

/// Observable phase of a [`PostFlow`](super::PostFlow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    /// Editing the form.
    Compose,
    /// Reviewing the materialized post.
    Preview,
    /// Waiting on verification or the backend.
    Submitting,
    /// Accepted by the backend. Terminal.
    Submitted,
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowPhase::Compose => "compose",
            FlowPhase::Preview => "preview",
            FlowPhase::Submitting => "submitting",
            FlowPhase::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

/// Data owned by each phase. At most one preview is live at a time.
#[derive(Debug, Clone)]
pub(super) enum Stage {
    Compose { form: PostForm },
    Preview { preview: Post },
    Submitting { preview: Post },
    Submitted { post: Post },
}

impl Stage {
    pub(super) fn phase(&self) -> FlowPhase {
        match self {
            Stage::Compose { .. } => FlowPhase::Compose,
            Stage::Preview { .. } => FlowPhase::Preview,
            Stage::Submitting { .. } => FlowPhase::Submitting,
            Stage::Submitted { .. } => FlowPhase::Submitted,
        }
    }
}
