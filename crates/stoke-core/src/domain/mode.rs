use serde::{Deserialize, Serialize};

/// Whether the composer creates a new post or edits a stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ComposeMode {
    Create,
    Edit { post_id: String },
}

impl ComposeMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, ComposeMode::Edit { .. })
    }
}
