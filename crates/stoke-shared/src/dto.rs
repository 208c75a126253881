//! Data Transfer Objects - response bodies of the posts API.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned after a post is created or updated.
///
/// Backends differ in what they echo back, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAck {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PostAck {
    /// Read an acknowledgement out of a JSON body, if it has that shape.
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(body.clone()).ok()
    }
}
