use serde::{Deserialize, Serialize};

/// Login state of the person composing the post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { email: String, token: String },
}

impl Session {
    pub fn authenticated(email: impl Into<String>, token: impl Into<String>) -> Self {
        Session::Authenticated {
            email: email.into(),
            token: token.into(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Session::Authenticated { email, .. } => Some(email),
            Session::Anonymous => None,
        }
    }

    /// Bearer token for authenticated requests.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }
}
