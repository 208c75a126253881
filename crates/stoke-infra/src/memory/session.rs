//! In-memory session holder - login state handed to the composer.

use stoke_core::domain::Session;
use stoke_core::ports::SessionProvider;

/// Session state captured when the composer starts.
#[derive(Debug, Default)]
pub struct InMemorySession {
    session: Session,
}

impl InMemorySession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Build from `SESSION_EMAIL` and `SESSION_TOKEN`; anonymous unless both are set.
    pub fn from_env() -> Self {
        let email = std::env::var("SESSION_EMAIL").ok().filter(|v| !v.is_empty());
        let token = std::env::var("SESSION_TOKEN").ok().filter(|v| !v.is_empty());

        let session = match (email, token) {
            (Some(email), Some(token)) => Session::authenticated(email, token),
            _ => {
                tracing::debug!("No session credentials, composing anonymously");
                Session::Anonymous
            }
        };
        Self::new(session)
    }
}

impl SessionProvider for InMemorySession {
    fn session(&self) -> Session {
        self.session.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_is_handed_out_unchanged() {
        assert_eq!(InMemorySession::default().session(), Session::Anonymous);

        let member = InMemorySession::new(Session::authenticated("member@example.com", "abc"));
        assert_eq!(member.session().email(), Some("member@example.com"));
        assert_eq!(member.session().token(), Some("abc"));
    }
}
