use crate::domain::Session;

/// Read-only view of the externally owned login state.
pub trait SessionProvider: Send + Sync {
    fn session(&self) -> Session;
}

impl SessionProvider for Session {
    fn session(&self) -> Session {
        self.clone()
    }
}
