//! Session store: the bearer token and the advisory user role.
//!
//! A [`Session`] is built once at startup and handed to every component that
//! issues requests. Clones share the same backing storage.
//!
//! The role is a UI hint only. It is whatever the last `v1/auth/me` call
//! returned and is never re-validated, so nothing in this crate treats it as
//! an access-control decision; the backend answers 401/403 when it matters.

pub mod storage;

use std::sync::Arc;

use serde::Serialize;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

pub const TOKEN_KEY: &str = "session_token";
pub const ROLE_KEY: &str = "user_role";

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

/// Point-in-time copy of the session, for status output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Session that lives as long as the process
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set_item(TOKEN_KEY, token);
    }

    pub fn get_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn clear_token(&self) {
        self.storage.remove_item(TOKEN_KEY);
    }

    pub fn set_user_role(&self, role: &str) {
        self.storage.set_item(ROLE_KEY, role);
    }

    pub fn get_user_role(&self) -> Option<String> {
        self.storage.get_item(ROLE_KEY)
    }

    /// Presence check only; says nothing about validity or expiry
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some_and(|t| !t.is_empty())
    }

    /// Drop both token and role
    pub fn logout(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(ROLE_KEY);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.get_token(),
            role: self.get_user_role(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("role", &self.get_user_role())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());
        assert_eq!(session.snapshot(), SessionSnapshot { token: None, role: None });
    }

    #[test]
    fn token_and_role_have_independent_lifecycles() {
        let session = Session::in_memory();
        session.set_token("abc123");
        assert!(session.is_authenticated());
        assert_eq!(session.get_user_role(), None);

        session.set_user_role("admin");
        session.clear_token();
        assert!(!session.is_authenticated());
        assert_eq!(session.get_user_role().as_deref(), Some("admin"));
    }

    #[test]
    fn logout_clears_everything() {
        let session = Session::in_memory();
        session.set_token("abc123");
        session.set_user_role("user");

        session.logout();
        assert_eq!(session.get_token(), None);
        assert_eq!(session.get_user_role(), None);
    }

    #[test]
    fn clones_share_storage() {
        let session = Session::in_memory();
        let other = session.clone();
        session.set_token("shared");
        assert_eq!(other.get_token().as_deref(), Some("shared"));
    }

    #[test]
    fn debug_output_hides_token() {
        let session = Session::in_memory();
        session.set_token("very-secret");
        let printed = format!("{session:?}");
        assert!(!printed.contains("very-secret"));
        assert!(printed.contains("authenticated: true"));
    }
}
