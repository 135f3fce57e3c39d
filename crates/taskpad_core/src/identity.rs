//! Opaque user identity for per-user store namespaces.
//!
//! # Responsibility
//! - Resolve an opaque `UserId` anonymously or from a pre-issued token.
//! - Keep identity semantics out of the controller, which only carries the
//!   resolved id as a prerequisite for store operations.
//!
//! # Invariants
//! - A `UserId` is never interpreted; it is only compared and forwarded.
//! - Token resolution never performs network or credential checks here;
//!   those belong to whatever issued the token.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque per-user namespace identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

/// Identity resolution failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// A pre-issued token must carry a non-empty identifier.
    EmptyToken,
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "identity token cannot be empty"),
        }
    }
}

impl Error for IdentityError {}

impl UserId {
    /// Yields a fresh anonymous identity.
    ///
    /// Each call produces a distinct namespace, mirroring anonymous sign-in
    /// where the backend mints a throwaway user record.
    pub fn anonymous() -> Self {
        Self(format!("anon-{}", Uuid::new_v4()))
    }

    /// Resolves the opaque identity carried by a pre-issued token.
    ///
    /// The token payload is passed through untouched apart from trimming;
    /// validating it against an issuer is out of scope for the engine.
    ///
    /// # Errors
    /// - `IdentityError::EmptyToken` when the token trims to nothing.
    pub fn from_token(token: &str) -> Result<Self, IdentityError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::EmptyToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice for store namespacing.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
