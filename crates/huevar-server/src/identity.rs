//! Caller identity verification.

use std::collections::BTreeSet;

use crate::error::Result;

/// Decides whether a user id may use the service.
pub trait IdentityVerifier: Send + Sync {
    /// Returns `Ok(false)` for unknown users; `Err` only when the check itself
    /// could not be performed.
    fn verify(&self, uid: &str) -> Result<bool>;
}

/// Accepts users from a fixed list.
///
/// An empty list accepts every non-empty id.
#[derive(Debug, Clone, Default)]
pub struct AllowListVerifier {
    users: BTreeSet<String>,
}

impl AllowListVerifier {
    /// Builds a verifier from user ids.
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }
}

impl IdentityVerifier for AllowListVerifier {
    fn verify(&self, uid: &str) -> Result<bool> {
        if uid.is_empty() {
            return Ok(false);
        }
        Ok(self.users.is_empty() || self.users.contains(uid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_accepts_any() {
        let v = AllowListVerifier::default();
        assert!(v.verify("anyone").unwrap());
        assert!(!v.verify("").unwrap());
    }

    #[test]
    fn test_list() {
        let v = AllowListVerifier::new(["alice", "bob"]);
        assert!(v.verify("alice").unwrap());
        assert!(!v.verify("mallory").unwrap());
    }
}
