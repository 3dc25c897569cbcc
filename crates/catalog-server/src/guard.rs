//! Access guard for mutating operations
//!
//! The guard receives the caller identity as an explicit parameter and
//! returns the admitted identity. Nothing here reads ambient request
//! state.

use catalog_types::Identity;

#[derive(Debug, thiserror::Error)]
#[error("caller is not authorized")]
pub struct Denied;

pub trait AccessGuard: Send + Sync {
    /// Decide whether `caller` may perform a mutating operation.
    fn authorize(&self, caller: Option<&Identity>) -> Result<Identity, Denied>;
}

/// Production guard: any authenticated caller may mutate the catalog.
pub struct AuthenticatedGuard;

impl AccessGuard for AuthenticatedGuard {
    fn authorize(&self, caller: Option<&Identity>) -> Result<Identity, Denied> {
        caller.cloned().ok_or(Denied)
    }
}

#[cfg(test)]
pub struct DenyAll;

#[cfg(test)]
impl AccessGuard for DenyAll {
    fn authorize(&self, _caller: Option<&Identity>) -> Result<Identity, Denied> {
        Err(Denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_guard_admits_known_identity() {
        let identity = Identity {
            user_id: 1,
            email: "alice@example.com".to_string(),
        };
        let admitted = AuthenticatedGuard.authorize(Some(&identity)).unwrap();
        assert_eq!(admitted, identity);
    }

    #[test]
    fn authenticated_guard_refuses_anonymous_caller() {
        assert!(AuthenticatedGuard.authorize(None).is_err());
    }
}
