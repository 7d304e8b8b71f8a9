//! Authorization guards.
//!
//! Identity arrives from outside as an [`Actor`]; the guards here only decide
//! whether that actor may perform an action.

use thiserror::Error;

use neon_core::{Actor, ActorRole};

/// Errors returned when an actor may not perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The actor is not signed in.
    #[error("sign in required")]
    SignedOut,

    /// The actor is signed in but lacks the required role.
    #[error("{role} role may not access this resource")]
    Forbidden { role: ActorRole },
}

/// Require a signed-in actor.
///
/// # Errors
///
/// Returns `AuthError::SignedOut` for anonymous actors.
pub const fn require_signed_in(actor: &Actor) -> Result<(), AuthError> {
    if actor.is_authenticated {
        Ok(())
    } else {
        Err(AuthError::SignedOut)
    }
}

/// Require a signed-in administrator.
///
/// # Errors
///
/// Returns `AuthError::SignedOut` for anonymous actors and
/// `AuthError::Forbidden` for any other role.
pub fn require_admin(actor: &Actor) -> Result<(), AuthError> {
    require_signed_in(actor)?;
    if actor.is_admin() {
        Ok(())
    } else {
        tracing::warn!(role = %actor.role, "Rejected non-admin actor");
        Err(AuthError::Forbidden { role: actor.role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_signed_in() {
        assert_eq!(require_signed_in(&Actor::anonymous()), Err(AuthError::SignedOut));
        assert_eq!(require_signed_in(&Actor::customer()), Ok(()));
    }

    #[test]
    fn test_require_admin() {
        assert_eq!(require_admin(&Actor::anonymous()), Err(AuthError::SignedOut));
        assert_eq!(
            require_admin(&Actor::customer()),
            Err(AuthError::Forbidden {
                role: ActorRole::Customer
            })
        );
        assert_eq!(require_admin(&Actor::admin()), Ok(()));
    }

    #[test]
    fn test_anonymous_admin_role_still_signed_out() {
        let actor = Actor {
            is_authenticated: false,
            role: ActorRole::Admin,
        };
        assert_eq!(require_admin(&actor), Err(AuthError::SignedOut));
    }
}
