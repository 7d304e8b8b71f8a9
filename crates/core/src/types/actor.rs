//! The acting user, as reported by whatever identity provider is in use.
//!
//! The storefront never talks to an identity vendor directly. It is handed an
//! [`Actor`] and asks two questions of it: is this person signed in, and what
//! role do they hold.

use serde::{Deserialize, Serialize};

/// Role held by the current actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Not signed in.
    #[default]
    Guest,
    /// Signed-in shopper.
    Customer,
    /// Full access to the back office.
    Admin,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid actor role: {s}")),
        }
    }
}

/// Identity capability injected into the session and admin layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Actor {
    /// Whether the identity provider reports a signed-in user.
    pub is_authenticated: bool,
    /// Role attached to the user's account.
    pub role: ActorRole,
}

impl Actor {
    /// A signed-out visitor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            role: ActorRole::Guest,
        }
    }

    /// A signed-in shopper.
    #[must_use]
    pub const fn customer() -> Self {
        Self {
            is_authenticated: true,
            role: ActorRole::Customer,
        }
    }

    /// A signed-in administrator.
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            is_authenticated: true,
            role: ActorRole::Admin,
        }
    }

    /// A signed-in user holding `role`.
    ///
    /// `ActorRole::Guest` yields an anonymous actor.
    #[must_use]
    pub const fn with_role(role: ActorRole) -> Self {
        match role {
            ActorRole::Guest => Self::anonymous(),
            ActorRole::Customer => Self::customer(),
            ActorRole::Admin => Self::admin(),
        }
    }

    /// Whether this actor may use the back office.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_authenticated && matches!(self.role, ActorRole::Admin)
    }
}
