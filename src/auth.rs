//! Current-user capability.
//!
//! Authentication happens elsewhere; the engine only receives the result as
//! an [`AuthSession`] value at construction time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user registered with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    CoDesigner,
    Facilitator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoDesigner => "co-designer",
            Self::Facilitator => "facilitator",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "co-designer" => Some(Self::CoDesigner),
            "facilitator" => Some(Self::Facilitator),
            _ => None,
        }
    }
}

/// The user as reported by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

/// Identity, role and bearer token of whoever is driving the engine.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: CurrentUser,
    pub token: Option<String>,
}

impl AuthSession {
    pub fn new(user: CurrentUser, token: Option<String>) -> Self {
        Self { user, token }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Project creation and deletion controls are facilitator-only.
    pub fn can_manage_projects(&self) -> bool {
        self.user.role == Role::Facilitator
    }
}
