//! Who is performing an availability edit

use serde::{Deserialize, Serialize};

use super::availability::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Volunteer,
}

crate::impl_keyword_conversions!(Role {
    Admin => "admin",
    Volunteer => "volunteer",
});

/// The authenticated caller, as supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self { user_id: UserId::new(user_id), role: Role::Admin }
    }

    pub fn volunteer(user_id: impl Into<String>) -> Self {
        Self { user_id: UserId::new(user_id), role: Role::Volunteer }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may act for anyone; volunteers only for themselves.
    pub fn may_act_for(&self, user: &UserId) -> bool {
        self.is_admin() || self.user_id == *user
    }
}
