//! Identity claims carried in a bearer token
//!
//! One canonical, flat payload shape is used by every decode site:
//!
//! ```json
//! { "id": "42", "name": "Ada", "email": "ada@example.com", "role": ["Admin"], "exp": 1700000000 }
//! ```
//!
//! `id` also accepts `sub` and numeric values; `role` also accepts `roles`
//! and a bare string. When both spellings are present, `id` and `role` win.

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Identity claim set decoded from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClaims")]
pub struct IdentityClaims {
    /// Subject (user ID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Role labels, first one is the primary role
    pub role: Vec<Role>,
    /// Expires at (Unix seconds); absent means non-expiring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl IdentityClaims {
    pub fn has_role(&self, role: Role) -> bool {
        self.role.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.role.iter().any(Role::is_admin)
    }

    /// Role shown to the UI
    pub fn primary_role(&self) -> Option<Role> {
        self.role.first().copied()
    }

    /// Expired iff `exp` is present and not strictly after `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(i64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Role),
    Many(Vec<Role>),
}

impl From<OneOrMany> for Vec<Role> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(role) => vec![role],
            OneOrMany::Many(roles) => roles,
        }
    }
}

/// Wire payload before the alternative spellings are merged
#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    id: Option<StringOrNumber>,
    #[serde(default)]
    sub: Option<StringOrNumber>,
    name: String,
    email: String,
    #[serde(default)]
    role: Option<OneOrMany>,
    #[serde(default)]
    roles: Option<OneOrMany>,
    #[serde(default)]
    exp: Option<i64>,
}

impl TryFrom<RawClaims> for IdentityClaims {
    type Error = String;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.sub)
            .ok_or_else(|| "missing field `id`".to_string())?;
        let role = raw
            .role
            .or(raw.roles)
            .ok_or_else(|| "missing field `role`".to_string())?;

        Ok(Self {
            id: id.into(),
            name: raw.name,
            email: raw.email,
            role: role.into(),
            exp: raw.exp,
        })
    }
}
