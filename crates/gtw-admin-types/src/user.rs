//! User records, roles and the persisted credential bundle

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Role attached to a backend user
///
/// Only [`Role::Admin`] opens the console. Role names the console does not
/// know deserialize to [`Role::Unknown`] and are treated like any other
/// non-admin role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Administrator, the only role allowed in
    Admin,
    /// Regular site user
    User,
    /// Any other role name
    Unknown,
}

impl Role {
    /// Map a backend role name to a role. Matching is exact.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "admin" => Self::Admin,
            "user" => Self::User,
            _ => Self::Unknown,
        }
    }

    /// Backend name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this role grants access to the console
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// A user as returned by the login endpoint and cached in storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawUserRecord")]
pub struct UserRecord {
    /// Backend identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Access role
    pub role: Role,
}

/// Wire shape of a user; the backend may send `_id`, `id` or both.
#[derive(Deserialize)]
struct RawUserRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    role: Role,
}

impl From<RawUserRecord> for UserRecord {
    fn from(raw: RawUserRecord) -> Self {
        Self {
            id: raw.id.or(raw.object_id).unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            role: raw.role,
        }
    }
}

/// Outcome of checking a persisted user value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidation {
    /// The value is a well-formed user record
    Valid(UserRecord),
    /// The value is not JSON, not an object, or has no usable `role`
    Invalid,
}

impl UserRecord {
    /// Parse and validate a persisted user value
    #[must_use]
    pub fn validate(raw: &str) -> UserValidation {
        serde_json::from_str::<Self>(raw).map_or(UserValidation::Invalid, UserValidation::Valid)
    }

    /// Whether this user may use the console
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A user whose role has been checked to be [`Role::Admin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser(UserRecord);

impl AdminUser {
    /// The underlying record
    #[must_use]
    pub const fn record(&self) -> &UserRecord {
        &self.0
    }

    /// Give back the underlying record
    #[must_use]
    pub fn into_record(self) -> UserRecord {
        self.0
    }
}

impl TryFrom<UserRecord> for AdminUser {
    type Error = UserRecord;

    /// Fails with the rejected record when the role is not admin
    fn try_from(user: UserRecord) -> Result<Self, Self::Error> {
        if user.is_admin() { Ok(Self(user)) } else { Err(user) }
    }
}

/// Access token, refresh token and user, persisted together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    /// Bearer token sent with every request
    pub access_token: String,
    /// Refresh token, stored alongside but never used by the console
    pub refresh_token: String,
    /// Cached user
    pub user: UserRecord,
}

impl CredentialBundle {
    /// Both tokens are present and non-empty
    #[must_use]
    pub fn has_tokens(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}

/// Body returned by `POST /auth/admin-login`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Backend success flag
    #[serde(default)]
    pub success: bool,
    /// Access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// Refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Logged-in user
    #[serde(default)]
    pub user: Option<UserRecord>,
    /// Optional server message
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Turn a successful response into a bundle; `None` when anything is missing
    #[must_use]
    pub fn into_bundle(self) -> Option<CredentialBundle> {
        if !self.success {
            return None;
        }
        Some(CredentialBundle {
            access_token: self.access_token?,
            refresh_token: self.refresh_token?,
            user: self.user?,
        })
    }
}
