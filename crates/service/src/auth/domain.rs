use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visitor registration input. Fields are optional so that missing or non-string values
/// surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub full_name: Option<String>,
}

/// Login input, shared by the admin and visitor flows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub password: Option<String>,
}

/// Registered visitor account as stored in `users.json`.
///
/// The password is kept exactly as submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Case-insensitive username comparison used for uniqueness and reservation.
    pub fn username_matches(&self, other: &str) -> bool {
        self.username.to_lowercase() == other.to_lowercase()
    }
}

/// What a successful visitor login reveals about the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitorProfile {
    pub username: String,
    pub full_name: String,
}

impl From<&User> for VisitorProfile {
    fn from(u: &User) -> Self {
        Self { username: u.username.clone(), full_name: u.full_name.clone() }
    }
}
