use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Roles an account may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// A document in the `user` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Canonical hyphenated UUID, stored as the primary key.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    pub username: String,
    /// Pre-computed password hash. Never derived or checked here.
    pub password: String,
    pub roles: BTreeSet<Role>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        // BSON datetimes hold milliseconds; truncate so the stored value round-trips.
        let now = Utc::now().trunc_subsecs(3);
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            username: username.into(),
            password: password_hash.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// The seed administrator: a single `admin` role.
    pub fn admin(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self::new(username, password_hash, [Role::Admin])
    }
}
