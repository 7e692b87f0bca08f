use serde::{Deserialize, Serialize};

use crate::entities::users;

/// User data without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

/// How a profile URL names its user: `/users/7` or `/users/alice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
    Id(i32),
    Username(String),
}

impl UserKey {
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        if !segment.is_empty()
            && segment.bytes().all(|b| b.is_ascii_digit())
            && let Ok(id) = segment.parse()
        {
            return Self::Id(id);
        }
        Self::Username(segment.to_string())
    }
}

impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Username(name) => write!(f, "'{name}'"),
        }
    }
}
