//! Submitted form payloads and their validation.
//!
//! Fields arrive as raw strings so that bad input becomes a field error on
//! the re-rendered form instead of an extractor rejection.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::LeagueConfig;
use crate::models::{League, NewLeague};

/// Key for errors that belong to the form as a whole.
pub const NON_FIELD: &str = "__all__";

const MAX_USERNAME_LEN: usize = 150;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_LEAGUE_NAME_LEN: usize = 100;
const MAX_REQUEST_MESSAGE_LEN: usize = 500;

/// Path segments under `/users/` that a profile name would shadow.
const RESERVED_USERNAMES: &[&str] = &["new"];

/// Validation errors keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .0
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| format!("{field}: {m}")))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

impl RegisterForm {
    /// Checks everything that does not need the database.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = self.username.trim();

        if username.is_empty() {
            errors.add("username", "This field is required.");
        } else if username.chars().count() > MAX_USERNAME_LEN {
            errors.add(
                "username",
                format!("Ensure this value has at most {MAX_USERNAME_LEN} characters."),
            );
        } else if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            errors.add(
                "username",
                "Enter a valid username. It may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        } else if RESERVED_USERNAMES.contains(&username)
            || username.bytes().all(|b| b.is_ascii_digit())
        {
            // All-digit segments are read as user ids.
            errors.add("username", "That username is reserved.");
        }

        if self.password1.is_empty() {
            errors.add("password1", "This field is required.");
        } else if self.password1.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password1",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
            );
        }

        if self.password2.is_empty() {
            errors.add("password2", "This field is required.");
        } else if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
        }

        errors.into_result(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

/// League creation and settings form. `public` is an HTML checkbox, so it
/// is only present when ticked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeagueForm {
    pub name: String,
    pub size: String,
    pub public: Option<String>,
}

impl LeagueForm {
    #[must_use]
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            size: "10".to_string(),
            public: None,
        }
    }

    #[must_use]
    pub fn from_league(league: &League) -> Self {
        Self {
            name: league.name.clone(),
            size: league.size.to_string(),
            public: league.public.then(|| "on".to_string()),
        }
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.public
            .as_deref()
            .is_some_and(|v| matches!(v, "on" | "true" | "1"))
    }

    pub fn validate(&self, limits: &LeagueConfig) -> Result<NewLeague, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();

        if name.is_empty() {
            errors.add("name", "This field is required.");
        } else if name.chars().count() > MAX_LEAGUE_NAME_LEN {
            errors.add(
                "name",
                format!("Ensure this value has at most {MAX_LEAGUE_NAME_LEN} characters."),
            );
        }

        let size = match self.size.trim() {
            "" => {
                errors.add("size", "This field is required.");
                0
            }
            raw => match raw.parse::<i32>() {
                Ok(size) if (limits.min_size..=limits.max_size).contains(&size) => size,
                Ok(_) => {
                    errors.add(
                        "size",
                        format!(
                            "League size must be between {} and {}.",
                            limits.min_size, limits.max_size
                        ),
                    );
                    0
                }
                Err(_) => {
                    errors.add("size", "Enter a whole number.");
                    0
                }
            },
        };

        errors.into_result(NewLeague {
            name: name.to_string(),
            size,
            public: self.is_public(),
        })
    }
}

/// Optional note sent along with a request to join a private league.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JoinForm {
    pub message: Option<String>,
}

impl JoinForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let message = self.message.as_deref().unwrap_or_default().trim();

        if message.chars().count() > MAX_REQUEST_MESSAGE_LEN {
            return Err(FieldErrors::single(
                "message",
                format!("Ensure this value has at most {MAX_REQUEST_MESSAGE_LEN} characters."),
            ));
        }

        Ok(message.to_string())
    }
}
