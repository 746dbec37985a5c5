//! Ticket domain model and registration input validation.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, SHORT_ID_LEN};

#[cfg(test)]
mod tests;

/// `local@domain.tld` with no whitespace and a dot in the domain.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A single-use event ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub ticket_id: String,
    pub name: String,
    pub email: String,
    pub scanned: bool,
    pub created_at: DateTime<Utc>,
    pub scanned_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Creates an unscanned ticket with a fresh UUID v4 identifier.
    pub fn issue(registration: ValidRegistration, now: DateTime<Utc>) -> Self {
        Ticket {
            ticket_id: Uuid::new_v4().to_string(),
            name: registration.name,
            email: registration.email,
            scanned: false,
            created_at: now,
            scanned_at: None,
        }
    }

    pub fn short_id(&self) -> &str {
        short_id(&self.ticket_id)
    }
}

/// First `SHORT_ID_LEN` characters of a ticket id.
pub fn short_id(ticket_id: &str) -> &str {
    match ticket_id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &ticket_id[..idx],
        None => ticket_id,
    }
}

/// Registration request body. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Registration input that passed validation (trimmed, non-empty, well-formed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
}

/// Why a registration was rejected. The display text is returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Name and email are required")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Name must be at most {} characters", MAX_NAME_LENGTH)]
    NameTooLong,
    #[error("Email must be at most {} characters", MAX_EMAIL_LENGTH)]
    EmailTooLong,
}

impl Registration {
    /// Trims and checks the submitted name and email.
    pub fn validate(&self) -> Result<ValidRegistration, RegistrationError> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(RegistrationError::MissingFields);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(RegistrationError::NameTooLong);
        }
        if email.len() > MAX_EMAIL_LENGTH {
            return Err(RegistrationError::EmailTooLong);
        }
        // The mailer must accept the address too, or the ticket cannot be delivered
        if !EMAIL_PATTERN.is_match(email) || email.parse::<lettre::Address>().is_err() {
            return Err(RegistrationError::InvalidEmail);
        }

        Ok(ValidRegistration {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}
