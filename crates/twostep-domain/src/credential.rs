//! Credential domain types.

use serde::{Deserialize, Serialize};

/// Out-of-band channel a one-time code is delivered over.
///
/// Wire format: lowercase string (`"text"` or `"voice"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Text,
    Voice,
}

impl ContactChannel {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_name(v: &str) -> Option<Self> {
        match v {
            "text" => Some(Self::Text),
            "voice" => Some(Self::Voice),
            _ => None,
        }
    }

    /// Convert to the wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
        }
    }
}

/// Identity record the authentication flow runs against.
///
/// Owned by an external credential store; the core holds it by reference
/// (cloned into session records, never mutated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub full_name: String,
    pub phone: String,
    pub contact_channel: ContactChannel,
    pub password: String,
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Field-level validation failures for a credential. Every failing field is
/// reported, not just the first.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a credential before it is stored: `username` required and
/// ASCII-alphanumeric, `full_name`/`password`/`phone` required. The contact
/// channel is enforced by the type.
pub fn validate_credential(credential: &Credential) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if credential.username.is_empty() {
        errors.push(FieldError {
            field: "username",
            message: "username is required",
        });
    } else if !credential
        .username
        .chars()
        .all(|c| c.is_ascii_alphanumeric())
    {
        errors.push(FieldError {
            field: "username",
            message: "username must be alphanumeric",
        });
    }

    if credential.full_name.trim().is_empty() {
        errors.push(FieldError {
            field: "full_name",
            message: "full name is required",
        });
    }

    if credential.password.is_empty() {
        errors.push(FieldError {
            field: "password",
            message: "password is required",
        });
    }

    if credential.phone.trim().is_empty() {
        errors.push(FieldError {
            field: "phone",
            message: "phone is required",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}
