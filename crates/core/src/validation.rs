//! Input validation for registration payloads and todo text.
//!
//! Registration bodies arrive as loose JSON, so the checks here cover shape
//! (presence, string-ness) as well as the length and email-format
//! constraints. The validator makes a single pass over the whole payload and
//! collects every violation instead of stopping at the first, so a client
//! sees all problems in one response.

use serde_json::Value;
use validator::ValidateEmail;

/// Minimum accepted length for usernames and passwords, in characters.
pub const CREDENTIAL_MIN_LEN: usize = 3;
/// Maximum accepted length for usernames and passwords, in characters.
pub const CREDENTIAL_MAX_LEN: usize = 30;
/// Minimum accepted length for todo text, in characters.
pub const TODO_TEXT_MIN_LEN: usize = 3;
/// Maximum accepted length for todo text, in characters.
pub const TODO_TEXT_MAX_LEN: usize = 100;

/// A single validation failure, tied to the offending field.
///
/// The `Display` strings are client-facing; handlers join them verbatim into
/// the error response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldViolation {
    /// The field is absent, JSON null, or an empty string.
    #[error("Missing field: {0}")]
    Missing(&'static str),

    /// The field is present but not a JSON string.
    #[error("Field '{0}' must be a string")]
    NotAString(&'static str),

    /// The field's character count falls outside the accepted range.
    #[error("Field '{field}' must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    /// The email field does not look like an email address.
    #[error("Invalid email format")]
    EmailFormat,
}

/// A registration payload that passed every check.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Validate a registration body, collecting every violation in one pass.
///
/// Field rules:
/// - `name`, `email`, `username`, `password` must all be present,
///   non-empty JSON strings;
/// - `username` and `password` must be [`CREDENTIAL_MIN_LEN`] to
///   [`CREDENTIAL_MAX_LEN`] characters;
/// - `email` must have valid email syntax.
///
/// A field that is missing or mistyped is reported once; the length and
/// format checks only run on fields that are actually strings.
pub fn validate_registration(body: &Value) -> Result<Registration, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let name = require_string(body, "name", &mut violations);
    let email = require_string(body, "email", &mut violations);
    let username = require_string(body, "username", &mut violations);
    let password = require_string(body, "password", &mut violations);

    if let Some(email) = &email {
        if !email.validate_email() {
            violations.push(FieldViolation::EmailFormat);
        }
    }
    if let Some(username) = &username {
        check_length(
            username,
            "username",
            CREDENTIAL_MIN_LEN,
            CREDENTIAL_MAX_LEN,
            &mut violations,
        );
    }
    if let Some(password) = &password {
        check_length(
            password,
            "password",
            CREDENTIAL_MIN_LEN,
            CREDENTIAL_MAX_LEN,
            &mut violations,
        );
    }

    match (name, email, username, password) {
        (Some(name), Some(email), Some(username), Some(password))
            if violations.is_empty() =>
        {
            Ok(Registration {
                name,
                email,
                username,
                password,
            })
        }
        _ => Err(violations),
    }
}

/// Validate the text of a todo item taken from a JSON body.
///
/// `field` names the JSON key for error messages (`"todo"` on create,
/// `"newData"` on edit).
pub fn validate_todo_text(
    value: Option<&Value>,
    field: &'static str,
) -> Result<String, FieldViolation> {
    let text = match value {
        None | Some(Value::Null) => return Err(FieldViolation::Missing(field)),
        Some(Value::String(s)) if s.is_empty() => return Err(FieldViolation::Missing(field)),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(FieldViolation::NotAString(field)),
    };

    let len = text.chars().count();
    if len < TODO_TEXT_MIN_LEN || len > TODO_TEXT_MAX_LEN {
        return Err(FieldViolation::Length {
            field,
            min: TODO_TEXT_MIN_LEN,
            max: TODO_TEXT_MAX_LEN,
        });
    }

    Ok(text)
}

/// True when `value` has valid email syntax.
///
/// Login uses this to decide whether an identifier should be looked up as an
/// email address or as a username.
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

/// Extract a required string field, recording a violation when it is absent,
/// null, empty, or not a string.
fn require_string(
    body: &Value,
    field: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::Missing(field));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(FieldViolation::Missing(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(FieldViolation::NotAString(field));
            None
        }
    }
}

/// Record a length violation when the character count is outside [min, max].
fn check_length(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
    violations: &mut Vec<FieldViolation>,
) {
    let len = value.chars().count();
    if len < min || len > max {
        violations.push(FieldViolation::Length { field, min, max });
    }
}
