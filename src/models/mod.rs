//! Domain models for the signup flow.
//!
//! - [`SignupForm`] - the fixed set of named string fields collected from
//!   the submission form
//! - [`FieldErrors`] - per-field validation messages; an absent entry
//!   means the field is valid
//! - [`Submission`] - an accepted form with id and receipt timestamp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Signup Form
// =============================================================================

/// A mentorship signup submission. All fields are required strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    /// Full name.
    pub name: String,
    /// Institutional email address.
    pub email: String,
    /// Declared major or program.
    pub major: String,
    /// Academic year.
    pub year: String,
}

// =============================================================================
// Field Errors
// =============================================================================

/// Validation failure messages keyed by field name.
///
/// Only invalid fields carry a message; serialization skips valid ones
/// entirely, so a fully valid form serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl FieldErrors {
    /// Whether every field passed validation.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.major.is_none() && self.year.is_none()
    }

    /// Present errors as `(field, message)` pairs, in field order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("major", &self.major),
            ("year", &self.year),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.as_deref().map(|m| (field, m)))
        .collect()
    }
}

// =============================================================================
// Submission
// =============================================================================

/// An accepted signup with server-assigned id and receipt time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Unique submission identifier.
    pub id: Uuid,
    /// When the submission was received.
    pub received_at: DateTime<Utc>,
    /// The submitted form.
    pub form: SignupForm,
}

impl Submission {
    /// Wrap a validated form with a fresh id and timestamp.
    pub fn new(form: SignupForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            form,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
