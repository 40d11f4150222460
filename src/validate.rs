//! Contact input validation.
//!
//! Runs before any store interaction so malformed payloads never reach the
//! database. Produces a structured list of per-field errors rather than
//! failing on the first problem, so a client can surface all of them at once.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::store::ContactDraft;

/// Conservative email shape: local part, `@`, domain with at least one dot.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Digits plus common separators. No letters.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+()\-\s.]+$").expect("phone pattern is valid"));

/// A single validation failure, addressed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Which field failed.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a contact draft.
///
/// # Errors
///
/// Returns one [`FieldError`] per failing field. An empty `Ok(())` means the
/// draft is safe to hand to the store.
pub fn validate_draft(draft: &ContactDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(FieldError::new("name", "name must not be empty"));
    }

    if draft.email.trim().is_empty() {
        errors.push(FieldError::new("email", "email must not be empty"));
    } else if !EMAIL_RE.is_match(draft.email.trim()) {
        errors.push(FieldError::new("email", "email is not a valid address"));
    }

    if draft.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "phone must not be empty"));
    } else if !PHONE_RE.is_match(draft.phone.trim()) {
        errors.push(FieldError::new(
            "phone",
            "phone may only contain digits and separators",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
