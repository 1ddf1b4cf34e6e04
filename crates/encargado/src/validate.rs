//! Input checks performed by the presentation layer.
//!
//! The data operations accept whatever they are given. Anything a user types
//! goes through these functions first.

use crate::error::{Error, Result};
use crate::model::MAX_PHOTOS_PER_EVENT;

/// Trim a zone name and reject it if empty.
///
/// # Errors
///
/// Returns a validation error for blank names.
pub fn zone_name(name: &str) -> Result<String> {
    non_blank("zone name", name)
}

/// Trim an event description and reject it if empty.
///
/// # Errors
///
/// Returns a validation error for blank descriptions.
pub fn event_description(description: &str) -> Result<String> {
    non_blank("description", description)
}

/// Reject more photos than an event can hold.
///
/// # Errors
///
/// Returns a validation error when `count` exceeds the per-event limit.
pub fn photo_count(count: usize) -> Result<()> {
    if count > MAX_PHOTOS_PER_EVENT {
        return Err(Error::validation(
            "photos",
            format!("at most {MAX_PHOTOS_PER_EVENT} photos per event, got {count}"),
        ));
    }
    Ok(())
}

/// Check a new password against its confirmation and the minimum length.
///
/// Length is counted in characters, not bytes.
///
/// # Errors
///
/// Returns a validation error if the two entries differ or the password is
/// too short.
pub fn new_password(password: &str, confirmation: &str, min_length: usize) -> Result<()> {
    if password != confirmation {
        return Err(Error::validation("password", "passwords do not match"));
    }
    if password.chars().count() < min_length {
        return Err(Error::validation(
            "password",
            format!("must be at least {min_length} characters"),
        ));
    }
    Ok(())
}

fn non_blank(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
