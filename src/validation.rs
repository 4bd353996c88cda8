//! Input validation for the user service layer.
//!
//! The checks here replace declarative annotations: each service operation
//! calls them explicitly before touching storage.

use crate::error::{Error, Result};
use crate::models::users::UserRequest;

/// Maximum length of every user column (matches the table schema).
pub const MAX_FIELD_LENGTH: usize = 100;

/// Validates email format
///
/// # Arguments
/// * `email` - The email address to validate
///
/// # Returns
/// * `Ok(())` if the email is valid
/// * `Err(Error)` with descriptive message if invalid
pub fn validate_email(email: &str) -> Result<()> {
    // Validates the value exactly as it will be stored, whitespace included
    if email.is_empty() {
        return Err(Error::Validation("Email cannot be empty".to_string()));
    }

    if email.len() > MAX_FIELD_LENGTH {
        return Err(Error::Validation(format!(
            "Email is too long (max {} characters)",
            MAX_FIELD_LENGTH
        )));
    }

    // Check for basic structure
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(Error::Validation(
            "Invalid email format: must contain @ symbol not at start or end".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(Error::Validation(
            "Invalid email format: must contain exactly one @ symbol".to_string(),
        ));
    }

    let (local_part, domain) = (parts[0], parts[1]);

    if local_part.is_empty() {
        return Err(Error::Validation(
            "Invalid email format: local part cannot be empty".to_string(),
        ));
    }

    if domain.is_empty() {
        return Err(Error::Validation(
            "Invalid email format: domain part cannot be empty".to_string(),
        ));
    }

    // Check domain has at least one dot
    if !domain.contains('.') {
        return Err(Error::Validation(
            "Invalid email format: domain must contain at least one dot".to_string(),
        ));
    }

    // Check for consecutive dots
    if email.contains("..") {
        return Err(Error::Validation(
            "Invalid email format: cannot contain consecutive dots".to_string(),
        ));
    }

    // Check for whitespace anywhere, padding included
    if email.chars().any(|c| c.is_whitespace()) {
        return Err(Error::Validation(
            "Invalid email format: cannot contain whitespace".to_string(),
        ));
    }

    // Check for invalid characters
    let invalid_chars = ['<', '>', '(', ')', '[', ']', '\\', ',', ';', ':', '"'];
    for char in invalid_chars.iter() {
        if email.contains(*char) {
            return Err(Error::Validation(format!(
                "Invalid email format: cannot contain '{}'",
                char
            )));
        }
    }

    Ok(())
}

/// Validates an optional string field against the column width.
pub fn validate_field_length(value: &Option<String>, field_name: &str) -> Result<()> {
    if let Some(value) = value {
        if value.len() > MAX_FIELD_LENGTH {
            return Err(Error::Validation(format!(
                "{} is too long (max {} characters)",
                field_name, MAX_FIELD_LENGTH
            )));
        }
    }

    Ok(())
}

/// Validates the shape of a user request: email format when present, and
/// column widths for every string field. Presence of required fields is
/// not checked here; that is the storage contract.
pub fn validate_user_request(request: &UserRequest) -> Result<()> {
    if let Some(email) = &request.email {
        validate_email(email)?;
    }

    validate_field_length(&request.first_name, "First name")?;
    validate_field_length(&request.last_name, "Last name")?;
    validate_field_length(&request.address, "Address")?;
    validate_field_length(&request.phone, "Phone")?;

    Ok(())
}
