//! Small input checks shared by the create/update payloads.

use campusdesk_core::error::AppError;
use validator::ValidateEmail;

/// Trim a required text field, rejecting blank values.
pub fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional patch field; `Some("")` is rejected like a blank create.
pub fn optional(field: &str, value: Option<&str>) -> Result<Option<String>, AppError> {
    value.map(|v| required(field, v)).transpose()
}

/// Trim and lowercase an email address, rejecting anything the `validator`
/// crate's email rule rejects.
pub fn email(value: &str) -> Result<String, AppError> {
    let email = required("email", value)?.to_lowercase();
    if !email.validate_email() {
        return Err(AppError::validation(format!("Invalid email address: '{value}'")));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Lab 1 ").unwrap(), "Lab 1");
        assert!(required("name", "   ").is_err());
    }

    #[test]
    fn test_email_normalizes_case() {
        assert_eq!(email("Admin@Campus.EDU").unwrap(), "admin@campus.edu");
        assert!(email("not-an-email").is_err());
        assert!(email("@campus.edu").is_err());
        assert!(email("bad email@x.y").is_err());
        assert!(email("a@b@campus.edu").is_err());
    }
}
