use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::error::ApiError;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_MESSAGE_LEN: usize = 2000;

/// First violated rule wins; checks run in the order declared here:
/// presence, then lengths, then email shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Message is required")]
    MessageRequired,
    #[error("Name must be at most {MAX_NAME_LEN} characters")]
    NameTooLong,
    #[error("Email must be at most {MAX_EMAIL_LEN} characters")]
    EmailTooLong,
    #[error("Message must be at most {MAX_MESSAGE_LEN} characters")]
    MessageTooLong,
    #[error("Phone must be at most {MAX_PHONE_LEN} characters")]
    PhoneTooLong,
    #[error("Invalid email format")]
    InvalidEmail,
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

/// A submission that passed validation, with fields trimmed and an empty
/// phone collapsed to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn validate_submission(
    name: &str,
    email: &str,
    phone: Option<&str>,
    message: &str,
) -> Result<NewContact, ValidationError> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();
    let phone = phone.map(str::trim).filter(|p| !p.is_empty());

    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if message.is_empty() {
        return Err(ValidationError::MessageRequired);
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::EmailTooLong);
    }
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong);
    }
    if let Some(p) = phone {
        if p.chars().count() > MAX_PHONE_LEN {
            return Err(ValidationError::PhoneTooLong);
        }
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(NewContact {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_submission() {
        let contact = validate_submission("Jo", "jo@x.com", None, "Hi").expect("valid");
        assert_eq!(contact.name, "Jo");
        assert_eq!(contact.email, "jo@x.com");
        assert_eq!(contact.phone, None);
        assert_eq!(contact.message, "Hi");
    }

    #[test]
    fn trims_fields_and_drops_empty_phone() {
        let contact =
            validate_submission("  Jo ", " jo@x.com ", Some("  "), " Hi ").expect("valid");
        assert_eq!(contact.name, "Jo");
        assert_eq!(contact.email, "jo@x.com");
        assert_eq!(contact.phone, None);
        assert_eq!(contact.message, "Hi");
    }

    #[test]
    fn keeps_non_empty_phone() {
        let contact =
            validate_submission("Jo", "jo@x.com", Some(" +91 12345 "), "Hi").expect("valid");
        assert_eq!(contact.phone.as_deref(), Some("+91 12345"));
    }

    #[test]
    fn rejects_missing_required_fields() {
        assert_eq!(
            validate_submission("", "jo@x.com", None, "Hi"),
            Err(ValidationError::NameRequired)
        );
        assert_eq!(
            validate_submission("Jo", "   ", None, "Hi"),
            Err(ValidationError::EmailRequired)
        );
        assert_eq!(
            validate_submission("Jo", "jo@x.com", None, ""),
            Err(ValidationError::MessageRequired)
        );
    }

    #[test]
    fn presence_beats_length_and_shape() {
        // All three required fields empty: name wins.
        assert_eq!(
            validate_submission("", "", None, ""),
            Err(ValidationError::NameRequired)
        );
    }

    #[test]
    fn rejects_overlong_fields() {
        let long = "x".repeat(101);
        assert_eq!(
            validate_submission(&long, "jo@x.com", None, "Hi"),
            Err(ValidationError::NameTooLong)
        );

        let long_email = format!("{}@x.com", "a".repeat(256));
        assert_eq!(
            validate_submission("Jo", &long_email, None, "Hi"),
            Err(ValidationError::EmailTooLong)
        );

        let long_message = "m".repeat(2001);
        assert_eq!(
            validate_submission("Jo", "jo@x.com", None, &long_message),
            Err(ValidationError::MessageTooLong)
        );

        let long_phone = "9".repeat(21);
        assert_eq!(
            validate_submission("Jo", "jo@x.com", Some(&long_phone), "Hi"),
            Err(ValidationError::PhoneTooLong)
        );
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        let name = "n".repeat(100);
        let message = "m".repeat(2000);
        let phone = "7".repeat(20);
        assert!(validate_submission(&name, "jo@x.com", Some(&phone), &message).is_ok());
    }

    #[test]
    fn length_beats_email_shape() {
        // Overlong and malformed: the length rule fires first.
        let bad = "a".repeat(300);
        assert_eq!(
            validate_submission("Jo", &bad, None, "Hi"),
            Err(ValidationError::EmailTooLong)
        );
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["jo", "jo@", "@x.com", "jo@x", "jo x@y.com", "jo@x com", "jo@@x.com"] {
            assert_eq!(
                validate_submission("Jo", email, None, "Hi"),
                Err(ValidationError::InvalidEmail),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_plain_emails() {
        for email in ["jo@x.com", "a.b+c@sub.domain.co", "hello@kairostudio.in"] {
            assert!(
                validate_submission("Jo", email, None, "Hi").is_ok(),
                "expected {email:?} to be accepted"
            );
        }
    }
}
