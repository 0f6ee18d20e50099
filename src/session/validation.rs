//! Credential Field Validation

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::{DomainError, DomainResult};

const PASSWORD_MIN_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

pub fn validate_email(email: &str) -> DomainResult<()> {
    if email_pattern().is_match(email) {
        Ok(())
    } else {
        Err(DomainError::InvalidInput("invalid email address".to_string()))
    }
}

/// At least 6 characters with at least one letter and one digit
pub fn validate_password(password: &str) -> DomainResult<()> {
    let long_enough = password.chars().count() >= PASSWORD_MIN_LEN;
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(
            "password must be at least 6 characters with a letter and a digit".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("u@e.co").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("spa ce@x.com").is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("abc123").is_ok());
        assert!(validate_password("longerpass1").is_ok());
        assert!(validate_password("short1").is_ok());
        assert!(validate_password("ab12").is_err());
        assert!(validate_password("lettersonly").is_err());
        assert!(validate_password("123456").is_err());
    }
}
