//! Request/response types and validation for signup and login.

use crate::api::error::FieldError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response envelope carrying a freshly signed token.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TokenData {
    pub data: String,
}

/// Normalize an email for lookup/uniqueness checks.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
pub(super) fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

impl SignupRequest {
    #[must_use]
    pub(super) fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

impl LoginRequest {
    #[must_use]
    pub(super) fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

pub(super) fn validate_signup(request: &SignupRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.display_name.is_empty() {
        errors.push(FieldError::required("displayName"));
    } else if request.display_name.chars().count() < 8 {
        errors.push(FieldError::too_short("displayName", 8));
    }

    if request.email.is_empty() {
        errors.push(FieldError::required("email"));
    } else if !valid_email(&request.email) {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }

    if request.password.is_empty() {
        errors.push(FieldError::required("password"));
    } else if request.password.chars().count() < 6 {
        errors.push(FieldError::too_short("password", 6));
    }

    errors
}

pub(super) fn validate_login(request: &LoginRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.email.is_empty() {
        errors.push(FieldError::required("email"));
    } else if !valid_email(&request.email) {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }

    if request.password.is_empty() {
        errors.push(FieldError::required("password"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(display_name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            display_name: display_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_email() {
        for email in ["a@b.co", "user+tag@example.com", "first.last@sub.domain.dev"] {
            assert!(valid_email(email), "expected {email} to be valid");
        }

        for email in ["", "no-at", "a@b", "a@b.", "two@@b.co", "with space@b.co", "a@"] {
            assert!(!valid_email(email), "expected {email} to be invalid");
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM  "), "user@example.com");
        assert_eq!(normalize_email("a@b.co"), "a@b.co");
    }

    #[test]
    fn test_validate_signup_reports_all_missing_fields() {
        let errors = validate_signup(&signup("", "", ""));

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["displayName", "email", "password"]);
        assert!(errors.iter().all(|e| e.message == "required"));
    }

    #[test]
    fn test_validate_signup_length_rules() {
        let errors = validate_signup(&signup("short", "a@b.co", "12345"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "displayName");
        assert_eq!(errors[0].message, "must be at least 8 characters");
        assert_eq!(errors[1].field, "password");
        assert_eq!(errors[1].message, "must be at least 6 characters");
    }

    #[test]
    fn test_validate_signup_boundary_lengths_pass() {
        // exactly 8 and exactly 6 characters
        let errors = validate_signup(&signup("exactly8", "a@b.co", "123456"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_signup_rejects_bad_email() {
        let errors = validate_signup(&signup("long enough name", "not-an-email", "123456"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_validate_login() {
        let valid = LoginRequest {
            email: "a@b.co".to_string(),
            password: "123456".to_string(),
        };
        assert!(validate_login(&valid).is_empty());

        let missing = LoginRequest {
            email: String::new(),
            password: String::new(),
        };
        let errors = validate_login(&missing);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn test_normalized_lowercases_email_only() {
        let request = signup("My Display Name", "  USER@Example.com ", "Secret1").normalized();

        assert_eq!(request.email, "user@example.com");
        assert_eq!(request.display_name, "My Display Name");
        assert_eq!(request.password, "Secret1");
    }
}
