//! Client-side validation for the sign-in and sign-up forms.
//!
//! Validation checks every field and reports at most one message per field,
//! keyed by field name, so the UI can show each message next to its input.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::api::{Credentials, NewUser};

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// An address only passes when the pattern compiled.
fn is_valid_email(email: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| match Regex::new(EMAIL_PATTERN) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(error = %e, "Invalid e-mail pattern, rejecting all addresses");
            None
        }
    });
    regex.as_ref().is_some_and(|r| r.is_match(email))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Field-level validation failures: field name → user-facing message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the field already has one.
    fn add(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if is_blank(&self.name) {
            errors.add("name", "Nome é obrigatório");
        }

        if is_blank(&self.email) {
            errors.add("email", "E-mail obrigatório");
        } else if !is_valid_email(self.email.trim()) {
            errors.add("email", "Digite um e-mail válido!");
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add("password", "No mínimo 6 dígitos");
        }

        errors.into_result()
    }

    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if is_blank(&self.email) {
            errors.add("email", "E-mail obrigatório");
        } else if !is_valid_email(self.email.trim()) {
            errors.add("email", "Digite um e-mail válido");
        }

        if self.password.is_empty() {
            errors.add("password", "Senha obrigatória");
        }

        errors.into_result()
    }

    pub fn to_credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(name: &str, email: &str, password: &str) -> SignUpForm {
        SignUpForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(Regex::new(EMAIL_PATTERN).is_ok());
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana @example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_valid_sign_up() {
        assert!(sign_up("Ana", "ana@example.com", "123456").validate().is_ok());
    }

    #[test]
    fn test_empty_sign_up_reports_every_field() {
        let errors = sign_up("", "", "").validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Nome é obrigatório"));
        assert_eq!(errors.get("email"), Some("E-mail obrigatório"));
        assert_eq!(errors.get("password"), Some("No mínimo 6 dígitos"));
    }

    #[test]
    fn test_invalid_email_and_short_password() {
        let errors = sign_up("Ana", "ana.example.com", "12345").validate().unwrap_err();

        assert_eq!(errors.get("name"), None);
        assert_eq!(errors.get("email"), Some("Digite um e-mail válido!"));
        assert_eq!(errors.get("password"), Some("No mínimo 6 dígitos"));
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(sign_up("Ana", "ana@example.com", "ççççç").validate().is_err());
        assert!(sign_up("Ana", "ana@example.com", "çççççç").validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_missing() {
        let errors = sign_up("   ", "ana@example.com", "123456").validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Nome é obrigatório"));
    }

    #[test]
    fn test_to_new_user_trims() {
        let user = sign_up(" Ana ", " ana@example.com ", " pass word ").to_new_user();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.password, " pass word ");
    }

    #[test]
    fn test_sign_in_validation() {
        let form = SignInForm {
            email: "ana@example".into(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Digite um e-mail válido"));
        assert_eq!(errors.get("password"), Some("Senha obrigatória"));

        let form = SignInForm {
            email: "ana@example.com".into(),
            password: "x".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_display_lists_fields() {
        let errors = sign_up("", "ana@example.com", "123456").validate().unwrap_err();
        assert_eq!(errors.to_string(), "name: Nome é obrigatório");
    }
}
