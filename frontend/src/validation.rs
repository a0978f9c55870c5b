use thiserror::Error;

use crate::money::Money;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0} must be a positive amount")]
    InvalidAmount(&'static str),

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("{0} must be an http(s) link")]
    InvalidUrl(&'static str),
}

/// Collects every blank required field so the user sees them all at once.
#[derive(Debug, Default)]
pub struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, label: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.missing.push(label);
        }
        self
    }

    pub fn present<T>(mut self, label: &'static str, value: Option<T>) -> Self {
        if value.is_none() {
            self.missing.push(label);
        }
        self
    }

    pub fn check(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(self.missing))
        }
    }
}

pub fn positive_amount(label: &'static str, input: &str) -> Result<Money, ValidationError> {
    match Money::parse(input) {
        Some(amount) if amount.is_positive() => Ok(amount),
        _ => Err(ValidationError::InvalidAmount(label)),
    }
}

pub fn email(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    match trimmed.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace) =>
        {
            Ok(trimmed.to_lowercase())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}

pub fn password(input: &str) -> Result<(), ValidationError> {
    if input.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::PasswordTooShort)
    } else {
        Ok(())
    }
}

pub fn url(label: &'static str, input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(ValidationError::InvalidUrl(label)),
    }
}

/// Empty text inputs become `None`.
pub fn optional(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_missing_field() {
        let err = Required::new()
            .field("Name", " ")
            .field("Email", "a@b.co")
            .present::<u8>("Plan", None)
            .check()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["Name", "Plan"]));
        assert_eq!(err.to_string(), "Please fill in: Name, Plan");
        assert!(Required::new().field("Name", "Ana").check().is_ok());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert_eq!(positive_amount("Price", "10,50"), Ok(Money::from_cents(1_050)));
        assert_eq!(
            positive_amount("Price", "0"),
            Err(ValidationError::InvalidAmount("Price"))
        );
        assert!(positive_amount("Price", "-3").is_err());
        assert!(positive_amount("Price", "ten").is_err());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(email(" Ana@Store.com "), Ok("ana@store.com".to_string()));
        assert!(email("ana").is_err());
        assert!(email("@store.com").is_err());
        assert!(email("ana@store").is_err());
        assert!(email("a na@store.com").is_err());
    }

    #[test]
    fn passwords_need_eight_characters() {
        assert_eq!(password("1234567"), Err(ValidationError::PasswordTooShort));
        assert!(password("12345678").is_ok());
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn links_need_a_scheme() {
        assert!(url("Link", "https://shop.example/item").is_ok());
        assert!(url("Link", "http://x").is_ok());
        assert!(url("Link", "shop.example").is_err());
        assert!(url("Link", "https://").is_err());
    }

    #[test]
    fn blank_optionals_are_none() {
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" 11 9999 "), Some("11 9999".to_string()));
    }
}
