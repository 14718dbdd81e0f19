//! Per-field form validation errors.

use std::collections::BTreeMap;
use std::fmt;

/// Validation messages keyed by form field name (e.g. `"email"`).
///
/// Only the first failure per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    /// Record "required" when `value` is blank. Returns `true` if it was blank.
    pub fn require(&mut self, field: &'static str, value: &str, message: &'static str) -> bool {
        let blank = value.trim().is_empty();
        if blank {
            self.add(field, message);
        }
        blank
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// `Ok(value)` when no errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Email is required");
        errors.add("email", "Email is invalid");
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_require_blank() {
        let mut errors = FieldErrors::new();
        assert!(errors.require("city", "   ", "City is required"));
        assert!(!errors.require("zip", "12345", "ZIP code is required"));
        assert_eq!(errors.get("city"), Some("City is required"));
        assert_eq!(errors.get("zip"), None);
    }

    #[test]
    fn test_display_is_sorted_by_field() {
        let mut errors = FieldErrors::new();
        errors.add("zip", "ZIP code is required");
        errors.add("city", "City is required");
        assert_eq!(
            errors.to_string(),
            "city: City is required; zip: ZIP code is required"
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FieldErrors::new().into_result(5), Ok(5));
        let mut errors = FieldErrors::new();
        errors.add("cvv", "CVV is invalid");
        assert!(errors.into_result(5).is_err());
    }
}
