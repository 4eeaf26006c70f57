//! # Validation
//!
//! Building blocks for the schema validator and the default resolver.
//!
//! Validators collect every violation into a [`ValidationErrors`] instead of stopping at the
//! first one, so a caller sees the whole list of problems with a desired state at once.

use std::fmt;

/// A single violated constraint, addressed by attribute path (e.g. `params.reasoning_effort`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All violations found in one desired state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a list holding exactly one error.
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(path, message);
        errors
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns `true` if any error is reported against `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path == path)
    }

    /// `Ok(())` when nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Records an error when a required string is absent or blank.
pub fn require_non_empty(errors: &mut ValidationErrors, path: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.push(path, "is required");
    }
}

/// Records an error when an optional string is set to something outside `allowed`.
pub fn one_of(errors: &mut ValidationErrors, path: &str, value: Option<&str>, allowed: &[&str]) {
    if let Some(value) = value {
        if !allowed.contains(&value) {
            errors.push(
                path,
                format!("{value:?} is not allowed, must be one of: {}", allowed.join(", ")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_rejects_blank() {
        let mut errors = ValidationErrors::new();
        require_non_empty(&mut errors, "name", None);
        require_non_empty(&mut errors, "base_model_id", Some("  "));
        require_non_empty(&mut errors, "id", Some("m-1"));

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("name"));
        assert!(errors.contains("base_model_id"));
        assert!(!errors.contains("id"));
    }

    #[test]
    fn test_one_of_allows_unset() {
        let mut errors = ValidationErrors::new();
        one_of(&mut errors, "effort", None, &["low", "high"]);
        one_of(&mut errors, "effort", Some("low"), &["low", "high"]);
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_one_of_names_allowed_values() {
        let mut errors = ValidationErrors::new();
        one_of(&mut errors, "effort", Some("extreme"), &["low", "high"]);

        let message = errors.to_string();
        assert!(message.starts_with("effort: "));
        assert!(message.contains("\"extreme\""));
        assert!(message.contains("low, high"));
    }

    #[test]
    fn test_display_joins_errors() {
        let mut errors = ValidationErrors::single("a", "is required");
        errors.push("b", "is required");
        assert_eq!(errors.to_string(), "a: is required; b: is required");
    }
}
