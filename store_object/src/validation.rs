//! Validation module
//!
//! Collection names are checked before they reach the store.

use std::fmt;

/// Validation errors for collection names
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name is empty
    Empty,
    /// Name is too long for a namespace
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    /// Name contains `$` or a NUL byte
    InvalidCharacters(String),
    /// Name uses the server-reserved `system.` prefix
    ReservedPrefix(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => {
                write!(f, "Collection name cannot be empty")
            }
            ValidationError::TooLong {
                name,
                length,
                max_length,
            } => {
                write!(
                    f,
                    "Collection name '{}' is too long: {} bytes (max {})",
                    name, length, max_length
                )
            }
            ValidationError::InvalidCharacters(name) => {
                write!(
                    f,
                    "Invalid characters in collection name '{}': '$' and NUL are not allowed",
                    name
                )
            }
            ValidationError::ReservedPrefix(name) => {
                write!(
                    f,
                    "Collection name '{}' uses the reserved 'system.' prefix",
                    name
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated collection name that is safe to hand to the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedCollectionName(String);

impl ValidatedCollectionName {
    /// Namespace budget left after a typical database name
    pub const MAX_LENGTH: usize = 120;

    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Self::validate(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn validate(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(ValidationError::TooLong {
                name: name.to_string(),
                length: name.len(),
                max_length: Self::MAX_LENGTH,
            });
        }

        if name.contains('$') || name.contains('\0') {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }

        if name.starts_with("system.") {
            return Err(ValidationError::ReservedPrefix(name.to_string()));
        }

        Ok(())
    }
}

impl fmt::Display for ValidatedCollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedCollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["items", "user_profiles", "orders.archive", "Items2024"] {
            let validated = ValidatedCollectionName::new(name).expect("name should be valid");
            assert_eq!(validated.as_str(), name);
        }
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            ValidatedCollectionName::new(""),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn test_dollar_and_nul_rejected() {
        assert!(matches!(
            ValidatedCollectionName::new("items$tmp"),
            Err(ValidationError::InvalidCharacters(_))
        ));
        assert!(matches!(
            ValidatedCollectionName::new("ite\0ms"),
            Err(ValidationError::InvalidCharacters(_))
        ));
    }

    #[test]
    fn test_system_prefix_rejected() {
        assert!(matches!(
            ValidatedCollectionName::new("system.users"),
            Err(ValidationError::ReservedPrefix(_))
        ));
    }

    #[test]
    fn test_too_long() {
        let name = "a".repeat(ValidatedCollectionName::MAX_LENGTH + 1);
        match ValidatedCollectionName::new(&name) {
            Err(ValidationError::TooLong {
                length, max_length, ..
            }) => {
                assert_eq!(length, ValidatedCollectionName::MAX_LENGTH + 1);
                assert_eq!(max_length, ValidatedCollectionName::MAX_LENGTH);
            }
            other => panic!("expected TooLong, got {:?}", other),
        }
    }
}
