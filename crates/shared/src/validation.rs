//! Common validation utilities.

use validator::ValidationError;

/// Validates that a string carries at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a caller-assigned document key.
///
/// Any non-blank string is a key. Keys containing `/` are addressed with a
/// percent-encoded path segment.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    validate_not_blank(key).map_err(|_| {
        let mut err = ValidationError::new("key_blank");
        err.message = Some("Identifier must not be blank".into());
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("online").is_ok());
        assert!(validate_not_blank(" x ").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("D1").is_ok());
        assert!(validate_key("AP-EDU-001").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("   ").is_err());
        assert!(validate_key("AP/EDU/1").is_ok());
        assert!(validate_key(&"x".repeat(500)).is_ok());
    }

    #[test]
    fn test_validate_key_error_message() {
        let err = validate_key("  ").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Identifier must not be blank"
        );
    }
}
