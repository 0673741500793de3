//! Input-record completeness check.

use serde::Serialize;
use serde_json::Value;

/// True unless any field of the record serializes to the empty string.
///
/// Presence check only: `null` and whitespace-only values pass. This is a
/// deliberate validation boundary — semantic checks (email shape, password
/// strength) belong to the backend.
pub fn record_is_complete<T: Serialize>(input: &T) -> bool {
    match serde_json::to_value(input) {
        Ok(Value::Object(map)) => !map.values().any(|v| v.as_str() == Some("")),
        Ok(_) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_api::{LoginInput, RegisterInput};

    #[test]
    fn complete_record_passes() {
        let input = LoginInput {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        };
        assert!(record_is_complete(&input));
    }

    #[test]
    fn any_empty_field_rejects() {
        let input = LoginInput {
            email: String::new(),
            password: "x".to_string(),
        };
        assert!(!record_is_complete(&input));

        let input = RegisterInput {
            name: "n".to_string(),
            email: "a@b.com".to_string(),
            password: String::new(),
        };
        assert!(!record_is_complete(&input));
    }

    #[test]
    fn whitespace_only_passes() {
        let input = LoginInput {
            email: " ".to_string(),
            password: "x".to_string(),
        };
        assert!(record_is_complete(&input));
    }
}
