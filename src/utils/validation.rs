//! Request validation helpers for DTOs deriving [`validator::Validate`].
//!
//! [`http_url`] is the custom URL rule. [`FieldError`] collapses the
//! `ValidationErrors` map into the first violation, which is the only one
//! reported to the client.

use thiserror::Error;
use url::Url;
use validator::{ValidationError, ValidationErrors};

/// Error codes, in reporting priority.
pub const CODE_REQUIRED: &str = "required";
pub const CODE_HTTP_URL: &str = "http_url";
pub const CODE_LENGTH: &str = "length";

const PRIORITY: [&str; 3] = [CODE_REQUIRED, CODE_HTTP_URL, CODE_LENGTH];

/// First violated rule, keyed by the field's wire name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("'{field}' is required")]
    Required { field: String },

    #[error("'{field}' must be a valid HTTP(S) URL")]
    InvalidUrl { field: String },

    #[error("'{field}' must be at most {max} characters long")]
    TooLong { field: String, max: u64 },

    #[error("'{field}' is invalid")]
    Invalid { field: String },
}

impl FieldError {
    fn from_violation(field: &str, err: &ValidationError) -> Self {
        let field = field.to_string();
        match err.code.as_ref() {
            CODE_REQUIRED => Self::Required { field },
            CODE_HTTP_URL => Self::InvalidUrl { field },
            CODE_LENGTH => match err.params.get("max").and_then(serde_json::Value::as_u64) {
                Some(max) => Self::TooLong { field, max },
                None => Self::Invalid { field },
            },
            _ => Self::Invalid { field },
        }
    }
}

/// Picks one violation: fields in name order, then codes by [`PRIORITY`].
impl From<ValidationErrors> for FieldError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, violations) in &fields {
            let ranked = PRIORITY
                .iter()
                .find_map(|code| violations.iter().find(|v| v.code == *code))
                .or_else(|| violations.first());

            if let Some(violation) = ranked {
                return Self::from_violation(field, violation);
            }
        }

        Self::Invalid {
            field: "body".to_string(),
        }
    }
}

/// Custom `validator` rule: an absolute `http`/`https` URL with a host.
///
/// The value must already be in its final form: leading or trailing
/// whitespace and control characters are rejected rather than trimmed, since
/// the value is stored and later sent back verbatim in `Location`. An empty
/// value counts as missing.
pub fn http_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(CODE_REQUIRED));
    }

    if value.trim() != value || value.chars().any(char::is_control) || !parses_as_http(value) {
        return Err(ValidationError::new(CODE_HTTP_URL));
    }

    Ok(())
}

fn parses_as_http(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(required, custom(function = "http_url"), length(max = 30))]
        link: Option<String>,

        #[validate(length(max = 5))]
        note: Option<String>,
    }

    fn check(link: Option<&str>, note: Option<&str>) -> Result<(), FieldError> {
        Sample {
            link: link.map(str::to_string),
            note: note.map(str::to_string),
        }
        .validate()
        .map_err(FieldError::from)
    }

    #[test]
    fn test_valid_value_passes() {
        assert!(check(Some("https://example.com/a"), None).is_ok());
        assert!(check(Some("http://example.com"), Some("hey")).is_ok());
    }

    #[test]
    fn test_missing_and_empty_are_required() {
        let err = check(None, None).unwrap_err();
        assert_eq!(err.to_string(), "'link' is required");

        let err = check(Some(""), None).unwrap_err();
        assert_eq!(
            err,
            FieldError::Required {
                field: "link".to_string()
            }
        );
    }

    #[test]
    fn test_http_url_rule() {
        for bad in [
            "invalid-url",
            "ftp://example.com",
            "mailto:someone@example.com",
            "/relative/path",
            "http://",
        ] {
            let err = check(Some(bad), None).unwrap_err();
            assert_eq!(
                err.to_string(),
                "'link' must be a valid HTTP(S) URL",
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn test_http_url_rejects_whitespace_and_controls() {
        for bad in [
            " https://example.com",
            "https://example.com ",
            "https://example.com/a\nb",
            "https://example.com/a\tb",
            "https://example.com/\u{1}x",
            "   ",
        ] {
            assert_eq!(
                http_url(bad),
                Err(ValidationError::new(CODE_HTTP_URL)),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn test_max_length_counts_characters() {
        let err = check(Some("https://example.com/aaaaaaaaaaaa"), None).unwrap_err();
        assert_eq!(
            err,
            FieldError::TooLong {
                field: "link".to_string(),
                max: 30
            }
        );

        // 5 characters, 10 bytes
        assert!(check(Some("https://example.com"), Some("ééééé")).is_ok());
    }

    #[test]
    fn test_url_rule_outranks_length() {
        let long_invalid = "x".repeat(100);
        let err = check(Some(&long_invalid), None).unwrap_err();
        assert!(matches!(err, FieldError::InvalidUrl { .. }));
    }

    #[test]
    fn test_fields_reported_in_name_order() {
        let err = check(None, Some("too long")).unwrap_err();
        assert!(matches!(err, FieldError::Required { ref field } if field == "link"));

        let err = check(Some("https://example.com"), Some("too long")).unwrap_err();
        assert_eq!(err.to_string(), "'note' must be at most 5 characters long");
    }
}
