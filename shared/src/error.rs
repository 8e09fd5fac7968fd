//! Backend error payload model
//!
//! The backend answers failed requests with one of two JSON shapes: a
//! field-keyed validation mapping (`{"email": ["This field is required."]}`)
//! or a single top-level message (`{"error": "..."}`, `{"detail": "..."}`).
//! Anything else is kept verbatim so callers can still fall back to a
//! generic message.

use std::collections::BTreeMap;

use serde_json::Value;

/// Validation errors keyed by field name, in field order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Parsed body of a non-success response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// Field-keyed validation mapping.
    Fields(FieldErrors),
    /// Single top-level error message.
    Message(String),
    /// Unrecognized shape, kept as raw text.
    Raw(String),
}

impl ErrorBody {
    /// Classifies a raw response body.
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes).into_owned();
        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(bytes) else {
            return ErrorBody::Raw(text);
        };

        // Single-key envelopes carrying one human-readable message.
        if map.len() == 1 {
            for key in ["error", "detail", "message"] {
                if let Some(Value::String(msg)) = map.get(key) {
                    return ErrorBody::Message(msg.clone());
                }
            }
        }

        if map.is_empty() {
            return ErrorBody::Raw(text);
        }

        let mut fields = FieldErrors::new();
        for (field, value) in map {
            let messages = match value {
                Value::String(s) => vec![s],
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
                other => vec![other.to_string()],
            };
            fields.insert(field, messages);
        }
        ErrorBody::Fields(fields)
    }

    /// The top-level message, when the body carried one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorBody::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// The field-keyed mapping, when the body carried one.
    pub fn fields(&self) -> Option<&FieldErrors> {
        match self {
            ErrorBody::Fields(fields) => Some(fields),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorBody {
    /// Renders field errors one `field: message` line per field.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorBody::Fields(fields) => {
                let mut first = true;
                for (field, messages) in fields {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    write!(f, "{}: {}", field, messages.join(", "))?;
                }
                Ok(())
            }
            ErrorBody::Message(msg) => f.write_str(msg),
            ErrorBody::Raw(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_keyed_validation_errors() {
        let body = br#"{"email": ["This field is required."], "password": ["Ensure this field has at least 6 characters."]}"#;
        let parsed = ErrorBody::parse(body);
        let fields = parsed.fields().unwrap();
        assert_eq!(fields["email"], vec!["This field is required."]);
        let rendered = parsed.to_string();
        assert!(rendered.contains("email: This field is required."));
        assert!(rendered.contains("password: Ensure this field has at least 6 characters."));
    }

    #[test]
    fn parses_top_level_error_string() {
        let parsed = ErrorBody::parse(br#"{"error": "Only admin can view employees"}"#);
        assert_eq!(parsed.message(), Some("Only admin can view employees"));
    }

    #[test]
    fn parses_detail_envelope() {
        let parsed = ErrorBody::parse(br#"{"detail": "CSRF Failed"}"#);
        assert_eq!(parsed, ErrorBody::Message("CSRF Failed".into()));
    }

    #[test]
    fn scalar_field_values_are_accepted() {
        let parsed = ErrorBody::parse(br#"{"username": "Username already exists", "email": ["Email already exists"]}"#);
        let fields = parsed.fields().unwrap();
        assert_eq!(fields["username"], vec!["Username already exists"]);
        assert_eq!(fields["email"], vec!["Email already exists"]);
    }

    #[test]
    fn unrecognized_shape_falls_back_to_raw() {
        let parsed = ErrorBody::parse(b"<html>bad gateway</html>");
        assert_eq!(parsed, ErrorBody::Raw("<html>bad gateway</html>".into()));
    }
}
