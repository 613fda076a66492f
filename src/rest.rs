//! REST error formatting.
//!
//! Maps validation-error structures to the flat wire shape REST consumers
//! expect alongside a 422 response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status code conventionally sent with validation errors.
pub const UNPROCESSABLE_ENTITY: u16 = 422;

/// A single validation failure on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Map first-error pairs to the wire shape, one entry per field.
///
/// ```
/// use sidekick::rest::{first_errors, FieldError};
///
/// let errors = first_errors([("firstname", "First name cannot be blank.")]);
/// assert_eq!(errors, vec![FieldError::new("firstname", "First name cannot be blank.")]);
/// ```
pub fn first_errors<'a, I>(errors: I) -> Vec<FieldError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    errors
        .into_iter()
        .map(|(field, message)| FieldError::new(field, message))
        .collect()
}

/// Map a `field => message` or `field => [messages]` object to the wire
/// shape, one entry per message.
///
/// Non-string scalars are stringified; nulls are skipped.
pub fn array_errors(errors: &serde_json::Map<String, Value>) -> Vec<FieldError> {
    let mut result = Vec::new();

    for (field, value) in errors {
        match value {
            Value::Array(messages) => {
                for message in messages {
                    if let Some(text) = as_message(message) {
                        result.push(FieldError::new(field, text));
                    }
                }
            }
            other => {
                if let Some(text) = as_message(other) {
                    result.push(FieldError::new(field, text));
                }
            }
        }
    }

    result
}

fn as_message(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn first_errors_one_entry_per_field() {
        let errors = first_errors([
            ("firstname", "First name cannot be blank."),
            ("email", "Email cannot be blank."),
        ]);

        assert_eq!(
            errors,
            vec![
                FieldError::new("firstname", "First name cannot be blank."),
                FieldError::new("email", "Email cannot be blank."),
            ]
        );
    }

    #[test]
    fn array_errors_scalar_message() {
        let errors = array_errors(&map(json!({"foo": "error!"})));
        assert_eq!(errors, vec![FieldError::new("foo", "error!")]);
    }

    #[test]
    fn array_errors_message_list() {
        let errors = array_errors(&map(json!({"foo": ["first", "second"]})));
        assert_eq!(
            errors,
            vec![
                FieldError::new("foo", "first"),
                FieldError::new("foo", "second"),
            ]
        );
    }

    #[test]
    fn array_errors_skips_null() {
        let errors = array_errors(&map(json!({"foo": null, "bar": "set"})));
        assert_eq!(errors, vec![FieldError::new("bar", "set")]);
    }

    #[test]
    fn field_error_serializes_flat() {
        let json = serde_json::to_value(FieldError::new("foo", "error!")).unwrap();
        assert_eq!(json, json!({"field": "foo", "message": "error!"}));
    }
}
