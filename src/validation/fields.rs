//! Lenient field extraction from untyped JSON.
//!
//! Lets validation run over any input shape: a field of the wrong JSON type
//! becomes a `WrongType` error and an empty value, so the typed checks can
//! still run and report everything in one pass.

use serde_json::{Map, Value};

use crate::error::{ValidationErrors, ValidationReason};

/// Field names as they appear in report documents.
pub mod names {
    pub const USER_ID: &str = "userId";
    pub const TIMESTAMP: &str = "timestamp";
    pub const LOCATION: &str = "location";
    pub const AI_SUMMARY: &str = "aiSummary";
    pub const APPROX_DIMENSIONS: &str = "approxDimensions";
    pub const SURFACE_AREA: &str = "surfaceArea";
    pub const APPROX_VOLUME: &str = "approxVolume";
    pub const SCORE: &str = "score";
    pub const IS_POTHOLE: &str = "isPothole";
    pub const PHOTO_URL: &str = "photoUrl";
    pub const PHOTO_HASH: &str = "photoHash";
    pub const MODEL_VERSION: &str = "modelVersion";
    pub const REPORT: &str = "report";

    pub const ISSUE_TYPE: &str = "issueType";
    pub const DESCRIPTION: &str = "description";
    pub const USER_EMAIL: &str = "userEmail";
    pub const PAGE: &str = "page";
    pub const ISSUE: &str = "issue";
}

/// JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a string field. Missing or null yields an empty string.
pub fn string_field(obj: &Map<String, Value>, name: &'static str, errors: &mut ValidationErrors) -> String {
    match obj.get(name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            errors.push(
                name,
                ValidationReason::WrongType {
                    expected: "string",
                    found: json_type_name(other),
                },
            );
            String::new()
        }
    }
}

/// Read an optional string field. Missing, null or blank yields `None`.
pub fn optional_string_field(
    obj: &Map<String, Value>,
    name: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    Some(string_field(obj, name, errors)).filter(|s| !s.trim().is_empty())
}

/// Read a numeric field. Missing or null yields `None`.
pub fn number_field(obj: &Map<String, Value>, name: &'static str, errors: &mut ValidationErrors) -> Option<f64> {
    match obj.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(other) => {
            errors.push(
                name,
                ValidationReason::WrongType {
                    expected: "number",
                    found: json_type_name(other),
                },
            );
            None
        }
    }
}

/// Read a boolean field. Missing or null yields `false`.
pub fn bool_field(obj: &Map<String, Value>, name: &'static str, errors: &mut ValidationErrors) -> bool {
    match obj.get(name) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            errors.push(
                name,
                ValidationReason::WrongType {
                    expected: "boolean",
                    found: json_type_name(other),
                },
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_string_field() {
        let mut errors = ValidationErrors::new();
        let data = obj(json!({"userId": "u1", "location": 5, "aiSummary": null}));

        assert_eq!(string_field(&data, names::USER_ID, &mut errors), "u1");
        assert_eq!(string_field(&data, names::AI_SUMMARY, &mut errors), "");
        assert_eq!(string_field(&data, names::PHOTO_URL, &mut errors), "");
        assert!(errors.is_empty());

        assert_eq!(string_field(&data, names::LOCATION, &mut errors), "");
        assert_eq!(
            errors.errors()[0].reason,
            ValidationReason::WrongType { expected: "string", found: "number" }
        );
    }

    #[test]
    fn test_optional_string_field() {
        let mut errors = ValidationErrors::new();
        let data = obj(json!({"page": "/perfil", "userEmail": "  ", "userId": false}));

        assert_eq!(optional_string_field(&data, names::PAGE, &mut errors).as_deref(), Some("/perfil"));
        assert_eq!(optional_string_field(&data, names::USER_EMAIL, &mut errors), None);
        assert!(errors.is_empty());

        assert_eq!(optional_string_field(&data, names::USER_ID, &mut errors), None);
        assert!(errors.has_field(names::USER_ID));
    }

    #[test]
    fn test_number_field() {
        let mut errors = ValidationErrors::new();
        let data = obj(json!({"score": 42, "surfaceArea": 0.5, "approxVolume": "0.1"}));

        assert_eq!(number_field(&data, names::SCORE, &mut errors), Some(42.0));
        assert_eq!(number_field(&data, names::SURFACE_AREA, &mut errors), Some(0.5));
        assert_eq!(number_field(&data, names::APPROX_VOLUME, &mut errors), None);
        assert!(errors.has_field(names::APPROX_VOLUME));
    }

    #[test]
    fn test_bool_field() {
        let mut errors = ValidationErrors::new();
        let data = obj(json!({"isPothole": true}));
        assert!(bool_field(&data, names::IS_POTHOLE, &mut errors));

        let data = obj(json!({"isPothole": "yes"}));
        assert!(!bool_field(&data, names::IS_POTHOLE, &mut errors));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&Value::Null), "null");
    }
}
