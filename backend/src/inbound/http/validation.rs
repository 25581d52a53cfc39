//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive as loosely typed JSON. Text fields are coerced to
//! strings (absent or `null` become empty) and `age` accepts either a JSON
//! number or a string holding an integer. Domain constructors then apply the
//! real validation rules.

use serde_json::{Value, json};

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidType,
    InvalidInteger,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidType => "invalid_type",
            ErrorCode::InvalidInteger => "invalid_integer",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_type_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a string"))
        .with_code(ErrorCode::InvalidType)
}

pub(crate) fn invalid_integer_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an integer"))
        .with_code(ErrorCode::InvalidInteger)
}

/// Coerce a JSON value into text.
///
/// Missing and `null` values become the empty string so the domain reports
/// them as blank; scalars are rendered as text. Arrays and objects are
/// rejected.
pub(crate) fn coerce_text(value: Option<&Value>, field: FieldName) -> Result<String, Error> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => Err(invalid_type_error(field)),
    }
}

/// Parse an age supplied as a JSON number or numeric string.
///
/// Integral floats such as `29.0` are accepted; fractions are not.
pub(crate) fn parse_age(value: Option<&Value>, field: FieldName) -> Result<i64, Error> {
    match value {
        None | Some(Value::Null) => Err(missing_field_error(field)),
        Some(Value::Number(number)) => {
            number_to_integer(number).ok_or_else(|| invalid_integer_error(field))
        }
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(missing_field_error(field));
            }
            if let Ok(parsed) = trimmed.parse::<i64>() {
                return Ok(parsed);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(float_to_integer)
                .ok_or_else(|| invalid_integer_error(field))
        }
        Some(_) => Err(invalid_integer_error(field)),
    }
}

fn number_to_integer(number: &serde_json::Number) -> Option<i64> {
    number
        .as_i64()
        .or_else(|| number.as_f64().and_then(float_to_integer))
}

fn float_to_integer(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= LIMIT {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const AGE: FieldName = FieldName::new("age");
    const NAME: FieldName = FieldName::new("firstName");

    #[rstest]
    #[case(None, "")]
    #[case(Some(Value::Null), "")]
    #[case(Some(json!("  Ana ")), "  Ana ")]
    #[case(Some(json!(482913)), "482913")]
    #[case(Some(json!(true)), "true")]
    fn coerce_text_renders_scalars(#[case] value: Option<Value>, #[case] expected: &str) {
        let text = coerce_text(value.as_ref(), NAME).expect("scalar coerces");
        assert_eq!(text, expected);
    }

    #[rstest]
    #[case(json!(["Ana"]))]
    #[case(json!({ "first": "Ana" }))]
    fn coerce_text_rejects_structures(#[case] value: Value) {
        let err = coerce_text(Some(&value), NAME).expect_err("structures rejected");
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "firstName");
        assert_eq!(details["code"], "invalid_type");
    }

    #[rstest]
    #[case(json!(29), 29)]
    #[case(json!(29.0), 29)]
    #[case(json!("29"), 29)]
    #[case(json!(" 30 "), 30)]
    #[case(json!("31.0"), 31)]
    #[case(json!(-4), -4)]
    fn parse_age_accepts_integers(#[case] value: Value, #[case] expected: i64) {
        assert_eq!(parse_age(Some(&value), AGE).expect("integer age"), expected);
    }

    #[rstest]
    #[case(json!(29.5))]
    #[case(json!("twenty"))]
    #[case(json!("NaN"))]
    #[case(json!(true))]
    #[case(json!([29]))]
    fn parse_age_rejects_non_integers(#[case] value: Value) {
        let err = parse_age(Some(&value), AGE).expect_err("non-integer rejected");
        assert_eq!(err.message(), "age must be an integer");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "invalid_integer");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Value::Null))]
    #[case(Some(json!("   ")))]
    fn parse_age_reports_missing_values(#[case] value: Option<Value>) {
        let err = parse_age(value.as_ref(), AGE).expect_err("missing age rejected");
        assert_eq!(err.message(), "missing required field: age");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "missing_field");
    }
}
