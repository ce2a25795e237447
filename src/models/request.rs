//! Prediction request model

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PredictionError, PredictionResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub age: i64,
    pub salary: f64,
}

impl PredictionRequest {
    /// Parse a raw request body.
    ///
    /// The body must be a JSON object carrying non-null `age` and `salary`
    /// fields. Both fields are coerced leniently: numeric strings and booleans
    /// are accepted, a fractional `age` is truncated toward zero.
    pub fn from_body(body: &[u8]) -> PredictionResult<Self> {
        let value: Value = serde_json::from_slice(body)?;

        let object = value
            .as_object()
            .ok_or_else(|| PredictionError::Parse(format!(
                "Request body must be a JSON object, got {}",
                type_name(&value)
            )))?;

        Self::from_object(object)
    }

    pub fn from_object(object: &Map<String, Value>) -> PredictionResult<Self> {
        let (age, salary) = match (field(object, "age"), field(object, "salary")) {
            (Some(age), Some(salary)) => (age, salary),
            _ => return Err(PredictionError::MissingField),
        };

        Ok(Self {
            age: coerce_age(age)?,
            salary: coerce_salary(salary)?,
        })
    }
}

fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn coerce_age(value: &Value) -> PredictionResult<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            let f = n
                .as_f64()
                .ok_or_else(|| PredictionError::Coercion(format!("Age is not a valid number: {}", n)))?;
            float_to_age(f)
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| PredictionError::Coercion(format!("Age must be a whole number, got '{}'", s))),
        other => Err(PredictionError::Coercion(format!(
            "Age must be a number or a numeric string, got {}",
            type_name(other)
        ))),
    }
}

fn float_to_age(f: f64) -> PredictionResult<i64> {
    if !f.is_finite() {
        return Err(PredictionError::Coercion(format!("Cannot convert {} to an integer age", f)));
    }

    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(PredictionError::Coercion(format!("Age {} is too large", f)));
    }

    Ok(truncated as i64)
}

fn coerce_salary(value: &Value) -> PredictionResult<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| PredictionError::Coercion(format!("Salary is not a valid number: {}", n))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| PredictionError::Coercion(format!("Could not convert salary to a number: '{}'", s))),
        other => Err(PredictionError::Coercion(format!(
            "Salary must be a number or a numeric string, got {}",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn parse(body: &str) -> PredictionResult<PredictionRequest> {
        PredictionRequest::from_body(body.as_bytes())
    }

    #[test]
    fn test_plain_numbers() {
        let req = assert_ok!(parse(r#"{"age": 35, "salary": 60000}"#));
        assert_eq!(req, PredictionRequest { age: 35, salary: 60000.0 });
    }

    #[test]
    fn test_numeric_strings() {
        let req = assert_ok!(parse(r#"{"age": " 42 ", "salary": "75000.5"}"#));
        assert_eq!(req.age, 42);
        assert_eq!(req.salary, 75000.5);
    }

    #[test]
    fn test_fractional_age_truncates() {
        assert_eq!(assert_ok!(parse(r#"{"age": 29.9, "salary": 1}"#)).age, 29);
        assert_eq!(assert_ok!(parse(r#"{"age": -3.7, "salary": 1}"#)).age, -3);
    }

    #[test]
    fn test_booleans_coerce() {
        let req = assert_ok!(parse(r#"{"age": true, "salary": false}"#));
        assert_eq!(req, PredictionRequest { age: 1, salary: 0.0 });
    }

    #[test]
    fn test_missing_or_null_fields() {
        assert_eq!(parse(r#"{"salary": 50000}"#), Err(PredictionError::MissingField));
        assert_eq!(parse(r#"{"age": 30}"#), Err(PredictionError::MissingField));
        assert_eq!(parse(r#"{"age": null, "salary": 50000}"#), Err(PredictionError::MissingField));
        assert_eq!(parse(r#"{}"#), Err(PredictionError::MissingField));
    }

    #[test]
    fn test_field_names_are_lowercase() {
        assert_eq!(parse(r#"{"Age": 30, "Salary": 50000}"#), Err(PredictionError::MissingField));
    }

    #[test]
    fn test_non_numeric_values() {
        let err = assert_err!(parse(r#"{"age": 30, "salary": "abc"}"#));
        assert_eq!(err.kind(), "coercion");
        assert!(err.to_string().contains("abc"));

        let err = assert_err!(parse(r#"{"age": "25.5", "salary": 50000}"#));
        assert_eq!(err.kind(), "coercion");

        let err = assert_err!(parse(r#"{"age": [1], "salary": 50000}"#));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_huge_float_age_rejected() {
        let err = assert_err!(parse(r#"{"age": 1e300, "salary": 50000}"#));
        assert_eq!(err.kind(), "coercion");
    }

    #[test]
    fn test_malformed_json() {
        let err = assert_err!(parse(r#"{"age": 30,"#));
        assert_eq!(err.kind(), "parse");
        let err = assert_err!(parse(""));
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_non_object_document() {
        let err = assert_err!(parse("[30, 50000]"));
        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().contains("JSON object"));
    }
}
