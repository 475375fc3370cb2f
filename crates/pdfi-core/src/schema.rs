//! Schema text validator.
//!
//! Turns the raw text a user typed into a model's schema box into a structured
//! [`Schema`], or reports a [`ParseFault`] describing the syntax problem. The
//! only constraint enforced here is "valid JSON": whether the document is a
//! sensible JSON Schema is left to the extraction pipeline.
//!
//! Pretty-printing uses two-space indentation and keeps the key order the user
//! wrote, so [`format`] can be applied to the text box repeatedly without
//! shuffling it.
//!
//! # Examples
//!
//! ```
//! use pdfi_core::schema;
//!
//! let parsed = schema::parse(r#"{"type":"object"}"#).unwrap();
//! assert_eq!(parsed.to_pretty_string(), "{\n  \"type\": \"object\"\n}");
//!
//! let fault = schema::parse(r#"{"type": }"#).unwrap_err();
//! assert_eq!(fault.line(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A parsed JSON-Schema document, stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    /// Wraps an already structured JSON value.
    #[inline]
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    #[inline]
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the schema, returning the underlying JSON value.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Serializes the schema with stable two-space indentation.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        // Serializing a `Value` cannot fail; fall back to the compact form anyway.
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for Schema {
    #[inline]
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Malformed schema text.
///
/// Detected locally and never sent to the registry. The message is the
/// parser's own description of the problem, including its position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid JSON: {message}")]
pub struct ParseFault {
    message: String,
    line: usize,
    column: usize,
}

impl ParseFault {
    /// The parser's description of the syntax problem.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-based line of the problem.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// One-based column of the problem (zero when the input ended early on an empty line).
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl From<serde_json::Error> for ParseFault {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Parses raw text into a [`Schema`].
///
/// Trailing non-whitespace after the document is a fault; there are no
/// partial results.
pub fn parse(text: &str) -> Result<Schema, ParseFault> {
    let value: Value = serde_json::from_str(text)?;
    Ok(Schema(value))
}

/// Serializes a schema with two-space indentation, keeping key order.
#[must_use]
pub fn pretty(schema: &Schema) -> String {
    schema.to_pretty_string()
}

/// Parses `text` and re-serializes it with stable indentation.
pub fn format(text: &str) -> Result<String, ParseFault> {
    parse(text).map(|schema| pretty(&schema))
}

/// The invoice starter schema offered by the "load template" action.
#[must_use]
pub fn default_template() -> Schema {
    Schema(json!({
        "type": "object",
        "properties": {
            "invoice_number": { "type": "string", "minLength": 1 },
            "total": { "type": "number", "minimum": 0 }
        },
        "required": ["invoice_number", "total"],
        "additionalProperties": false
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object() {
        let schema = parse(r#"{"type":"object"}"#).unwrap();
        assert_eq!(schema.as_value()["type"], "object");
    }

    #[test]
    fn test_parse_accepts_any_json_value() {
        assert!(parse("[]").is_ok());
        assert!(parse("42").is_ok());
        assert!(parse(" \"text\" \n").is_ok());
    }

    #[test]
    fn test_parse_fault_position() {
        let fault = parse("{\n  \"type\": \n}").unwrap_err();
        assert_eq!(fault.line(), 3);
        assert!(fault.to_string().starts_with("invalid JSON: "));
        assert!(fault.message().contains("line 3"));
    }

    #[test]
    fn test_parse_rejects_empty_and_trailing_text() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse(r#"{"type":"object"} extra"#).is_err());
    }

    #[test]
    fn test_round_trip_reparses_to_equal_value() {
        let samples = [
            r#"{"type":"object","properties":{"total":{"type":"number","minimum":0}}}"#,
            r#"{"b": 1, "a": [true, null, 1.5, "x"], "c": {"nested": {}}}"#,
            r#"  [ {"unicode": "Größe €"}, -0.25e3 ]  "#,
        ];

        for text in samples {
            let first = parse(text).unwrap();
            let second = parse(&pretty(&first)).unwrap();
            assert_eq!(first, second, "round trip changed {text}");
        }
    }

    #[test]
    fn test_format_keeps_key_order() {
        let formatted = format(r#"{"zeta":1,"alpha":2}"#).unwrap();
        assert_eq!(formatted, "{\n  \"zeta\": 1,\n  \"alpha\": 2\n}");
    }

    #[test]
    fn test_format_is_idempotent() {
        let once = format(r#"{"type":"object","required":["a"]}"#).unwrap();
        let twice = format(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_invalid() {
        let fault = format(r#"{"type": }"#).unwrap_err();
        assert_eq!(fault.line(), 1);
    }

    #[test]
    fn test_schema_display_is_compact() {
        let schema = parse("{ \"type\" : \"object\" }").unwrap();
        assert_eq!(schema.to_string(), r#"{"type":"object"}"#);
    }

    #[test]
    fn test_schema_serializes_transparently() {
        let schema = parse(r#"{"type":"object"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&schema).unwrap(),
            r#"{"type":"object"}"#
        );
    }

    #[test]
    fn test_default_template_pretty() {
        insta::assert_snapshot!(default_template().to_pretty_string(), @r#"
        {
          "type": "object",
          "properties": {
            "invoice_number": {
              "type": "string",
              "minLength": 1
            },
            "total": {
              "type": "number",
              "minimum": 0
            }
          },
          "required": [
            "invoice_number",
            "total"
          ],
          "additionalProperties": false
        }
        "#);
    }
}
