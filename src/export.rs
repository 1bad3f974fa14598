//! Structured-text export of curve expressions.

use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::TraceError;
use crate::expression::CurveExpression;

/// Serialized as its combined `(x, y) domain` text.
impl Serialize for CurveExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Pretty JSON array of combined expression strings.
pub fn to_json(expressions: &[CurveExpression]) -> Result<String, TraceError> {
    Ok(serde_json::to_string_pretty(expressions)?)
}

pub fn write_json(path: &Path, expressions: &[CurveExpression]) -> Result<(), TraceError> {
    std::fs::write(path, to_json(expressions)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr() -> CurveExpression {
        CurveExpression {
            x: "(1-t)^3*1 + 3*(1-t)^2*t*1 + 3*(1-t)*t^2*2 + t^3*3".into(),
            y: "(1-t)^3*0 + 3*(1-t)^2*t*0 + 3*(1-t)*t^2*0 + t^3*0".into(),
        }
    }

    #[test]
    fn json_is_array_of_combined_strings() {
        let json = to_json(&[expr(), expr()]).unwrap();
        let back: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0], expr().to_string());
        assert!(json.contains(r"\\left\\{0 \\le t \\le 1\\right\\}"));
    }

    #[test]
    fn empty_is_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn indented_two_spaces() {
        let json = to_json(&[expr()]).unwrap();
        assert!(json.starts_with("[\n  \"("));
    }
}
