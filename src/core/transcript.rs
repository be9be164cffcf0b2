//! Transcript intake
//!
//! Validates the raw JSON export, turns it into [`GradeRecord`]s, and builds
//! the redacted copy handed to the notification sink.

use crate::core::error::TranscriptError;
use crate::core::grades::{is_selectable, NON_ACADEMIC};
use crate::core::models::GradeRecord;
use planner_logger::{debug, warn};
use serde_json::Value;

/// Field that identifies the student in the export; never leaves the process.
pub const STUDENT_ID_FIELD: &str = "sinhVienId";

/// A transcript that passed the shape check
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    raw: Vec<Value>,
    records: Vec<GradeRecord>,
}

impl Transcript {
    /// Parse and validate a transcript export.
    ///
    /// # Errors
    /// Returns an error if the input is not JSON, not an array, contains a
    /// non-object element, or an element lacks a usable `maMonHoc` or has a
    /// `soTinChi` that is not a whole number. Other stray values are tolerated.
    pub fn parse(input: &str) -> Result<Self, TranscriptError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value.
    ///
    /// # Errors
    /// Same as [`Transcript::parse`], minus the JSON syntax case.
    pub fn from_value(value: Value) -> Result<Self, TranscriptError> {
        let raw = match value {
            Value::Array(raw) => raw,
            other => {
                return Err(TranscriptError::NotAnArray {
                    found: json_type(&other),
                })
            }
        };

        let records = raw
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(TranscriptError::NotAnObject { index });
                }
                serde_json::from_value::<GradeRecord>(item.clone()).map_err(|e| {
                    TranscriptError::InvalidRecord {
                        index,
                        message: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let unknown = records
            .iter()
            .filter(|r| {
                !is_selectable(&r.letter_grade) && !NON_ACADEMIC.contains(&r.letter_grade.as_str())
            })
            .count();
        if unknown > 0 {
            warn!("{unknown} record(s) carry an unrecognized letter grade; they rank as 0.0");
        }
        debug!("Transcript accepted: {} records", records.len());

        Ok(Self { raw, records })
    }

    /// Typed grade records, in input order
    #[must_use]
    pub fn records(&self) -> &[GradeRecord] {
        &self.records
    }

    /// Raw JSON objects, in input order
    #[must_use]
    pub fn raw(&self) -> &[Value] {
        &self.raw
    }

    /// Copy of the raw input with the student identifier removed
    #[must_use]
    pub fn redacted(&self) -> Vec<Value> {
        redact(&self.raw)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True for an empty export
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Remove [`STUDENT_ID_FIELD`] from every object; other values pass through.
#[must_use]
pub fn redact(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if let Value::Object(map) = &mut item {
                map.remove(STUDENT_ID_FIELD);
            }
            item
        })
        .collect()
}

const fn json_type(value: &Value) -> &'static str {
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
    use serde_json::json;

    #[test]
    fn test_parse_sample_export() {
        let input = r#"[
            {"sinhVienId": 1, "maMonHoc": "MT1003", "tenMonHoc": "Giải tích 1", "soTinChi": 4, "diemChu": "B+"},
            {"sinhVienId": 1, "maMonHoc": "CO1005", "tenMonHoc": "Nhập môn Điện toán", "soTinChi": 3, "diemChu": "A"}
        ]"#;
        let transcript = Transcript::parse(input).expect("valid transcript");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.records()[1].course_code, "CO1005");
    }

    #[test]
    fn test_rejects_non_array() {
        let err = Transcript::parse(r#"{"maMonHoc": "MT1003"}"#).unwrap_err();
        assert!(matches!(err, TranscriptError::NotAnArray { found: "an object" }));
    }

    #[test]
    fn test_rejects_non_object_element() {
        let err = Transcript::parse(r#"[{"maMonHoc": "MT1003"}, 42]"#).unwrap_err();
        assert!(matches!(err, TranscriptError::NotAnObject { index: 1 }));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(Transcript::parse("[{"), Err(TranscriptError::Json(_))));
    }

    #[test]
    fn test_rejects_missing_code_and_bad_credits() {
        let missing = Transcript::parse(r#"[{"diemChu": "A"}]"#).unwrap_err();
        assert!(matches!(missing, TranscriptError::InvalidRecord { index: 0, .. }));

        let negative = Transcript::parse(r#"[{"maMonHoc": "X", "soTinChi": -3}]"#).unwrap_err();
        assert!(matches!(negative, TranscriptError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_empty_array_is_valid() {
        let transcript = Transcript::parse("[]").expect("empty transcript");
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_redact_strips_student_id_only() {
        let items = vec![
            json!({"sinhVienId": 212900, "maMonHoc": "MT1003", "diemSo": 8.0}),
            json!({"maMonHoc": "CO1005"}),
        ];
        let redacted = redact(&items);
        assert_eq!(redacted[0], json!({"maMonHoc": "MT1003", "diemSo": 8.0}));
        assert_eq!(redacted[1], items[1]);
        // Input untouched
        assert!(items[0].get(STUDENT_ID_FIELD).is_some());
    }
}
