//! Transcript line model

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One line of a transcript export.
///
/// Field names follow the export format (`maMonHoc`, `tenMonHoc`, `soTinChi`,
/// `diemChu`, `maHocKy`). Every other field is kept in [`extra`](Self::extra)
/// and written back out unchanged when the record is serialized.
///
/// Text fields accept any JSON scalar: `null` reads as empty and numbers or
/// booleans read as their JSON text, so a stray value in one record never
/// rejects the whole export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Stable course identifier (e.g., "MT1003")
    #[serde(rename = "maMonHoc")]
    pub course_code: String,

    /// Display name of the course
    #[serde(rename = "tenMonHoc", default, deserialize_with = "lenient_text")]
    pub course_name: String,

    /// Credit count; records with zero credits are ignored by the reducer.
    /// Whole-number floats (`4.0`) and numeric strings are accepted.
    #[serde(rename = "soTinChi", default, deserialize_with = "lenient_credits")]
    pub credit_count: u32,

    /// Letter grade as exported (case-sensitive). `null` reads as blank.
    #[serde(rename = "diemChu", default, deserialize_with = "lenient_text")]
    pub letter_grade: String,

    /// Term code the grade was earned in (e.g., "20231")
    #[serde(
        rename = "maHocKy",
        default,
        deserialize_with = "lenient_term",
        skip_serializing_if = "Option::is_none"
    )]
    pub term: Option<String>,

    /// Passthrough fields (student id, numeric score, notes, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GradeRecord {
    /// Create a record with no passthrough metadata
    #[must_use]
    pub fn new(course_code: &str, course_name: &str, credit_count: u32, letter_grade: &str) -> Self {
        Self {
            course_code: course_code.to_string(),
            course_name: course_name.to_string(),
            credit_count,
            letter_grade: letter_grade.to_string(),
            term: None,
            extra: Map::new(),
        }
    }

    /// Attach a term code
    #[must_use]
    pub fn with_term(mut self, term: &str) -> Self {
        self.term = Some(term.to_string());
        self
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_term<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_credits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let credits = match &value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(f))
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    credits
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| D::Error::custom(format!("soTinChi must be a whole number >= 0, got {value}")))
}
