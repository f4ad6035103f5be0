use crate::model::{NewStudent, Status, Subject};
use thiserror::Error;

pub const PASS_THRESHOLD: f64 = 40.0;

pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 120;
pub const AGE_DEFAULT: i64 = 18;

pub const MARKS_MIN: f64 = 0.0;
pub const MARKS_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("missing marks")]
    MissingMarks,
    #[error("age must be between 1 and 120 (got {0})")]
    AgeOutOfRange(i64),
    #[error("marks must be between 0 and 100 (got {0})")]
    MarksOutOfRange(f64),
    #[error("missing subject")]
    MissingSubject,
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
}

impl ValidationError {
    /// Stable machine-readable reason, reported as `details.reason`.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "empty_name",
            ValidationError::MissingMarks => "missing_marks",
            ValidationError::AgeOutOfRange(_) => "age_out_of_range",
            ValidationError::MarksOutOfRange(_) => "marks_out_of_range",
            ValidationError::MissingSubject => "missing_subject",
            ValidationError::UnknownSubject(_) => "unknown_subject",
        }
    }
}

pub fn derive_status(marks: f64) -> Status {
    if marks >= PASS_THRESHOLD {
        Status::Pass
    } else {
        Status::Fail
    }
}

/// Presence checks for the add form: name first, then marks.
pub fn validate_new_record(name: &str, marks: Option<f64>) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    match marks {
        Some(m) if !m.is_nan() => Ok(()),
        _ => Err(ValidationError::MissingMarks),
    }
}

pub fn validate_marks_update(marks: Option<f64>) -> Result<f64, ValidationError> {
    let m = match marks {
        Some(m) if !m.is_nan() => m,
        _ => return Err(ValidationError::MissingMarks),
    };
    check_marks_range(m)?;
    Ok(m)
}

fn check_marks_range(m: f64) -> Result<(), ValidationError> {
    if !(MARKS_MIN..=MARKS_MAX).contains(&m) {
        return Err(ValidationError::MarksOutOfRange(m));
    }
    Ok(())
}

/// Accepts a JSON number or a numeric string. Anything else (including NaN)
/// is treated as absent.
pub fn marks_from_json(v: Option<&serde_json::Value>) -> Option<f64> {
    let m = match v? {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if m.is_nan() {
        None
    } else {
        Some(m)
    }
}

impl NewStudent {
    pub fn from_params(
        name: &str,
        age: Option<i64>,
        subject: Option<&str>,
        marks: Option<f64>,
    ) -> Result<NewStudent, ValidationError> {
        validate_new_record(name, marks)?;
        let marks = marks.ok_or(ValidationError::MissingMarks)?;

        let age = age.unwrap_or(AGE_DEFAULT);
        if !(AGE_MIN..=AGE_MAX).contains(&age) {
            return Err(ValidationError::AgeOutOfRange(age));
        }

        let raw_subject = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingSubject)?;
        let subject = Subject::parse(raw_subject)
            .ok_or_else(|| ValidationError::UnknownSubject(raw_subject.to_string()))?;

        check_marks_range(marks)?;

        Ok(NewStudent {
            name: name.trim().to_string(),
            age,
            subject,
            marks,
        })
    }
}
