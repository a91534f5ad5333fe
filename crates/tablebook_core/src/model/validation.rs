//! Field-level validation shared by all entity inputs.
//!
//! # Invariants
//! - Text lengths are counted in characters, matching `varchar(n)` semantics.
//! - Required text fields must not be blank after trimming; label columns
//!   (role, status) only carry a length limit.
//! - Stored timestamps use one canonical text layout without timezone.

use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical storage layout for timestamps. `%.f` omits a zero fraction.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const ACCEPTED_TIMESTAMP_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Field that failed basic type/format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty or whitespace-only.
    Blank { field: &'static str },
    /// Text field exceeds its declared column length.
    TooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// Integer field must be strictly greater than zero.
    NotPositive { field: &'static str, value: i64 },
    /// Text could not be parsed as a timestamp.
    InvalidTimestamp { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::TooLong { field, .. }
            | Self::NotPositive { field, .. }
            | Self::InvalidTimestamp { field, .. } => field,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "`{field}` must not be blank"),
            Self::TooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "`{field}` is {actual_chars} characters long, limit is {max_chars}"
            ),
            Self::NotPositive { field, value } => {
                write!(f, "`{field}` must be positive, got {value}")
            }
            Self::InvalidTimestamp { field, value } => {
                write!(f, "`{field}` is not a valid timestamp: `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Checks a required `varchar(max_chars)` value.
pub fn require_text(field: &'static str, value: &str, max_chars: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    limit_text(field, value, max_chars)
}

/// Checks only the `varchar(max_chars)` length; empty text is accepted.
pub fn limit_text(field: &'static str, value: &str, max_chars: usize) -> ValidationResult {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}

/// Checks a strictly positive integer value.
pub fn require_positive(field: &'static str, value: i32) -> ValidationResult {
    if value <= 0 {
        return Err(ValidationError::NotPositive {
            field,
            value: i64::from(value),
        });
    }
    Ok(())
}

/// Parses user-provided timestamp text (space or `T` separator, optional seconds).
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();
    ACCEPTED_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// Formats a timestamp in the canonical storage layout.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn require_text_rejects_blank_and_counts_characters() {
        assert_eq!(
            require_text("name", "   ", 10),
            Err(ValidationError::Blank { field: "name" })
        );
        assert!(require_text("name", "ééééé", 5).is_ok());
        assert_eq!(
            require_text("name", "ééééé!", 5),
            Err(ValidationError::TooLong {
                field: "name",
                max_chars: 5,
                actual_chars: 6
            })
        );
    }

    #[test]
    fn limit_text_accepts_empty_but_not_oversized() {
        assert!(limit_text("role", "", 20).is_ok());
        assert!(limit_text("role", "   ", 20).is_ok());
        assert!(matches!(
            limit_text("role", &"x".repeat(21), 20),
            Err(ValidationError::TooLong { actual_chars: 21, .. })
        ));
    }

    #[test]
    fn require_positive_rejects_zero_and_negative() {
        assert!(require_positive("n", 1).is_ok());
        assert!(require_positive("n", 0).is_err());
        assert_eq!(
            require_positive("n", -3),
            Err(ValidationError::NotPositive { field: "n", value: -3 })
        );
    }

    #[test]
    fn parse_timestamp_accepts_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(19, 30, 0))
            .expect("valid date");
        for input in [
            "2024-05-01 19:30:00",
            "2024-05-01T19:30:00",
            "2024-05-01 19:30",
            " 2024-05-01T19:30 ",
        ] {
            assert_eq!(parse_timestamp("t", input), Ok(expected), "input {input}");
        }
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("reservation_time", "tomorrow evening").unwrap_err();
        assert_eq!(err.field(), "reservation_time");
    }

    #[test]
    fn format_then_parse_keeps_subsecond_precision() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_nano_opt(3, 4, 5, 123_456_789))
            .expect("valid date");
        let text = format_timestamp(&value);
        assert_eq!(text, "2024-01-02 03:04:05.123456789");
        assert_eq!(parse_timestamp("t", &text), Ok(value));
    }
}
