//! Coercion of raw filter values into typed field values
//!
//! Parsing is locale-invariant: numbers use Rust's standard literal grammar,
//! dates use ISO-8601.

use crate::core::error::FilterError;
use crate::core::field::{FieldType, FieldValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Raw value rejected by [`coerce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    /// Description of the accepted input form
    pub expected: String,
}

impl CoercionError {
    fn expected(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Attach the field and raw value to produce a reportable filter error
    pub fn into_filter_error(self, field: &str, raw: &str) -> FilterError {
        FilterError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
            expected: self.expected,
        }
    }
}

/// Parse `raw` into the value form of `field_type`
pub fn coerce(raw: &str, field_type: FieldType) -> Result<FieldValue, CoercionError> {
    match field_type {
        FieldType::Text => Ok(FieldValue::String(raw.to_string())),
        FieldType::Integer => raw
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| CoercionError::expected("an integer")),
        FieldType::Decimal => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Float)
            .ok_or_else(|| CoercionError::expected("a decimal number")),
        FieldType::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(FieldValue::Boolean(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(FieldValue::Boolean(false))
            } else {
                Err(CoercionError::expected("true or false"))
            }
        }
        FieldType::Enum(constants) => {
            if constants.contains(&raw) {
                Ok(FieldValue::Enum(raw.to_string()))
            } else {
                Err(CoercionError::expected(format!(
                    "one of [{}]",
                    constants.join(", ")
                )))
            }
        }
        FieldType::Date => parse_date(raw)
            .map(FieldValue::Date)
            .ok_or_else(|| CoercionError::expected("a date in YYYY-MM-DD form")),
        FieldType::DateTime => parse_date_time(raw)
            .map(FieldValue::DateTime)
            .ok_or_else(|| {
                CoercionError::expected("an ISO-8601 date-time such as 2010-11-23T10:15:30Z")
            }),
    }
}

/// Coerce the raw value of `field`, reporting failures against that field
pub fn coerce_field(field: &str, raw: &str, field_type: FieldType) -> Result<FieldValue, FilterError> {
    coerce(raw, field_type).map_err(|e| e.into_filter_error(field, raw))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded and signed years; only the fixed ten-character form is allowed
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !(digits(0..4) && digits(5..7) && digits(8..10)) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Instants with an offset are converted to UTC; local date-times are read as UTC.
/// Sub-second precision is dropped.
fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    if raw.len() < 16 || raw.get(..10).and_then(parse_date).is_none() {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                .map(|naive| naive.and_utc())
                .ok()
        })?;
    parsed.with_nanosecond(0)
}
