//! Validation errors
//!
//! Every invalid parameter is rejected before any distribution is computed.
//! Variants carry the offending field name and value so the binary can report
//! exactly what to fix.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: String, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: f64 },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: String, value: f64 },

    #[error("{field} must lie within [{min}, {max}] (got {value})")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositiveCount { field: String, value: i64 },

    #[error("{field} ({value}) must not exceed {limit_field} ({limit})")]
    Inverted {
        field: String,
        value: f64,
        limit_field: String,
        limit: f64,
    },

    #[error("fee_multiplier={multiplier} with elasticity exponent {exponent} has no defined power term")]
    UndefinedPower { multiplier: f64, exponent: f64 },

    #[error("population must contain at least one trader")]
    EmptyPopulation,

    #[error("fee multiplier sweep must contain at least one scenario")]
    EmptySweep,

    #[error("trader {index}: {source}")]
    Trader {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

impl ValidationError {
    /// Attach the population index of the trader that failed.
    pub fn at_trader(self, index: usize) -> Self {
        ValidationError::Trader {
            index,
            source: Box::new(self),
        }
    }
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> ValidationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
            value,
        })
    }
}

/// Strictly positive and finite.
pub(crate) fn ensure_positive(field: &str, value: f64) -> ValidationResult<f64> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive {
            field: field.to_string(),
            value,
        })
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> ValidationResult<f64> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        })
    }
}

pub(crate) fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<f64> {
    ensure_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

pub(crate) fn ensure_count(field: &str, value: i64) -> ValidationResult<usize> {
    if value > 0 {
        Ok(value as usize)
    } else {
        Err(ValidationError::NotPositiveCount {
            field: field.to_string(),
            value,
        })
    }
}
