/// The ways in which client-supplied analytics input can be rejected.
///
/// These are precondition failures: none of them is retryable, and the
/// transport layer decides how each one is presented to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A business parameter needed for break-even analysis has not been set
    #[error("business data is incomplete: {field} is missing")]
    MissingBusinessData {
        /// The wire name of the absent field
        field: &'static str,
    },

    /// A monetary or unit amount is negative, infinite or NaN
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidNumericInput {
        /// The wire name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A required campaign field was not supplied
    #[error("{field} is required")]
    MissingField {
        /// The wire name of the absent field
        field: &'static str,
    },

    /// A campaign name is empty once surrounding whitespace is removed
    #[error("campaign name cannot be empty")]
    EmptyName,
}

/// Reject anything that is not a finite, non-negative amount.
pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidNumericInput { field, value })
    }
}
