use thiserror::Error;

/// Errors that can occur while building a construction assembly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvelopeError {
    /// The catalog has no material under this name.
    #[error("unknown material `{name}`")]
    UnknownMaterial { name: String },

    /// A material property, layer dimension, or film condition is invalid.
    #[error("{quantity} is out of range: {context}")]
    OutOfRange {
        quantity: &'static str,
        context: String,
    },
}

impl EnvelopeError {
    pub(super) fn out_of_range(quantity: &'static str, context: impl Into<String>) -> Self {
        Self::OutOfRange {
            quantity,
            context: context.into(),
        }
    }
}

/// Checks that an SI value is positive and finite.
pub(super) fn positive(quantity: &'static str, value: f64) -> Result<f64, EnvelopeError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(EnvelopeError::out_of_range(
            quantity,
            format!("must be positive, got {value} (SI)"),
        ))
    }
}
