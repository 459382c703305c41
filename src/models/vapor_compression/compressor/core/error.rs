use std::error::Error;

use thiserror::Error;

use crate::support::root::RootError;

/// Errors that can occur while rating a compressor.
#[derive(Debug, Error)]
pub enum CompressorError {
    /// A required operating point field was read before it was set.
    #[error("operating point field `{field}` is not set")]
    StateNotSet { field: &'static str },

    /// A design parameter or operating input lies outside its valid range.
    #[error("{quantity} is out of range: {context}")]
    OutOfRange {
        quantity: &'static str,
        context: String,
    },

    /// A property model could not produce a state or property.
    #[error("property evaluation failed: {context}")]
    PropertyEvaluation {
        context: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// The polytropic exponent matching the isentropic efficiency was not found.
    #[error("polytropic exponent search failed")]
    RootFinding(#[from] RootError),
}

impl CompressorError {
    pub(super) fn property_failed(
        context: impl Into<String>,
        err: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self::PropertyEvaluation {
            context: context.into(),
            source: Box::new(err),
        }
    }

    pub(super) fn out_of_range(quantity: &'static str, context: impl Into<String>) -> Self {
        Self::OutOfRange {
            quantity,
            context: context.into(),
        }
    }
}
