use thiserror::Error;

/// Errors that can occur while evaluating a fan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FanError {
    /// A design parameter or operating input lies outside its valid range.
    ///
    /// Raised before any power or speed is computed.
    #[error("{quantity} is out of range: {context}")]
    OutOfRange {
        quantity: &'static str,
        context: String,
    },
}

impl FanError {
    pub(super) fn out_of_range(quantity: &'static str, context: impl Into<String>) -> Self {
        Self::OutOfRange {
            quantity,
            context: context.into(),
        }
    }
}
