use thiserror::Error;

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    ///
    /// For example, `cp` of a saturated mixture or the quality of a
    /// superheated vapor.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The inputs fall outside the model's valid domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The calculation failed, for example an internal root find that did
    /// not converge.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}
