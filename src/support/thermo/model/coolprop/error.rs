use std::sync::PoisonError;

use thiserror::Error;

use crate::support::{iterate::NotConverged, thermo::PropertyError};

/// Errors returned by the [`CoolProp`](super::CoolProp) and
/// [`CoolPropMoistAir`](super::CoolPropMoistAir) models.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoolPropError {
    #[error(transparent)]
    Rfluids(#[from] rfluids::native::CoolPropError),

    /// A result came back from CoolProp but lies outside the quantity's domain.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// An inversion layered on top of CoolProp did not converge.
    #[error(transparent)]
    Convergence(#[from] NotConverged),

    #[error("CoolProp abstract state mutex poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for CoolPropError {
    fn from(_: PoisonError<T>) -> Self {
        CoolPropError::Poisoned
    }
}

impl From<CoolPropError> for PropertyError {
    fn from(error: CoolPropError) -> Self {
        match error {
            CoolPropError::Rfluids(message) => map_error_message(&message.to_string()),
            CoolPropError::Property(error) => error,
            CoolPropError::Convergence(error) => PropertyError::Calculation {
                context: error.to_string(),
            },
            CoolPropError::Poisoned => PropertyError::Calculation {
                context: "CoolProp abstract state mutex poisoned".to_string(),
            },
        }
    }
}

/// Classifies a CoolProp error message as a [`PropertyError`].
///
/// CoolProp reports failures as free text, so classification is by
/// substring. Unrecognized messages become [`PropertyError::Calculation`]
/// with the original text kept as context.
fn map_error_message(message: &str) -> PropertyError {
    const UNDEFINED_MARKERS: &[&str] = &["not defined", "not available"];
    const OUT_OF_DOMAIN_MARKERS: &[&str] = &[
        "not in range",
        "out of range",
        "outside the range of validity",
        "must be in range",
        "must be between",
        "quality must be",
        "not a valid number",
        "invalid state",
        "invalid number",
    ];

    let lowered = message.to_lowercase();
    let context = message.to_string();

    if contains_any(&lowered, UNDEFINED_MARKERS) {
        PropertyError::Undefined { context }
    } else if contains_any(&lowered, OUT_OF_DOMAIN_MARKERS) {
        PropertyError::OutOfDomain { context }
    } else {
        PropertyError::Calculation { context }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_message() {
        let error = map_error_message("Output key is not defined for this backend");
        assert!(matches!(error, PropertyError::Undefined { .. }));
    }

    #[test]
    fn range_message_is_out_of_domain() {
        let error = map_error_message("Temperature 900 K is out of range");
        assert!(matches!(error, PropertyError::OutOfDomain { .. }));
    }

    #[test]
    fn invalid_number_is_out_of_domain() {
        let error = map_error_message("p is not a valid number");
        assert!(matches!(error, PropertyError::OutOfDomain { .. }));
    }

    #[test]
    fn unknown_message_keeps_its_text() {
        let error = map_error_message("some other failure");
        assert_eq!(
            error,
            PropertyError::Calculation {
                context: "some other failure".to_string()
            }
        );
    }

    #[test]
    fn property_errors_pass_through() {
        let inner = PropertyError::Undefined {
            context: "quality of a superheated vapor".to_string(),
        };
        let error: PropertyError = CoolPropError::Property(inner.clone()).into();
        assert_eq!(error, inner);
    }
}
