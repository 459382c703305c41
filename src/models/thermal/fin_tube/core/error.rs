use std::error::Error;

use thiserror::Error;
use uom::si::f64::{Length, TemperatureInterval};

use crate::support::iterate::NotConverged;

use super::RegionKind;

/// Errors that can occur while solving a coil region or a whole coil.
#[derive(Debug, Error)]
pub enum RegionError {
    /// A fixed-point iteration hit its ceiling.
    #[error(transparent)]
    Convergence(#[from] NotConverged),

    /// A property model could not produce a state or property.
    #[error("property evaluation failed: {context}")]
    PropertyEvaluation {
        /// What was being evaluated.
        context: String,

        /// Underlying property model error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// A heat transfer or friction correlation failed.
    #[error("{context} correlation failed")]
    Correlation {
        context: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// An input lies outside the range the region can handle.
    #[error("{quantity} is out of range: {context}")]
    OutOfRange {
        quantity: &'static str,
        context: String,
    },

    /// Heat would have to flow from the cold stream to the hot one.
    ///
    /// The reported difference is `T_hot − T_cold`: the smallest of the mean
    /// and terminal differences for sized regions, the inlet difference for
    /// rated ones. It may be NaN if a property
    /// model produced non-numeric states.
    #[error("second law violation in {region:?} region: mean difference {mean_difference:?}")]
    SecondLawViolation {
        region: RegionKind,
        mean_difference: TemperatureInterval,
    },

    /// The superheating region alone needs at least the whole core.
    #[error("superheating needs {required:?} but the core is only {available:?} deep")]
    InsufficientLength { required: Length, available: Length },
}

impl RegionError {
    pub(super) fn property_failed(
        context: impl Into<String>,
        err: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self::PropertyEvaluation {
            context: context.into(),
            source: Box::new(err),
        }
    }

    pub(super) fn correlation_failed(
        context: impl Into<String>,
        err: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self::Correlation {
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
