//! Fin-tube coil rating by refrigerant phase regions.
//!
//! A coil is split along the air flow direction into regions, one per
//! refrigerant phase regime. Each region is a counterflow exchanger balanced
//! by fixed-point iteration on its single unknown: the flow length for
//! desuperheating, condensing, and superheating regions; the outlet
//! temperature for subcooling regions; and the refrigerant mass flow rate
//! for boiling regions. Condensers and evaporators compose the regions.

mod coil;
mod config;
mod correlation;
mod error;
mod geometry;
mod mean;
mod region;
mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use coil::{Coil, CondenserSolution, EvaporatorInput, EvaporatorSolution};
pub use config::SolveConfig;
pub use correlation::{ConstantCoefficient, Correlation, FlowConditions};
pub use error::RegionError;
pub use geometry::{FinTubeDimensions, FinTubeGeometry, GeometryError};
pub use mean::{
    BALANCED_CAPACITY_RATIO, HotStream, MeanMethod, MeanTemperatures, StreamEnds,
    TERMINAL_DIFFERENCE_FLOOR, WetAirMean, WetRegionEnds, log_mean, mean_temperatures,
    wet_air_mean,
};
pub use region::{Inlets, RegionKind, RegionSolution, SurfaceCondition};
pub use traits::{HumidAirModel, RefrigerantModel};
