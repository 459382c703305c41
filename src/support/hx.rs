//! Effectiveness-NTU building blocks.
//!
//! Coil region solvers use these types when a region's size is known and its
//! heat rate is wanted (rating), as opposed to the sizing path that works
//! from a mean temperature difference.
//!
//! # Example
//!
//! ```
//! use hvac_models::support::constraint::ConstraintResult;
//! use hvac_models::support::hx::{CapacitanceRate, CounterFlow, EffectivenessRelation, Ntu};
//! use uom::si::{ratio::ratio, thermal_conductance::watt_per_kelvin};
//!
//! fn main() -> ConstraintResult<()> {
//!     let rates = [
//!         CapacitanceRate::new::<watt_per_kelvin>(50.0)?,
//!         CapacitanceRate::new::<watt_per_kelvin>(400.0)?,
//!     ];
//!     let eff = CounterFlow.effectiveness(Ntu::new(1.0)?, rates);
//!
//!     assert!(eff.get::<ratio>() > 0.6 && eff.get::<ratio>() < 0.65);
//!     Ok(())
//! }
//! ```

mod capacitance_rate;
mod counter_flow;
mod effectiveness_ntu;

pub use capacitance_rate::CapacitanceRate;
pub use counter_flow::CounterFlow;
pub use effectiveness_ntu::{Effectiveness, EffectivenessRelation, Ntu};
