use uom::si::f64::{Length, MassRate, Power, Pressure, TemperatureInterval, ThermalConductance};

use crate::support::{
    hx::Effectiveness,
    thermo::{State, fluid::MoistAir},
};

/// Refrigerant phase regime of a coil region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Superheated vapor cooled to saturated vapor.
    Desuperheating,
    /// Saturated vapor condensed to saturated liquid.
    Condensing,
    /// Saturated liquid cooled below saturation.
    Subcooling,
    /// Saturated vapor heated above saturation.
    Superheating,
    /// Two-phase refrigerant evaporated to saturated vapor.
    Boiling,
}

/// Whether moisture condensed on the air-side surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfaceCondition {
    #[default]
    Dry,
    Wet,
}

/// Both inlet states and mass flow rates of a region or coil.
///
/// Where the refrigerant flow is the unknown (boiling regions and
/// evaporators), `refrigerant_mass_rate` is the initial guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inlets<Fluid> {
    pub refrigerant: State<Fluid>,
    pub refrigerant_mass_rate: MassRate,
    pub air: State<MoistAir>,
    pub air_mass_rate: MassRate,
}

/// A solved coil region.
///
/// Air enters the region at `air_in` and refrigerant at `refrigerant_in`;
/// the streams run in counterflow.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSolution<Fluid> {
    pub kind: RegionKind,
    pub refrigerant_in: State<Fluid>,
    pub refrigerant_out: State<Fluid>,
    pub refrigerant_mass_rate: MassRate,
    pub air_in: State<MoistAir>,
    pub air_out: State<MoistAir>,
    pub air_mass_rate: MassRate,

    /// Heat transferred between the streams, always non-negative.
    pub heat_rate: Power,

    /// Depth of core occupied by the region, in the air flow direction.
    pub flow_length: Length,

    /// Overall conductance `UA` of the region at its flow length.
    pub conductance: ThermalConductance,

    pub effectiveness: Effectiveness,

    /// Mean `T_hot − T_cold` between the streams.
    pub mean_temperature_difference: TemperatureInterval,

    pub air_pressure_drop: Pressure,
    pub refrigerant_pressure_drop: Pressure,
    pub surface: SurfaceCondition,

    /// Fixed-point iterations taken.
    pub iters: usize,
}
