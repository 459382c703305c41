//! A fin-tube coil and the region solvers that run on it.

mod boiling;
mod condenser;
mod evaporator;
mod sizing;
mod subcooling;

pub use condenser::CondenserSolution;
pub use evaporator::{EvaporatorInput, EvaporatorSolution};

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{
        HeatTransfer, Length, MassRate, Power, Pressure, Ratio, TemperatureInterval,
        ThermalConductance, ThermodynamicTemperature,
    },
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
};

use crate::support::{
    hx::Effectiveness,
    thermo::{
        State, VaporQuality,
        fluid::{HumidityRatio, MoistAir},
    },
    units::SpecificEnthalpy,
};

use super::{
    Correlation, FinTubeGeometry, FlowConditions, HumidAirModel, RefrigerantModel, RegionError,
    RegionKind, RegionSolution, SolveConfig, SurfaceCondition,
};

/// Temperature change below which a stream counts as isothermal.
const ISOTHERMAL_SPAN: f64 = 1e-9;

/// A fin-tube coil with its property models and correlations.
///
/// The coil holds only design data. Operating conditions are passed to each
/// solve, so one coil can rate any number of operating points.
#[derive(Debug, Clone, PartialEq)]
pub struct Coil<RM, AM, RC, AC> {
    geometry: FinTubeGeometry,
    refrigerant: RM,
    air: AM,
    refrigerant_side: RC,
    air_side: AC,
    config: SolveConfig,
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Creates a coil with the default [`SolveConfig`].
    pub fn new(
        geometry: FinTubeGeometry,
        refrigerant: RM,
        air: AM,
        refrigerant_side: RC,
        air_side: AC,
    ) -> Self {
        Self {
            geometry,
            refrigerant,
            air,
            refrigerant_side,
            air_side,
            config: SolveConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SolveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn geometry(&self) -> &FinTubeGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    pub fn refrigerant_model(&self) -> &RM {
        &self.refrigerant
    }

    pub fn air_model(&self) -> &AM {
        &self.air
    }
}

/// End and mean states of both streams across a region.
#[derive(Debug, Clone)]
struct Streams<Fluid> {
    refrigerant_in: State<Fluid>,
    refrigerant_out: State<Fluid>,
    refrigerant_mean: State<Fluid>,
    refrigerant_mass_rate: MassRate,
    air_in: State<MoistAir>,
    air_out: State<MoistAir>,
    air_mean: State<MoistAir>,
    air_mass_rate: MassRate,
    heat_rate: Power,
}

/// Convective coefficients over a region slice.
#[derive(Debug, Clone, Copy)]
struct SliceTransfer {
    inner: HeatTransfer,
    outer: HeatTransfer,
    surface_efficiency: Ratio,
}

/// Everything but the pressure drops of a solved region.
#[derive(Debug, Clone)]
struct Resolved<Fluid> {
    streams: Streams<Fluid>,
    conductance: ThermalConductance,
    effectiveness: Effectiveness,
    mean_difference: f64,
    surface: SurfaceCondition,
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Seed for sizing iterations: half the core depth.
    fn default_flow_length(&self) -> Length {
        self.geometry.depth() * 0.5
    }

    /// Outer-to-inner area ratio of a slice, taken over the whole core when
    /// the slice holds no tubes.
    fn area_ratio(&self, flow_length: Length) -> f64 {
        let inner = self.geometry.inner_area(flow_length);
        let length = if inner.value > 0.0 {
            flow_length
        } else {
            self.geometry.depth()
        };
        (self.geometry.outer_area(length) / self.geometry.inner_area(length)).get::<ratio>()
    }

    /// Inner film and fin-corrected outer film conductances, `h_i·A_i` and
    /// `η_o·h_o·A_o`, in W/K.
    fn film_conductances(&self, flow_length: Length, transfer: &SliceTransfer) -> (f64, f64) {
        let inner = transfer.inner.get::<watt_per_square_meter_kelvin>()
            * self.geometry.inner_area(flow_length).value;
        let outer = transfer.surface_efficiency.get::<ratio>()
            * transfer.outer.get::<watt_per_square_meter_kelvin>()
            * self.geometry.outer_area(flow_length).value;
        (inner, outer)
    }

    /// Overall conductance `UA` of a slice.
    fn conductance(&self, flow_length: Length, transfer: &SliceTransfer) -> ThermalConductance {
        let (inner, outer) = self.film_conductances(flow_length, transfer);
        let ua = if inner > 0.0 && outer > 0.0 {
            1.0 / (1.0 / inner + 1.0 / outer)
        } else {
            0.0
        };
        ThermalConductance::new::<watt_per_kelvin>(ua)
    }

    fn air_flow<'a, Fluid>(
        &self,
        streams: &'a Streams<Fluid>,
        flow_length: Length,
    ) -> FlowConditions<'a, MoistAir> {
        FlowConditions {
            mean: &streams.air_mean,
            mass_flux: streams.air_mass_rate / self.geometry.min_free_flow_area(),
            hydraulic_diameter: self.geometry.hydraulic_diameter(flow_length),
            flow_length,
            heat_rate: streams.heat_rate,
        }
    }

    fn refrigerant_flow<'a, Fluid>(
        &self,
        streams: &'a Streams<Fluid>,
        flow_length: Length,
    ) -> FlowConditions<'a, Fluid> {
        let dims = self.geometry.dimensions();
        let path =
            dims.tube_length * self.geometry.tube_count(flow_length) / dims.circuits as f64;
        FlowConditions {
            mean: &streams.refrigerant_mean,
            mass_flux: streams.refrigerant_mass_rate / self.geometry.inner_flow_area(),
            hydraulic_diameter: dims.inner_diameter,
            flow_length: path,
            heat_rate: streams.heat_rate,
        }
    }
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    /// Evaluates both convective coefficients and the surface efficiency.
    fn transfer<Fluid>(
        &self,
        flow_length: Length,
        streams: &Streams<Fluid>,
    ) -> Result<SliceTransfer, RegionError>
    where
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let air_flow = self.air_flow(streams, flow_length);
        let outer = self
            .air_side
            .convective_coefficient(&self.geometry, &air_flow)
            .map_err(|err| RegionError::correlation_failed("air-side heat transfer", err))?;
        let fin_efficiency = self
            .air_side
            .fin_efficiency(&self.geometry, outer)
            .map_err(|err| RegionError::correlation_failed("fin efficiency", err))?;

        let inner = self
            .refrigerant_side
            .convective_coefficient(&self.geometry, &self.refrigerant_flow(streams, flow_length))
            .map_err(|err| {
                RegionError::correlation_failed("refrigerant-side heat transfer", err)
            })?;

        Ok(SliceTransfer {
            inner,
            outer,
            surface_efficiency: self.geometry.surface_efficiency(flow_length, fin_efficiency),
        })
    }

    /// Builds the solution, evaluating pressure drops over the final slice.
    fn finish<Fluid>(
        &self,
        kind: RegionKind,
        flow_length: Length,
        resolved: Resolved<Fluid>,
        iters: usize,
    ) -> Result<RegionSolution<Fluid>, RegionError>
    where
        RC: Correlation<Fluid>,
        AC: Correlation<MoistAir>,
    {
        let streams = resolved.streams;
        let zero = Pressure::new::<pascal>(0.0);

        let (air_pressure_drop, refrigerant_pressure_drop) = if flow_length.value > 0.0 {
            let air = self
                .air_side
                .pressure_drop(
                    &self.geometry,
                    &self.air_flow(&streams, flow_length),
                    &streams.air_in,
                    &streams.air_out,
                )
                .map_err(|err| RegionError::correlation_failed("air-side pressure drop", err))?;
            let refrigerant = self
                .refrigerant_side
                .pressure_drop(
                    &self.geometry,
                    &self.refrigerant_flow(&streams, flow_length),
                    &streams.refrigerant_in,
                    &streams.refrigerant_out,
                )
                .map_err(|err| {
                    RegionError::correlation_failed("refrigerant-side pressure drop", err)
                })?;
            (air, refrigerant)
        } else {
            (zero, zero)
        };

        Ok(RegionSolution {
            kind,
            refrigerant_in: streams.refrigerant_in,
            refrigerant_out: streams.refrigerant_out,
            refrigerant_mass_rate: streams.refrigerant_mass_rate,
            air_in: streams.air_in,
            air_out: streams.air_out,
            air_mass_rate: streams.air_mass_rate,
            heat_rate: streams.heat_rate,
            flow_length,
            conductance: resolved.conductance,
            effectiveness: resolved.effectiveness,
            mean_temperature_difference: TemperatureInterval::new::<delta_kelvin>(
                resolved.mean_difference,
            ),
            air_pressure_drop,
            refrigerant_pressure_drop,
            surface: resolved.surface,
            iters,
        })
    }
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    fn refrigerant_pressure<Fluid>(&self, state: &State<Fluid>) -> Result<Pressure, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
    {
        self.refrigerant
            .pressure(state)
            .map_err(|err| RegionError::property_failed("refrigerant pressure", err))
    }

    fn refrigerant_enthalpy<Fluid>(&self, state: &State<Fluid>) -> Result<f64, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
    {
        self.refrigerant
            .enthalpy(state)
            .map(|h| h.get::<joule_per_kilogram>())
            .map_err(|err| RegionError::property_failed("refrigerant enthalpy", err))
    }

    /// Saturated refrigerant at `pressure` with the given quality.
    fn saturated<Fluid: Clone>(
        &self,
        like: &State<Fluid>,
        pressure: Pressure,
        quality: VaporQuality,
    ) -> Result<State<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
    {
        self.refrigerant
            .state_from((like.fluid.clone(), pressure, quality))
            .map_err(|err| RegionError::property_failed("saturated refrigerant", err))
    }

    fn refrigerant_at_enthalpy<Fluid: Clone>(
        &self,
        like: &State<Fluid>,
        pressure: Pressure,
        enthalpy: f64,
    ) -> Result<State<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
    {
        self.refrigerant
            .state_from((
                like.fluid.clone(),
                pressure,
                SpecificEnthalpy::new::<joule_per_kilogram>(enthalpy),
            ))
            .map_err(|err| RegionError::property_failed("refrigerant from enthalpy", err))
    }

    fn refrigerant_at_temperature<Fluid: Clone>(
        &self,
        like: &State<Fluid>,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<State<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
    {
        self.refrigerant
            .state_from((like.fluid.clone(), temperature, pressure))
            .map_err(|err| RegionError::property_failed("refrigerant from temperature", err))
    }

    /// Mean refrigerant state.
    ///
    /// Inside the vapor dome the mean is taken on enthalpy, elsewhere on the
    /// estimated mean temperature.
    fn refrigerant_mean<Fluid: Clone>(
        &self,
        inlet: &State<Fluid>,
        outlet: &State<Fluid>,
        pressure: Pressure,
        mean_temperature: ThermodynamicTemperature,
    ) -> Result<State<Fluid>, RegionError>
    where
        RM: RefrigerantModel<Fluid>,
    {
        let two_phase =
            self.refrigerant.quality(inlet).is_ok() && self.refrigerant.quality(outlet).is_ok();
        if two_phase {
            let h = 0.5 * (self.refrigerant_enthalpy(inlet)? + self.refrigerant_enthalpy(outlet)?);
            self.refrigerant_at_enthalpy(inlet, pressure, h)
        } else {
            self.refrigerant_at_temperature(inlet, pressure, mean_temperature)
        }
    }
}

impl<RM, AM, RC, AC> Coil<RM, AM, RC, AC> {
    fn air_pressure(&self, state: &State<MoistAir>) -> Result<Pressure, RegionError>
    where
        AM: HumidAirModel,
    {
        self.air
            .pressure(state)
            .map_err(|err| RegionError::property_failed("air pressure", err))
    }

    fn air_enthalpy(&self, state: &State<MoistAir>) -> Result<f64, RegionError>
    where
        AM: HumidAirModel,
    {
        self.air
            .enthalpy(state)
            .map(|h| h.get::<joule_per_kilogram>())
            .map_err(|err| RegionError::property_failed("air enthalpy", err))
    }

    fn air_humidity_ratio(&self, state: &State<MoistAir>) -> Result<HumidityRatio, RegionError>
    where
        AM: HumidAirModel,
    {
        self.air
            .humidity_ratio(state)
            .map_err(|err| RegionError::property_failed("air humidity ratio", err))
    }

    /// Air leaving a dry region after gaining `heat_rate`.
    fn air_after(
        &self,
        air_in: &State<MoistAir>,
        air_mass_rate: MassRate,
        heat_rate: f64,
    ) -> Result<State<MoistAir>, RegionError>
    where
        AM: HumidAirModel,
    {
        let pressure = self.air_pressure(air_in)?;
        let h = self.air_enthalpy(air_in)? + heat_rate / air_mass_rate.get::<kilogram_per_second>();
        self.air
            .state_from((
                pressure,
                SpecificEnthalpy::new::<joule_per_kilogram>(h),
                self.air_humidity_ratio(air_in)?,
            ))
            .map_err(|err| RegionError::property_failed("air outlet", err))
    }

    /// Air at the given temperature with the humidity of `like`.
    fn air_at_temperature(
        &self,
        like: &State<MoistAir>,
        temperature: ThermodynamicTemperature,
    ) -> Result<State<MoistAir>, RegionError>
    where
        AM: HumidAirModel,
    {
        let pressure = self.air_pressure(like)?;
        let fluid = MoistAir::new(self.air_humidity_ratio(like)?);
        self.air
            .state_from((fluid, temperature, pressure))
            .map_err(|err| RegionError::property_failed("mean air", err))
    }

    /// `ṁ·c̄_p` of the air, with `c_p` averaged over the ends.
    fn air_capacitance(
        &self,
        air_mass_rate: MassRate,
        air_in: &State<MoistAir>,
        air_out: &State<MoistAir>,
    ) -> Result<ThermalConductance, RegionError>
    where
        AM: HumidAirModel,
    {
        let cp = |state: &State<MoistAir>| {
            self.air
                .cp(state)
                .map_err(|err| RegionError::property_failed("air specific heat", err))
        };
        let cp_mean = 0.5 * (cp(air_in)? + cp(air_out)?);
        Ok(air_mass_rate * cp_mean)
    }
}

/// `ṁ·|Δh/ΔT|`, infinite for an isothermal (phase-changing) stream.
fn refrigerant_capacitance(mass_rate: MassRate, dh: f64, dt: f64) -> ThermalConductance {
    let rate = if dt.abs() < ISOTHERMAL_SPAN {
        f64::INFINITY
    } else {
        mass_rate.get::<kilogram_per_second>() * (dh / dt).abs()
    };
    ThermalConductance::new::<watt_per_kelvin>(rate)
}

fn positive_rate(quantity: &'static str, rate: MassRate) -> Result<MassRate, RegionError> {
    let value = rate.get::<kilogram_per_second>();
    if value > 0.0 && value.is_finite() {
        Ok(rate)
    } else {
        Err(RegionError::out_of_range(
            quantity,
            format!("must be positive, got {value} kg/s"),
        ))
    }
}

fn non_negative_length(quantity: &'static str, length: Length) -> Result<Length, RegionError> {
    let value = length.get::<meter>();
    if value >= 0.0 && value.is_finite() {
        Ok(length)
    } else {
        Err(RegionError::out_of_range(
            quantity,
            format!("must be non-negative, got {value} m"),
        ))
    }
}
