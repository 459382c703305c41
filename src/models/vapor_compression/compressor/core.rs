//! Reciprocating compressor rating.
//!
//! Mass flow follows from the clearance volumetric efficiency
//! `η_v = 1 − C·(r^(1/n) − 1)` and `ṁ = η_v·N·V_d / v_s`. The discharge state
//! follows the polytropic temperature relation `T_d = T_s·r^((n−1)/n)` at the
//! discharge pressure, and the gas work is the enthalpy rise to that state.
//! The isentropic reference is the state at the discharge pressure with the
//! suction entropy.

mod design;
mod error;
mod exponent;
mod operating_point;
mod output;
mod traits;

use tracing::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassRate, Power, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
    volume::cubic_meter,
};

use crate::support::{root::RootConfig, thermo::State, units::SpecificEnthalpy};

pub use design::{CompressorDesign, Efficiencies, PolytropicExponent};
pub use error::CompressorError;
pub use operating_point::{OperatingPoint, SaturationConditions};
pub use output::CompressorOutput;
pub use traits::CompressorThermoModel;

use operating_point::Resolved;

/// A reciprocating compressor with its refrigerant property model.
#[derive(Debug, Clone, PartialEq)]
pub struct ReciprocatingCompressor<Fluid, Thermo> {
    design: CompressorDesign,
    thermo: Thermo,
    fluid: Fluid,
    root: RootConfig,
}

/// Polytropic compression from a suction state.
struct Compression<Fluid> {
    discharge: State<Fluid>,
    work: f64,
}

/// Suction conditions shared by every exponent tried.
struct Suction<Fluid> {
    state: State<Fluid>,
    enthalpy: f64,
    pressure_ratio: f64,
    point: Resolved,
}

impl<Fluid: Clone, Thermo: CompressorThermoModel<Fluid>> ReciprocatingCompressor<Fluid, Thermo> {
    /// Creates a compressor.
    ///
    /// # Errors
    ///
    /// Returns [`CompressorError::OutOfRange`] if a design parameter is invalid.
    pub fn new(
        design: CompressorDesign,
        thermo: Thermo,
        fluid: Fluid,
    ) -> Result<Self, CompressorError> {
        design.validate()?;
        Ok(Self {
            design,
            thermo,
            fluid,
            root: RootConfig {
                x_abs_tol: 1e-10,
                x_rel_tol: 1e-10,
                ..RootConfig::default()
            },
        })
    }

    #[must_use]
    pub fn with_root_config(mut self, root: RootConfig) -> Self {
        self.root = root;
        self
    }

    pub fn design(&self) -> &CompressorDesign {
        &self.design
    }

    pub fn thermo(&self) -> &Thermo {
        &self.thermo
    }

    /// Rates the compressor at an operating point.
    ///
    /// # Errors
    ///
    /// - [`CompressorError::StateNotSet`] if an operating point field is missing.
    /// - [`CompressorError::OutOfRange`] if the operating point is not
    ///   physical, the clearance gas re-expands past the full stroke, or the
    ///   compression does not end as superheated vapor.
    /// - [`CompressorError::RootFinding`] if no exponent matches the
    ///   isentropic efficiency.
    /// - [`CompressorError::PropertyEvaluation`] if a state cannot be built.
    pub fn rate(&self, point: &OperatingPoint) -> Result<CompressorOutput<Fluid>, CompressorError> {
        let point = point.resolve()?;

        let state = self
            .thermo
            .state_from((self.fluid.clone(), point.suction_pressure, point.suction_density))
            .map_err(|err| CompressorError::property_failed("suction state", err))?;
        let suction = Suction {
            enthalpy: self.enthalpy(&state, "suction enthalpy")?,
            pressure_ratio: (point.discharge_pressure / point.suction_pressure).get::<ratio>(),
            state,
            point,
        };

        let entropy = self
            .thermo
            .entropy(&suction.state)
            .map_err(|err| CompressorError::property_failed("suction entropy", err))?;
        let isentropic_discharge = self
            .thermo
            .state_from((self.fluid.clone(), point.discharge_pressure, entropy))
            .map_err(|err| CompressorError::property_failed("isentropic discharge", err))?;
        let isentropic_work = self
            .enthalpy(&isentropic_discharge, "isentropic discharge enthalpy")?
            - suction.enthalpy;
        if !(isentropic_work > 0.0) {
            return Err(CompressorError::out_of_range(
                "isentropic work",
                format!("must be positive, got {isentropic_work} J/kg"),
            ));
        }

        let eta = self.design.efficiencies;
        let eta_is = eta.isentropic.get::<ratio>();
        let eta_mech = eta.mechanical.get::<ratio>();

        let (n, power_efficiency) = match self.design.exponent {
            PolytropicExponent::Fixed(n) => (n, eta_is * eta_mech),
            PolytropicExponent::MatchIsentropicEfficiency => (
                self.matching_exponent(&suction, isentropic_work, eta_is)?,
                eta_mech,
            ),
        };
        let compression = self.compress(&suction, n)?;

        let clearance = self.design.clearance.get::<ratio>();
        let volumetric_efficiency = 1.0 - clearance * (suction.pressure_ratio.powf(1.0 / n) - 1.0);
        if !(volumetric_efficiency > 0.0) {
            return Err(CompressorError::out_of_range(
                "volumetric efficiency",
                format!(
                    "clearance gas fills the cylinder at pressure ratio {}",
                    suction.pressure_ratio
                ),
            ));
        }

        let mass_rate = volumetric_efficiency
            * point.speed.value
            * self.design.displacement.get::<cubic_meter>()
            * point.suction_density.value;
        let shaft_power = mass_rate * compression.work / power_efficiency;
        let electrical_power = shaft_power / eta.electrical.get::<ratio>();
        let isentropic_efficiency = mass_rate * isentropic_work / (shaft_power * eta_mech);

        debug!(
            n,
            volumetric_efficiency,
            mass_rate,
            shaft_power,
            "compressor rated"
        );

        Ok(CompressorOutput {
            polytropic_exponent: n,
            volumetric_efficiency: Ratio::new::<ratio>(volumetric_efficiency),
            mass_rate: MassRate::new::<kilogram_per_second>(mass_rate),
            suction: suction.state,
            discharge: compression.discharge,
            isentropic_discharge,
            gas_work: SpecificEnthalpy::new::<joule_per_kilogram>(compression.work),
            shaft_power: Power::new::<watt>(shaft_power),
            electrical_power: Power::new::<watt>(electrical_power),
            isentropic_efficiency: Ratio::new::<ratio>(isentropic_efficiency),
        })
    }

    /// Compresses the suction gas polytropically with exponent `n`.
    fn compress(
        &self,
        suction: &Suction<Fluid>,
        n: f64,
    ) -> Result<Compression<Fluid>, CompressorError> {
        let t_in = suction.state.temperature.get::<kelvin>();
        let t_out = t_in * suction.pressure_ratio.powf((n - 1.0) / n);

        let discharge = self
            .thermo
            .state_from((
                self.fluid.clone(),
                ThermodynamicTemperature::new::<kelvin>(t_out),
                suction.point.discharge_pressure,
            ))
            .map_err(|err| CompressorError::property_failed("polytropic discharge", err))?;
        let work = self.enthalpy(&discharge, "discharge enthalpy")? - suction.enthalpy;

        if !(work > 0.0) {
            return Err(CompressorError::out_of_range(
                "polytropic exponent",
                format!("n = {n} ends the compression below the discharge dew point"),
            ));
        }

        Ok(Compression { discharge, work })
    }

    fn enthalpy(&self, state: &State<Fluid>, context: &str) -> Result<f64, CompressorError> {
        self.thermo
            .enthalpy(state)
            .map(|h| h.value)
            .map_err(|err| CompressorError::property_failed(context, err))
    }
}
