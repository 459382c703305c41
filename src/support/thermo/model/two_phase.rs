//! Idealized two-phase pure refrigerant.
//!
//! `TwoPhase` gives coil and compressor models a vapor dome to work with
//! without depending on an external property library.
//!
//! # Assumptions
//!
//! - One constant specific heat `c` for both phases.
//! - Constant latent heat `h_fg`.
//! - Saturation line from the integrated Clausius–Clapeyron relation:
//!   `p_sat(T) = p₀·exp(−(h_fg/R)·(1/T − 1/T₀))`.
//! - Ideal-gas vapor: `p = ρ·R·T`, `s = s_g(T₀) + c·ln(T/T₀) − R·ln(p/p₀)`.
//! - Liquid density rises linearly above saturation with a constant bulk
//!   modulus; liquid enthalpy and entropy depend on temperature only.
//!
//! With these choices the ideal-gas vapor entropy meets `s_f + h_fg/T` on the
//! saturation line, so isentropic and isenthalpic processes stay consistent
//! across the dome boundary.
//!
//! # Reference state
//!
//! Saturated liquid at `T₀` has enthalpy `h₀` and entropy `s₀`; `p₀` is the
//! saturation pressure at `T₀`.

use std::marker::PhantomData;

use thiserror::Error;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    thermo::{
        PropertyError, State, VaporQuality,
        capability::{
            HasCp, HasEnthalpy, HasEntropy, HasPressure, HasQuality, StateFrom, ThermoModel,
        },
    },
    units::{SpecificEnthalpy, SpecificEntropy, SpecificGasConstant},
};

/// Relative tolerance used to recognize states on the saturation line.
const SATURATION_TOL: f64 = 1e-9;

/// Reference state for a [`TwoPhase`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPhaseReference {
    /// Reference temperature `T₀`.
    pub temperature: ThermodynamicTemperature,
    /// Saturation pressure at `T₀`.
    pub pressure: Pressure,
    /// Saturated liquid enthalpy at `T₀`.
    pub enthalpy: SpecificEnthalpy,
    /// Saturated liquid entropy at `T₀`.
    pub entropy: SpecificEntropy,
}

/// Constant parameters for the [`TwoPhase`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPhaseParameters {
    pub gas_constant: SpecificGasConstant,
    pub specific_heat: SpecificHeatCapacity,
    pub latent_heat: SpecificEnthalpy,
    pub liquid_density: MassDensity,
    pub liquid_bulk_modulus: Pressure,
    pub reference: TwoPhaseReference,
}

/// Fluid constants required by the [`TwoPhase`] model.
pub trait TwoPhaseFluid {
    /// Returns the constant parameters for use with [`TwoPhase`].
    fn parameters() -> TwoPhaseParameters;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TwoPhaseParametersError {
    #[error("parameter `{name}` must be strictly positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Idealized pure refrigerant with a vapor dome.
///
/// Parameters are stored in SI base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPhase<Fluid> {
    r: f64,
    c: f64,
    h_fg: f64,
    rho_f: f64,
    bulk: f64,
    t0: f64,
    p0: f64,
    h0: f64,
    s0: f64,
    _marker: PhantomData<Fluid>,
}

/// Where a state sits relative to the vapor dome.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Liquid { pressure: f64, saturated: bool },
    Mixture { quality: f64 },
    Vapor { pressure: f64, saturated: bool },
}

impl<Fluid> ThermoModel for TwoPhase<Fluid> {
    type Fluid = Fluid;
}

impl<Fluid: TwoPhaseFluid> TwoPhase<Fluid> {
    /// Creates a model using the constants defined by `Fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`TwoPhaseParametersError`] if any dimensional constant is not
    /// strictly positive.
    pub fn new() -> Result<Self, TwoPhaseParametersError> {
        let p = Fluid::parameters();

        let positive = |name: &'static str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(value)
            } else {
                Err(TwoPhaseParametersError::NotPositive { name, value })
            }
        };

        Ok(Self {
            r: positive("gas_constant", p.gas_constant.value)?,
            c: positive(
                "specific_heat",
                p.specific_heat.get::<joule_per_kilogram_kelvin>(),
            )?,
            h_fg: positive("latent_heat", p.latent_heat.get::<joule_per_kilogram>())?,
            rho_f: positive(
                "liquid_density",
                p.liquid_density.get::<kilogram_per_cubic_meter>(),
            )?,
            bulk: positive("liquid_bulk_modulus", p.liquid_bulk_modulus.get::<pascal>())?,
            t0: positive("reference.temperature", p.reference.temperature.get::<kelvin>())?,
            p0: positive("reference.pressure", p.reference.pressure.get::<pascal>())?,
            h0: p.reference.enthalpy.get::<joule_per_kilogram>(),
            s0: p.reference.entropy.value,
            _marker: PhantomData,
        })
    }
}

impl<Fluid> TwoPhase<Fluid> {
    /// Saturation pressure at the given temperature.
    #[must_use]
    pub fn saturation_pressure(&self, temperature: ThermodynamicTemperature) -> Pressure {
        Pressure::new::<pascal>(self.p_sat(temperature.get::<kelvin>()))
    }

    /// Saturation temperature at the given pressure.
    #[must_use]
    pub fn saturation_temperature(&self, pressure: Pressure) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.t_sat(pressure.get::<pascal>()))
    }

    fn p_sat(&self, t: f64) -> f64 {
        self.p0 * (-(self.h_fg / self.r) * (1.0 / t - 1.0 / self.t0)).exp()
    }

    fn t_sat(&self, p: f64) -> f64 {
        1.0 / (1.0 / self.t0 - (self.r / self.h_fg) * (p / self.p0).ln())
    }

    fn h_f(&self, t: f64) -> f64 {
        self.h0 + self.c * (t - self.t0)
    }

    fn s_f(&self, t: f64) -> f64 {
        self.s0 + self.c * (t / self.t0).ln()
    }

    fn vapor_entropy(&self, t: f64, p: f64) -> f64 {
        self.s0 + self.h_fg / self.t0 + self.c * (t / self.t0).ln() - self.r * (p / self.p0).ln()
    }

    fn vapor_density(&self, t: f64, p: f64) -> f64 {
        p / (self.r * t)
    }

    fn liquid_density(&self, t: f64, p: f64) -> f64 {
        let compression = (p - self.p_sat(t)).max(0.0);
        self.rho_f * (1.0 + compression / self.bulk)
    }

    fn mixture_density(&self, t: f64, x: f64) -> f64 {
        let v_g = 1.0 / self.vapor_density(t, self.p_sat(t));
        let v_f = 1.0 / self.rho_f;
        1.0 / (v_f + x * (v_g - v_f))
    }

    fn phase(&self, state: &State<Fluid>) -> Result<Phase, PropertyError> {
        let t = positive("temperature", state.temperature.get::<kelvin>())?;
        let rho = positive("density", state.density.get::<kilogram_per_cubic_meter>())?;

        let p_sat = self.p_sat(t);
        let rho_g = self.vapor_density(t, p_sat);

        if rho <= rho_g * (1.0 + SATURATION_TOL) {
            return Ok(Phase::Vapor {
                pressure: rho * self.r * t,
                saturated: rho >= rho_g * (1.0 - SATURATION_TOL),
            });
        }

        if rho >= self.rho_f * (1.0 - SATURATION_TOL) {
            let compression = (rho / self.rho_f - 1.0).max(0.0);
            return Ok(Phase::Liquid {
                pressure: p_sat + self.bulk * compression,
                saturated: compression <= SATURATION_TOL,
            });
        }

        let v_f = 1.0 / self.rho_f;
        let v_g = 1.0 / rho_g;
        let quality = ((1.0 / rho - v_f) / (v_g - v_f)).clamp(0.0, 1.0);
        Ok(Phase::Mixture { quality })
    }

    fn state(&self, t: f64, rho: f64, fluid: Fluid) -> State<Fluid> {
        State::new(
            ThermodynamicTemperature::new::<kelvin>(t),
            MassDensity::new::<kilogram_per_cubic_meter>(rho),
            fluid,
        )
    }
}

fn positive(name: &str, value: f64) -> Result<f64, PropertyError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(PropertyError::OutOfDomain {
            context: format!("{name} must be positive and finite, got {value}"),
        })
    }
}

impl<Fluid> HasPressure for TwoPhase<Fluid> {
    fn pressure(&self, state: &State<Fluid>) -> Result<Pressure, PropertyError> {
        let p = match self.phase(state)? {
            Phase::Liquid { pressure, .. } | Phase::Vapor { pressure, .. } => pressure,
            Phase::Mixture { .. } => self.p_sat(state.temperature.get::<kelvin>()),
        };
        Ok(Pressure::new::<pascal>(p))
    }
}

impl<Fluid> HasEnthalpy for TwoPhase<Fluid> {
    fn enthalpy(&self, state: &State<Fluid>) -> Result<SpecificEnthalpy, PropertyError> {
        let t = state.temperature.get::<kelvin>();
        let h = match self.phase(state)? {
            Phase::Liquid { .. } => self.h_f(t),
            Phase::Mixture { quality } => self.h_f(t) + quality * self.h_fg,
            Phase::Vapor { .. } => self.h_f(t) + self.h_fg,
        };
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }
}

impl<Fluid> HasEntropy for TwoPhase<Fluid> {
    fn entropy(&self, state: &State<Fluid>) -> Result<SpecificEntropy, PropertyError> {
        let t = state.temperature.get::<kelvin>();
        let s = match self.phase(state)? {
            Phase::Liquid { .. } => self.s_f(t),
            Phase::Mixture { quality } => self.s_f(t) + quality * self.h_fg / t,
            Phase::Vapor { pressure, .. } => self.vapor_entropy(t, pressure),
        };
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(s))
    }
}

impl<Fluid> HasCp for TwoPhase<Fluid> {
    fn cp(&self, state: &State<Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        match self.phase(state)? {
            Phase::Mixture { quality } => Err(PropertyError::Undefined {
                context: format!("cp inside the vapor dome (x={quality})"),
            }),
            Phase::Liquid { .. } | Phase::Vapor { .. } => {
                Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.c))
            }
        }
    }
}

impl<Fluid> HasQuality for TwoPhase<Fluid> {
    fn quality(&self, state: &State<Fluid>) -> Result<VaporQuality, PropertyError> {
        let x = match self.phase(state)? {
            Phase::Mixture { quality } => quality,
            Phase::Liquid {
                saturated: true, ..
            } => 0.0,
            Phase::Vapor {
                saturated: true, ..
            } => 1.0,
            Phase::Liquid { .. } => {
                return Err(PropertyError::Undefined {
                    context: "quality of a subcooled liquid".into(),
                });
            }
            Phase::Vapor { .. } => {
                return Err(PropertyError::Undefined {
                    context: "quality of a superheated vapor".into(),
                });
            }
        };
        VaporQuality::new(x).map_err(|err| PropertyError::Calculation {
            context: format!("quality {x}: {err}"),
        })
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, Pressure)> for TwoPhase<Fluid> {
    type Error = PropertyError;

    /// Pressures at or above saturation resolve to liquid.
    fn state_from(
        &self,
        (fluid, temperature, pressure): (Fluid, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Fluid>, Self::Error> {
        let t = positive("temperature", temperature.get::<kelvin>())?;
        let p = positive("pressure", pressure.get::<pascal>())?;

        let rho = if p < self.p_sat(t) {
            self.vapor_density(t, p)
        } else {
            self.liquid_density(t, p)
        };
        Ok(self.state(t, rho, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, SpecificEnthalpy)> for TwoPhase<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (Fluid, Pressure, SpecificEnthalpy),
    ) -> Result<State<Fluid>, Self::Error> {
        let p = positive("pressure", pressure.get::<pascal>())?;
        let h = enthalpy.get::<joule_per_kilogram>();

        let t_s = self.t_sat(p);
        let h_f = self.h_f(t_s);

        let (t, rho) = if h <= h_f {
            let t = positive("temperature", self.t0 + (h - self.h0) / self.c)?;
            (t, self.liquid_density(t, p))
        } else if h >= h_f + self.h_fg {
            let t = self.t0 + (h - self.h0 - self.h_fg) / self.c;
            (t, self.vapor_density(t, p))
        } else {
            let x = (h - h_f) / self.h_fg;
            (t_s, self.mixture_density(t_s, x))
        };
        Ok(self.state(t, rho, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, SpecificEntropy)> for TwoPhase<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, entropy): (Fluid, Pressure, SpecificEntropy),
    ) -> Result<State<Fluid>, Self::Error> {
        let p = positive("pressure", pressure.get::<pascal>())?;
        let s = entropy.value;

        let t_s = self.t_sat(p);
        let s_f = self.s_f(t_s);
        let s_fg = self.h_fg / t_s;

        let (t, rho) = if s <= s_f {
            let t = self.t0 * ((s - self.s0) / self.c).exp();
            (t, self.liquid_density(t, p))
        } else if s >= s_f + s_fg {
            let exponent =
                (s - self.s0 - self.h_fg / self.t0 + self.r * (p / self.p0).ln()) / self.c;
            let t = self.t0 * exponent.exp();
            (t, self.vapor_density(t, p))
        } else {
            let x = (s - s_f) / s_fg;
            (t_s, self.mixture_density(t_s, x))
        };
        Ok(self.state(t, rho, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, MassDensity)> for TwoPhase<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, density): (Fluid, Pressure, MassDensity),
    ) -> Result<State<Fluid>, Self::Error> {
        let p = positive("pressure", pressure.get::<pascal>())?;
        let rho = positive("density", density.get::<kilogram_per_cubic_meter>())?;

        let t_s = self.t_sat(p);
        let t = if rho <= self.vapor_density(t_s, p) {
            p / (rho * self.r)
        } else if rho < self.rho_f {
            t_s
        } else {
            let p_sat = p - self.bulk * (rho / self.rho_f - 1.0);
            self.t_sat(positive("liquid saturation pressure", p_sat)?)
        };
        Ok(self.state(t, rho, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, VaporQuality)> for TwoPhase<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, quality): (Fluid, ThermodynamicTemperature, VaporQuality),
    ) -> Result<State<Fluid>, Self::Error> {
        let t = positive("temperature", temperature.get::<kelvin>())?;
        let rho = self.mixture_density(t, quality.get::<ratio>());
        Ok(self.state(t, rho, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, VaporQuality)> for TwoPhase<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, quality): (Fluid, Pressure, VaporQuality),
    ) -> Result<State<Fluid>, Self::Error> {
        let p = positive("pressure", pressure.get::<pascal>())?;
        let t = self.t_sat(p);
        let rho = self.mixture_density(t, quality.get::<ratio>());
        Ok(self.state(t, rho, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, MassDensity)> for TwoPhase<Fluid> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, density): (Fluid, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<Fluid>, Self::Error> {
        positive("temperature", temperature.get::<kelvin>())?;
        positive("density", density.get::<kilogram_per_cubic_meter>())?;
        Ok(State::new(temperature, density, fluid))
    }
}
