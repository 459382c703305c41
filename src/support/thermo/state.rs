use uom::si::f64::{MassDensity, ThermodynamicTemperature};

/// The thermodynamic state of a fluid.
///
/// Temperature and density fix the state of a pure substance. Anything else
/// the state depends on (such as the humidity ratio of moist air) is carried
/// by the `Fluid` value.
///
/// States are plain values: models never mutate them, they construct new ones.
///
/// # Example
///
/// ```
/// use hvac_models::support::thermo::{State, fluid::{HumidityRatio, MoistAir}};
/// use uom::si::{
///     f64::{MassDensity, ThermodynamicTemperature},
///     mass_density::kilogram_per_cubic_meter,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let outdoor = State::new(
///     ThermodynamicTemperature::new::<degree_celsius>(35.0),
///     MassDensity::new::<kilogram_per_cubic_meter>(1.14),
///     MoistAir::new(HumidityRatio::new(0.0106).unwrap()),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State<Fluid> {
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub fluid: Fluid,
}

impl<Fluid> State<Fluid> {
    /// Creates a new state with the given temperature, density, and fluid.
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, density: MassDensity, fluid: Fluid) -> Self {
        Self {
            temperature,
            density,
            fluid,
        }
    }
}
