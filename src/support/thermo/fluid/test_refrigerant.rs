use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    thermo::model::{TwoPhaseFluid, TwoPhaseParameters, TwoPhaseReference},
    units::{SpecificEnthalpy, SpecificEntropy, SpecificGasConstant},
};

/// A dry refrigerant loosely shaped like R134a.
///
/// Saturates near 3.5 bar at 5 °C and near 13.2 bar at 50 °C, and its
/// isentropic compression from saturated vapor stays superheated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TestRefrigerant;

impl TwoPhaseFluid for TestRefrigerant {
    fn parameters() -> TwoPhaseParameters {
        TwoPhaseParameters {
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(81.49),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(600.0),
            latent_heat: SpecificEnthalpy::new::<joule_per_kilogram>(216_400.0),
            liquid_density: MassDensity::new::<kilogram_per_cubic_meter>(1200.0),
            liquid_bulk_modulus: Pressure::new::<pascal>(1e9),
            reference: TwoPhaseReference {
                temperature: ThermodynamicTemperature::new::<kelvin>(273.15),
                pressure: Pressure::new::<pascal>(292_800.0),
                enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(200_000.0),
                entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(1000.0),
            },
        }
    }
}
