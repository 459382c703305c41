use uom::si::f64::{MassRate, Power, Ratio};

use crate::support::{thermo::State, units::SpecificEnthalpy};

/// A compressor rated at one operating point.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorOutput<Fluid> {
    /// Exponent used for the compression, fixed or matched.
    pub polytropic_exponent: f64,

    pub volumetric_efficiency: Ratio,
    pub mass_rate: MassRate,
    pub suction: State<Fluid>,

    /// End of the polytropic compression.
    pub discharge: State<Fluid>,

    /// End of an isentropic compression to the same pressure.
    pub isentropic_discharge: State<Fluid>,

    /// Polytropic enthalpy rise of the gas.
    pub gas_work: SpecificEnthalpy,

    pub shaft_power: Power,
    pub electrical_power: Power,

    /// Isentropic gas power over the power delivered to the gas.
    pub isentropic_efficiency: Ratio,
}

impl<Fluid> CompressorOutput<Fluid> {
    /// Cooling COP for the given refrigerating capacity.
    pub fn cooling_cop(&self, cooling: Power) -> Ratio {
        cooling / self.electrical_power
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram,
        f64::{MassDensity, ThermodynamicTemperature},
        mass_density::kilogram_per_cubic_meter,
        mass_rate::kilogram_per_second,
        power::{kilowatt, watt},
        ratio::ratio,
        thermodynamic_temperature::degree_celsius,
    };

    #[test]
    fn cop_divides_capacity_by_electrical_power() {
        let state = State::new(
            ThermodynamicTemperature::new::<degree_celsius>(15.0),
            MassDensity::new::<kilogram_per_cubic_meter>(15.0),
            (),
        );
        let output = CompressorOutput {
            polytropic_exponent: 1.2,
            volumetric_efficiency: Ratio::new::<ratio>(0.94),
            mass_rate: MassRate::new::<kilogram_per_second>(0.02),
            suction: state,
            discharge: state,
            isentropic_discharge: state,
            gas_work: SpecificEnthalpy::new::<joule_per_kilogram>(50_000.0),
            shaft_power: Power::new::<watt>(1000.0),
            electrical_power: Power::new::<watt>(1250.0),
            isentropic_efficiency: Ratio::new::<ratio>(0.8),
        };

        assert_relative_eq!(
            output.cooling_cop(Power::new::<kilowatt>(3.5)).get::<ratio>(),
            2.8,
            epsilon = 1e-12
        );
    }
}
