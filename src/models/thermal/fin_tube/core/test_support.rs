use std::convert::Infallible;

use uom::si::{
    f64::{
        HeatTransfer, Length, MassRate, Pressure, Ratio, ThermalConductivity,
        ThermodynamicTemperature,
    },
    heat_transfer::watt_per_square_meter_kelvin,
    length::{meter, millimeter},
    mass_rate::kilogram_per_second,
    pressure::{bar, pascal},
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::thermo::{
    State, VaporQuality,
    capability::StateFrom,
    fluid::{MoistAir, RelativeHumidity, test_refrigerant::TestRefrigerant},
    model::{IdealMoistAir, TwoPhase},
};

use super::{
    ConstantCoefficient, Correlation, FinTubeDimensions, FinTubeGeometry, FlowConditions, Inlets,
};

pub(crate) type TestCoil =
    super::Coil<TwoPhase<TestRefrigerant>, IdealMoistAir, ConstantCoefficient, ConstantCoefficient>;

pub(crate) type DevelopingFlowCoil =
    super::Coil<TwoPhase<TestRefrigerant>, IdealMoistAir, ConstantCoefficient, DevelopingFlow>;

pub(crate) const ATMOSPHERIC: f64 = 101_325.0;

/// Five-row, four-circuit residential condenser slab.
pub(crate) fn condenser_dimensions() -> FinTubeDimensions {
    FinTubeDimensions {
        tube_length: Length::new::<meter>(1.003),
        height: Length::new::<meter>(0.334),
        rows: 5,
        transverse_pitch: Length::new::<millimeter>(25.4),
        longitudinal_pitch: Length::new::<millimeter>(22.0),
        inner_diameter: Length::new::<millimeter>(8.422),
        outer_diameter: Length::new::<millimeter>(10.2),
        fin_thickness: Length::new::<millimeter>(0.3302),
        fin_pitch: Length::new::<millimeter>(3.175),
        fin_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(237.0),
        circuits: 4,
    }
}

pub(crate) fn constant(coefficient: f64, friction_factor: f64) -> ConstantCoefficient {
    ConstantCoefficient {
        coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(coefficient),
        friction_factor: Ratio::new::<ratio>(friction_factor),
    }
}

/// Entrance-region coefficient `h = h_∞·(1 + L_e/L)`.
///
/// Short regions see a higher coefficient, so the area a region needs
/// depends on its own flow length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DevelopingFlow {
    pub(crate) developed: ConstantCoefficient,
    pub(crate) entrance_length: Length,
}

impl DevelopingFlow {
    pub(crate) fn coefficient_at(&self, flow_length: Length) -> HeatTransfer {
        let length = flow_length.get::<meter>().max(1e-6);
        self.developed.coefficient * (1.0 + self.entrance_length.get::<meter>() / length)
    }
}

impl<Fluid> Correlation<Fluid> for DevelopingFlow {
    type Error = Infallible;

    fn convective_coefficient(
        &self,
        _geometry: &FinTubeGeometry,
        flow: &FlowConditions<'_, Fluid>,
    ) -> Result<HeatTransfer, Self::Error> {
        Ok(self.coefficient_at(flow.flow_length))
    }

    fn pressure_drop(
        &self,
        geometry: &FinTubeGeometry,
        flow: &FlowConditions<'_, Fluid>,
        inlet: &State<Fluid>,
        outlet: &State<Fluid>,
    ) -> Result<Pressure, Self::Error> {
        self.developed.pressure_drop(geometry, flow, inlet, outlet)
    }
}

pub(crate) fn refrigerant_model() -> TwoPhase<TestRefrigerant> {
    TwoPhase::new().expect("test refrigerant parameters are valid")
}

/// The condenser slab with constant coefficients on both sides.
pub(crate) fn constant_coil(air_coefficient: f64) -> TestCoil {
    TestCoil::new(
        FinTubeGeometry::new(condenser_dimensions()).expect("valid geometry"),
        refrigerant_model(),
        IdealMoistAir,
        constant(3000.0, 0.005),
        constant(air_coefficient, 0.02),
    )
}

pub(crate) fn condenser_coil() -> TestCoil {
    constant_coil(80.0)
}

pub(crate) fn evaporator_coil() -> TestCoil {
    constant_coil(60.0)
}

/// Air side of [`developing_flow_coil`], rising above 80 W/(m²·K) below a
/// 10 mm flow length.
pub(crate) fn developing_flow() -> DevelopingFlow {
    DevelopingFlow {
        developed: constant(80.0, 0.02),
        entrance_length: Length::new::<millimeter>(10.0),
    }
}

pub(crate) fn developing_flow_coil() -> DevelopingFlowCoil {
    DevelopingFlowCoil::new(
        FinTubeGeometry::new(condenser_dimensions()).expect("valid geometry"),
        refrigerant_model(),
        IdealMoistAir,
        constant(3000.0, 0.005),
        developing_flow(),
    )
}

/// Atmospheric air at `t_c` °C and relative humidity `rh`.
pub(crate) fn air(t_c: f64, rh: f64) -> State<MoistAir> {
    IdealMoistAir
        .state_from((
            Pressure::new::<pascal>(ATMOSPHERIC),
            ThermodynamicTemperature::new::<degree_celsius>(t_c),
            RelativeHumidity::new(rh).expect("valid relative humidity"),
        ))
        .expect("valid air state")
}

/// Refrigerant at `t_c` °C and `p_bar`, vapor below saturation pressure.
pub(crate) fn refrigerant(t_c: f64, p_bar: f64) -> State<TestRefrigerant> {
    refrigerant_model()
        .state_from((
            TestRefrigerant,
            ThermodynamicTemperature::new::<degree_celsius>(t_c),
            Pressure::new::<bar>(p_bar),
        ))
        .expect("valid refrigerant state")
}

/// Two-phase refrigerant saturated at `t_c` °C with quality `x`.
pub(crate) fn two_phase(t_c: f64, x: f64) -> State<TestRefrigerant> {
    refrigerant_model()
        .state_from((
            TestRefrigerant,
            ThermodynamicTemperature::new::<degree_celsius>(t_c),
            VaporQuality::new(x).expect("valid quality"),
        ))
        .expect("valid refrigerant state")
}

pub(crate) fn inlets(
    refrigerant: State<TestRefrigerant>,
    refrigerant_kg_s: f64,
    air: State<MoistAir>,
    air_kg_s: f64,
) -> Inlets<TestRefrigerant> {
    Inlets {
        refrigerant,
        refrigerant_mass_rate: MassRate::new::<kilogram_per_second>(refrigerant_kg_s),
        air,
        air_mass_rate: MassRate::new::<kilogram_per_second>(air_kg_s),
    }
}
