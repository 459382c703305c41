use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P2, P3, Z0},
};

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific entropy, J/kg·K in SI.
pub type SpecificEntropy = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Mass flux (mass flow rate per unit flow area), kg/m²·s in SI.
///
/// Obtained by dividing a `MassRate` by an `Area`.
pub type MassFlux = Quantity<ISQ<N2, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Thermal insulance (area-specific thermal resistance, "R-value"), m²·K/W in SI.
///
/// Obtained by dividing a `Length` by a `ThermalConductivity`, or as the
/// reciprocal of a `HeatTransfer` coefficient.
pub type ThermalInsulance = Quantity<ISQ<Z0, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;
