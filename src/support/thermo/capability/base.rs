/// Root trait for every thermodynamic model.
///
/// The associated `Fluid` is the type carried in [`State<Fluid>`] for
/// this model.
///
/// [`State<Fluid>`]: crate::support::thermo::State
pub trait ThermoModel {
    type Fluid;
}
