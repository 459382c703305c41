//! Mean stream states across a coil region.
//!
//! The means feed property-dependent correlations. They are representative
//! bulk values, not true profile averages.
//!
//! When the two capacitance rates are comparable (`C_r ≥ 0.5`) both streams
//! use their arithmetic mean temperature. Otherwise the stream with the larger
//! capacitance rate (smaller temperature swing) uses its arithmetic mean and
//! the other stream is placed one log-mean temperature difference away from it.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{ThermalConductance, ThermodynamicTemperature},
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::SpecificEnthalpy;

/// Terminal differences are floored at this value, in SI units, before the
/// logarithm is taken.
pub const TERMINAL_DIFFERENCE_FLOOR: f64 = 1e-12;

/// Capacity ratio at or above which arithmetic means are used.
pub const BALANCED_CAPACITY_RATIO: f64 = 0.5;

/// Log-mean of two terminal differences.
///
/// Both differences are floored at [`TERMINAL_DIFFERENCE_FLOOR`]. Equal
/// differences return their common value.
#[must_use]
pub fn log_mean(a: f64, b: f64) -> f64 {
    let a = a.max(TERMINAL_DIFFERENCE_FLOOR);
    let b = b.max(TERMINAL_DIFFERENCE_FLOOR);
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };

    if hi / lo - 1.0 < 1e-6 {
        return 0.5 * (hi + lo);
    }
    (hi - lo) / (hi / lo).ln()
}

/// Which stream gives up heat in the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotStream {
    Refrigerant,
    Air,
}

impl HotStream {
    /// Sign of `T_refrigerant − T_air` for a physical region.
    pub(crate) fn sign(self) -> f64 {
        match self {
            Self::Refrigerant => 1.0,
            Self::Air => -1.0,
        }
    }
}

/// Inlet and outlet temperatures of one stream with its capacitance rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamEnds {
    pub inlet: ThermodynamicTemperature,
    pub outlet: ThermodynamicTemperature,
    /// `ṁ·c_p`; infinite for a phase-changing stream.
    pub capacitance_rate: ThermalConductance,
}

impl StreamEnds {
    fn mean(&self) -> f64 {
        0.5 * (self.inlet.get::<kelvin>() + self.outlet.get::<kelvin>())
    }
}

/// How the mean temperatures were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeanMethod {
    /// Both streams at their arithmetic means.
    Arithmetic,
    /// Refrigerant at its arithmetic mean, air one LMTD away.
    LogMeanFromRefrigerant,
    /// Air at its arithmetic mean, refrigerant one LMTD away.
    LogMeanFromAir,
}

/// Mean temperatures of both streams across a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanTemperatures {
    pub refrigerant: ThermodynamicTemperature,
    pub air: ThermodynamicTemperature,
    pub method: MeanMethod,
}

/// Estimates the mean temperatures of both streams.
#[must_use]
pub fn mean_temperatures(
    refrigerant: &StreamEnds,
    air: &StreamEnds,
    hot: HotStream,
) -> MeanTemperatures {
    let c_rfg = refrigerant.capacitance_rate.get::<watt_per_kelvin>();
    let c_air = air.capacitance_rate.get::<watt_per_kelvin>();
    let capacity_ratio = c_rfg.min(c_air) / c_rfg.max(c_air);
    let sign = hot.sign();

    let (t_rfg, t_air, method) = if !(capacity_ratio < BALANCED_CAPACITY_RATIO) {
        (refrigerant.mean(), air.mean(), MeanMethod::Arithmetic)
    } else if c_rfg >= c_air {
        let t_rfg = refrigerant.mean();
        let lmtd = log_mean(
            sign * (t_rfg - air.inlet.get::<kelvin>()),
            sign * (t_rfg - air.outlet.get::<kelvin>()),
        );
        (t_rfg, t_rfg - sign * lmtd, MeanMethod::LogMeanFromRefrigerant)
    } else {
        let t_air = air.mean();
        let lmtd = log_mean(
            sign * (refrigerant.inlet.get::<kelvin>() - t_air),
            sign * (refrigerant.outlet.get::<kelvin>() - t_air),
        );
        (t_air + sign * lmtd, t_air, MeanMethod::LogMeanFromAir)
    };

    MeanTemperatures {
        refrigerant: ThermodynamicTemperature::new::<kelvin>(t_rfg),
        air: ThermodynamicTemperature::new::<kelvin>(t_air),
        method,
    }
}

/// Mean air condition over a wet boiling region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetAirMean {
    pub temperature: ThermodynamicTemperature,
    pub enthalpy: SpecificEnthalpy,
}

/// Air end states and the saturated-air enthalpies at the refrigerant ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetRegionEnds {
    pub air_inlet: (ThermodynamicTemperature, SpecificEnthalpy),
    pub air_outlet: (ThermodynamicTemperature, SpecificEnthalpy),
    pub refrigerant_inlet: ThermodynamicTemperature,
    pub refrigerant_outlet: ThermodynamicTemperature,
    /// Saturated air enthalpy at the refrigerant inlet temperature.
    pub saturated_at_refrigerant_inlet: SpecificEnthalpy,
    /// Saturated air enthalpy at the refrigerant outlet temperature.
    pub saturated_at_refrigerant_outlet: SpecificEnthalpy,
}

/// Mean air state over a boiling region with a wet surface.
///
/// The enthalpy sits one log-mean enthalpy difference (LMED) above the mean
/// saturated-air enthalpy at the refrigerant temperature, and the temperature
/// one LMTD above the mean refrigerant temperature. Air enters where the
/// refrigerant leaves.
#[must_use]
pub fn wet_air_mean(ends: &WetRegionEnds) -> WetAirMean {
    let h = |value: SpecificEnthalpy| value.get::<joule_per_kilogram>();
    let t = |value: ThermodynamicTemperature| value.get::<kelvin>();

    let lmed = log_mean(
        h(ends.air_inlet.1) - h(ends.saturated_at_refrigerant_outlet),
        h(ends.air_outlet.1) - h(ends.saturated_at_refrigerant_inlet),
    );
    let h_saturated =
        0.5 * (h(ends.saturated_at_refrigerant_inlet) + h(ends.saturated_at_refrigerant_outlet));

    let lmtd = log_mean(
        t(ends.air_inlet.0) - t(ends.refrigerant_outlet),
        t(ends.air_outlet.0) - t(ends.refrigerant_inlet),
    );
    let t_refrigerant = 0.5 * (t(ends.refrigerant_inlet) + t(ends.refrigerant_outlet));

    WetAirMean {
        temperature: ThermodynamicTemperature::new::<kelvin>(t_refrigerant + lmtd),
        enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(h_saturated + lmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::thermodynamic_temperature::degree_celsius;

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn ends(inlet: f64, outlet: f64, rate: f64) -> StreamEnds {
        StreamEnds {
            inlet: celsius(inlet),
            outlet: celsius(outlet),
            capacitance_rate: ThermalConductance::new::<watt_per_kelvin>(rate),
        }
    }

    #[test]
    fn log_mean_of_known_pair() {
        assert_relative_eq!(log_mean(20.0, 10.0), 10.0 / 2.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(log_mean(10.0, 20.0), 10.0 / 2.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(log_mean(7.0, 7.0), 7.0);
    }

    #[test]
    fn zero_terminal_difference_is_clamped() {
        let lm = log_mean(0.0, 15.0);
        assert!(lm.is_finite() && lm > 0.0);

        let lm = log_mean(-3.0, 15.0);
        assert!(lm.is_finite() && lm > 0.0);

        assert_relative_eq!(log_mean(0.0, 0.0), TERMINAL_DIFFERENCE_FLOOR);
    }

    #[test]
    fn balanced_streams_use_arithmetic_means() {
        // Exactly at the branch boundary.
        let rfg = ends(80.0, 60.0, 500.0);
        let air = ends(35.0, 45.0, 1000.0);
        let means = mean_temperatures(&rfg, &air, HotStream::Refrigerant);

        assert_eq!(means.method, MeanMethod::Arithmetic);
        assert_relative_eq!(means.refrigerant.get::<degree_celsius>(), 70.0, epsilon = 1e-9);
        assert_relative_eq!(means.air.get::<degree_celsius>(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn condensing_refrigerant_anchors_the_air_mean() {
        let rfg = StreamEnds {
            inlet: celsius(50.0),
            outlet: celsius(50.0),
            capacitance_rate: ThermalConductance::new::<watt_per_kelvin>(f64::INFINITY),
        };
        let air = ends(35.0, 45.0, 1000.0);
        let means = mean_temperatures(&rfg, &air, HotStream::Refrigerant);

        assert_eq!(means.method, MeanMethod::LogMeanFromRefrigerant);
        let lmtd = 10.0 / 3.0_f64.ln();
        assert_relative_eq!(means.air.get::<degree_celsius>(), 50.0 - lmtd, epsilon = 1e-9);
    }

    #[test]
    fn desuperheating_refrigerant_is_placed_above_the_air() {
        let rfg = ends(81.7, 50.0, 28.0);
        let air = ends(35.0, 35.8, 1100.0);
        let means = mean_temperatures(&rfg, &air, HotStream::Refrigerant);

        assert_eq!(means.method, MeanMethod::LogMeanFromAir);
        let t_air = 35.4;
        let lmtd = log_mean(81.7 - t_air, 50.0 - t_air);
        assert_relative_eq!(
            means.refrigerant.get::<degree_celsius>(),
            t_air + lmtd,
            epsilon = 1e-9
        );
    }

    #[test]
    fn superheating_refrigerant_is_placed_below_the_air() {
        let rfg = ends(5.0, 15.0, 23.0);
        let air = ends(24.0, 23.5, 425.0);
        let means = mean_temperatures(&rfg, &air, HotStream::Air);

        let t_rfg = means.refrigerant.get::<degree_celsius>();
        assert!(t_rfg > 5.0 && t_rfg < 15.0);
    }

    #[test]
    fn wet_mean_sits_above_the_saturation_line() {
        use uom::si::available_energy::kilojoule_per_kilogram;

        let kj = SpecificEnthalpy::new::<kilojoule_per_kilogram>;
        let mean = wet_air_mean(&WetRegionEnds {
            air_inlet: (celsius(24.0), kj(48.0)),
            air_outlet: (celsius(8.0), kj(22.0)),
            refrigerant_inlet: celsius(5.0),
            refrigerant_outlet: celsius(5.0),
            saturated_at_refrigerant_inlet: kj(18.6),
            saturated_at_refrigerant_outlet: kj(18.6),
        });

        let lmed = log_mean(29_400.0, 3_400.0);
        assert_relative_eq!(
            mean.enthalpy.get::<joule_per_kilogram>(),
            18_600.0 + lmed,
            epsilon = 1e-6
        );
        assert!(mean.temperature > celsius(8.0) && mean.temperature < celsius(24.0));
    }

    proptest! {
        #[test]
        fn log_mean_lies_between_geometric_and_arithmetic(a in 1e-3_f64..1e3, b in 1e-3_f64..1e3) {
            let lm = log_mean(a, b);
            let geometric = (a * b).sqrt();
            let arithmetic = 0.5 * (a + b);
            prop_assert!(lm >= geometric * (1.0 - 1e-9));
            prop_assert!(lm <= arithmetic * (1.0 + 1e-9));
        }

        #[test]
        fn capacity_ratio_never_breaks_the_estimate(
            c_air in 1.0_f64..5000.0,
            c_rfg in 1.0_f64..5000.0,
        ) {
            let rfg = ends(70.0, 50.0, c_rfg);
            let air = ends(35.0, 45.0, c_air);
            let means = mean_temperatures(&rfg, &air, HotStream::Refrigerant);
            prop_assert!(means.refrigerant.get::<kelvin>().is_finite());
            prop_assert!(means.air.get::<kelvin>().is_finite());
            prop_assert!(means.refrigerant > means.air);
        }
    }
}
