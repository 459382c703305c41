//! Fan curves and the unified control signal policy.
//!
//! A fan is driven either by a requested volume flow or by a control signal
//! in `[0, 1]`. Signals outside that range are clamped with a warning in both
//! directions: when the signal is given, and when a requested flow needs a
//! signal above one. Every other bound is a hard error raised before any
//! power or speed is computed:
//!
//! - flow below [`MIN_FLOW_FRACTION`] of the nominal flow,
//! - a negative pressure difference, or one above the rated maximum.

mod error;

use tracing::warn;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Power, Pressure, Ratio, VolumeRate},
    power::watt,
    pressure::pascal,
    ratio::ratio,
    volume_rate::cubic_meter_per_second,
};

pub use error::FanError;

/// Smallest fraction of the nominal flow a fan can deliver.
pub const MIN_FLOW_FRACTION: f64 = 0.1;

/// How flow, speed, and power depend on the operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FanCurve {
    /// Datasheet nominal-point scaling.
    ///
    /// Speed and electrical power scale linearly with the flow ratio
    /// `V/V_n`, and the air power `V·Δp/η` is added on top. The control
    /// signal is the flow ratio.
    Linear {
        nominal_flow: VolumeRate,
        nominal_speed: AngularVelocity,
        nominal_power: Power,

        /// Converts air power to electrical power.
        efficiency: Ratio,
    },

    /// Signal-driven square-root law.
    ///
    /// `V = V_max·√s·(1 − (Δp/Δp_max)²)`, `P = P_max·s`, and the speed
    /// follows the flow at zero pressure difference: `N = N_max·√s`.
    Quadratic {
        max_flow: VolumeRate,
        max_speed: AngularVelocity,
        max_power: Power,
    },
}

/// A fan with its curve and rated maximum pressure difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fan {
    curve: FanCurve,
    max_pressure_difference: Pressure,
}

/// A fan at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanOperation {
    /// Control signal after clamping.
    pub signal: Ratio,

    pub flow: VolumeRate,
    pub speed: AngularVelocity,

    /// Electrical power drawn.
    pub power: Power,

    pub pressure_difference: Pressure,

    /// Whether the signal had to be clamped into `[0, 1]`.
    pub clamped: bool,
}

impl Fan {
    /// Creates a fan.
    ///
    /// # Errors
    ///
    /// Returns [`FanError::OutOfRange`] if a nominal value or the maximum
    /// pressure difference is not positive, or the efficiency is outside
    /// `(0, 1]`.
    pub fn new(curve: FanCurve, max_pressure_difference: Pressure) -> Result<Self, FanError> {
        let (flow, speed, power) = match curve {
            FanCurve::Linear {
                nominal_flow,
                nominal_speed,
                nominal_power,
                efficiency,
            } => {
                let eta = efficiency.get::<ratio>();
                if !(eta > 0.0 && eta <= 1.0) {
                    return Err(FanError::out_of_range(
                        "fan efficiency",
                        format!("must lie in (0, 1], got {eta}"),
                    ));
                }
                (nominal_flow, nominal_speed, nominal_power)
            }
            FanCurve::Quadratic {
                max_flow,
                max_speed,
                max_power,
            } => (max_flow, max_speed, max_power),
        };

        for (quantity, value) in [
            ("nominal flow", flow.get::<cubic_meter_per_second>()),
            ("nominal speed", speed.get::<radian_per_second>()),
            ("nominal power", power.get::<watt>()),
            (
                "maximum pressure difference",
                max_pressure_difference.get::<pascal>(),
            ),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(FanError::out_of_range(
                    quantity,
                    format!("must be positive, got {value} (SI)"),
                ));
            }
        }

        Ok(Self {
            curve,
            max_pressure_difference,
        })
    }

    pub fn curve(&self) -> &FanCurve {
        &self.curve
    }

    pub fn max_pressure_difference(&self) -> Pressure {
        self.max_pressure_difference
    }

    /// Flow at full signal and zero pressure difference.
    pub fn nominal_flow(&self) -> VolumeRate {
        match self.curve {
            FanCurve::Linear { nominal_flow, .. } => nominal_flow,
            FanCurve::Quadratic { max_flow, .. } => max_flow,
        }
    }

    /// Operates the fan at a control signal.
    ///
    /// # Errors
    ///
    /// Returns [`FanError::OutOfRange`] for an invalid pressure difference or
    /// if the resulting flow is below the minimum.
    pub fn at_signal(
        &self,
        signal: Ratio,
        pressure_difference: Pressure,
    ) -> Result<FanOperation, FanError> {
        let dp = self.pressure_difference(pressure_difference)?;
        let (signal, clamped) = clamp_signal(signal.get::<ratio>());

        let flow = match self.curve {
            FanCurve::Linear { nominal_flow, .. } => {
                signal * nominal_flow.get::<cubic_meter_per_second>()
            }
            FanCurve::Quadratic { max_flow, .. } => {
                max_flow.get::<cubic_meter_per_second>() * signal.sqrt() * self.throttle(dp)
            }
        };
        self.check_flow(flow)?;

        Ok(self.operation(signal, flow, dp, clamped))
    }

    /// Operates the fan to deliver a volume flow.
    ///
    /// If the flow needs more than full signal the signal is clamped to one
    /// and the fan delivers what it can.
    ///
    /// # Errors
    ///
    /// Returns [`FanError::OutOfRange`] for an invalid pressure difference or
    /// a requested flow below the minimum.
    pub fn at_flow(
        &self,
        flow: VolumeRate,
        pressure_difference: Pressure,
    ) -> Result<FanOperation, FanError> {
        let dp = self.pressure_difference(pressure_difference)?;
        let requested = flow.get::<cubic_meter_per_second>();
        self.check_flow(requested)?;

        let required_signal = match self.curve {
            FanCurve::Linear { nominal_flow, .. } => {
                requested / nominal_flow.get::<cubic_meter_per_second>()
            }
            FanCurve::Quadratic { max_flow, .. } => {
                let open_flow = max_flow.get::<cubic_meter_per_second>() * self.throttle(dp);
                (requested / open_flow).powi(2)
            }
        };

        let (signal, clamped) = clamp_signal(required_signal);
        if !clamped {
            return Ok(self.operation(signal, requested, dp, false));
        }

        let delivered = match self.curve {
            FanCurve::Linear { nominal_flow, .. } => nominal_flow.get::<cubic_meter_per_second>(),
            FanCurve::Quadratic { max_flow, .. } => {
                max_flow.get::<cubic_meter_per_second>() * self.throttle(dp)
            }
        };
        self.check_flow(delivered)?;
        Ok(self.operation(signal, delivered, dp, true))
    }

    /// Validates a pressure difference, returning it in pascals.
    fn pressure_difference(&self, pressure_difference: Pressure) -> Result<f64, FanError> {
        let dp = pressure_difference.get::<pascal>();
        let max = self.max_pressure_difference.get::<pascal>();
        if !(dp >= 0.0) {
            return Err(FanError::out_of_range(
                "pressure difference",
                format!("must be non-negative, got {dp} Pa"),
            ));
        }
        if dp > max {
            return Err(FanError::out_of_range(
                "pressure difference",
                format!("{dp} Pa exceeds the rated maximum of {max} Pa"),
            ));
        }
        Ok(dp)
    }

    /// Flow reduction factor `1 − (Δp/Δp_max)²`.
    fn throttle(&self, dp: f64) -> f64 {
        let x = dp / self.max_pressure_difference.get::<pascal>();
        1.0 - x * x
    }

    fn check_flow(&self, flow: f64) -> Result<(), FanError> {
        let nominal = self.nominal_flow().get::<cubic_meter_per_second>();
        if !(flow >= MIN_FLOW_FRACTION * nominal) {
            return Err(FanError::out_of_range(
                "volume flow rate",
                format!(
                    "{flow} m³/s is below {}% of the nominal {nominal} m³/s",
                    MIN_FLOW_FRACTION * 100.0
                ),
            ));
        }
        Ok(())
    }

    fn operation(&self, signal: f64, flow: f64, dp: f64, clamped: bool) -> FanOperation {
        let (speed, power) = match self.curve {
            FanCurve::Linear {
                nominal_flow,
                nominal_speed,
                nominal_power,
                efficiency,
            } => {
                let fraction = flow / nominal_flow.get::<cubic_meter_per_second>();
                (
                    nominal_speed.get::<radian_per_second>() * fraction,
                    nominal_power.get::<watt>() * fraction + flow * dp / efficiency.get::<ratio>(),
                )
            }
            FanCurve::Quadratic {
                max_speed,
                max_power,
                ..
            } => (
                max_speed.get::<radian_per_second>() * signal.sqrt(),
                max_power.get::<watt>() * signal,
            ),
        };

        FanOperation {
            signal: Ratio::new::<ratio>(signal),
            flow: VolumeRate::new::<cubic_meter_per_second>(flow),
            speed: AngularVelocity::new::<radian_per_second>(speed),
            power: Power::new::<watt>(power),
            pressure_difference: Pressure::new::<pascal>(dp),
            clamped,
        }
    }
}

/// Clamps a signal into `[0, 1]`, warning when it had to move.
fn clamp_signal(signal: f64) -> (f64, bool) {
    if (0.0..=1.0).contains(&signal) {
        return (signal, false);
    }
    let clamped = if signal > 1.0 { 1.0 } else { 0.0 };
    warn!(signal, clamped, "fan signal clamped into [0, 1]");
    (clamped, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{angular_velocity::revolution_per_minute, volume_rate::cubic_meter_per_hour};

    /// Datasheet point: 865 m³/h at 4800 rpm drawing 110 W.
    fn linear() -> Fan {
        Fan::new(
            FanCurve::Linear {
                nominal_flow: VolumeRate::new::<cubic_meter_per_hour>(865.0),
                nominal_speed: AngularVelocity::new::<revolution_per_minute>(4800.0),
                nominal_power: Power::new::<watt>(110.0),
                efficiency: Ratio::new::<ratio>(0.7),
            },
            Pressure::new::<pascal>(150.0),
        )
        .unwrap()
    }

    fn quadratic() -> Fan {
        Fan::new(
            FanCurve::Quadratic {
                max_flow: VolumeRate::new::<cubic_meter_per_hour>(2000.0),
                max_speed: AngularVelocity::new::<revolution_per_minute>(1200.0),
                max_power: Power::new::<watt>(150.0),
            },
            Pressure::new::<pascal>(200.0),
        )
        .unwrap()
    }

    fn pa(value: f64) -> Pressure {
        Pressure::new::<pascal>(value)
    }

    fn m3h(value: f64) -> VolumeRate {
        VolumeRate::new::<cubic_meter_per_hour>(value)
    }

    #[test]
    fn linear_fan_at_nominal_flow() {
        let op = linear().at_flow(m3h(865.0), pa(10.0)).unwrap();

        assert_relative_eq!(op.speed.get::<revolution_per_minute>(), 4800.0, epsilon = 1e-9);
        assert_relative_eq!(
            op.power.get::<watt>(),
            110.0 + (865.0 / 3600.0) * 10.0 / 0.7,
            epsilon = 1e-9
        );
        assert_relative_eq!(op.signal.get::<ratio>(), 1.0, epsilon = 1e-12);
        assert!(!op.clamped);
    }

    #[test]
    fn linear_fan_scales_with_flow() {
        let op = linear().at_flow(m3h(432.5), pa(0.0)).unwrap();
        assert_relative_eq!(op.speed.get::<revolution_per_minute>(), 2400.0, epsilon = 1e-9);
        assert_relative_eq!(op.power.get::<watt>(), 55.0, epsilon = 1e-9);
    }

    #[test]
    fn flow_below_the_floor_fails() {
        for fan in [linear(), quadratic()] {
            let floor = fan.nominal_flow() * MIN_FLOW_FRACTION;
            assert!(matches!(
                fan.at_flow(floor * 0.99, pa(0.0)),
                Err(FanError::OutOfRange {
                    quantity: "volume flow rate",
                    ..
                })
            ));
            assert!(fan.at_flow(floor * 1.01, pa(0.0)).is_ok());
        }
    }

    #[test]
    fn quadratic_fan_follows_the_signal_law() {
        let op = quadratic()
            .at_signal(Ratio::new::<ratio>(0.64), pa(100.0))
            .unwrap();

        assert_relative_eq!(op.flow.get::<cubic_meter_per_hour>(), 1200.0, epsilon = 1e-9);
        assert_relative_eq!(op.power.get::<watt>(), 96.0, epsilon = 1e-9);
        assert_relative_eq!(op.speed.get::<revolution_per_minute>(), 960.0, epsilon = 1e-9);
    }

    #[test]
    fn requested_flow_inverts_the_signal_law() {
        let op = quadratic().at_flow(m3h(1200.0), pa(100.0)).unwrap();
        assert_relative_eq!(op.signal.get::<ratio>(), 0.64, epsilon = 1e-12);
        assert!(!op.clamped);
    }

    #[test]
    fn signal_is_clamped_in_both_directions() {
        let fan = quadratic();

        let given = fan.at_signal(Ratio::new::<ratio>(1.3), pa(100.0)).unwrap();
        assert!(given.clamped);
        assert_relative_eq!(given.signal.get::<ratio>(), 1.0);
        assert_relative_eq!(given.power.get::<watt>(), 150.0, epsilon = 1e-9);

        // Full signal delivers 1500 m³/h at 100 Pa.
        let requested = fan.at_flow(m3h(1800.0), pa(100.0)).unwrap();
        assert!(requested.clamped);
        assert_relative_eq!(requested.signal.get::<ratio>(), 1.0);
        assert_relative_eq!(
            requested.flow.get::<cubic_meter_per_hour>(),
            1500.0,
            epsilon = 1e-9
        );
        assert_eq!(given, requested);
    }

    #[test]
    fn negative_signal_clamps_to_off_and_fails_the_floor() {
        assert!(matches!(
            quadratic().at_signal(Ratio::new::<ratio>(-0.2), pa(0.0)),
            Err(FanError::OutOfRange {
                quantity: "volume flow rate",
                ..
            })
        ));
    }

    #[test]
    fn pressure_difference_above_rating_fails() {
        for fan in [linear(), quadratic()] {
            let over = fan.max_pressure_difference() * 1.01;
            assert!(matches!(
                fan.at_flow(fan.nominal_flow() * 0.5, over),
                Err(FanError::OutOfRange {
                    quantity: "pressure difference",
                    ..
                })
            ));
            assert!(matches!(
                fan.at_signal(Ratio::new::<ratio>(0.5), over),
                Err(FanError::OutOfRange {
                    quantity: "pressure difference",
                    ..
                })
            ));
        }
    }

    #[test]
    fn invalid_designs_are_rejected() {
        let result = Fan::new(
            FanCurve::Linear {
                nominal_flow: m3h(865.0),
                nominal_speed: AngularVelocity::new::<revolution_per_minute>(4800.0),
                nominal_power: Power::new::<watt>(110.0),
                efficiency: Ratio::new::<ratio>(1.2),
            },
            pa(150.0),
        );
        assert!(matches!(
            result,
            Err(FanError::OutOfRange {
                quantity: "fan efficiency",
                ..
            })
        ));

        assert!(Fan::new(*quadratic().curve(), pa(0.0)).is_err());
    }
}
