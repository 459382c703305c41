//! Fan.
//!
//! One fan type with a [`FanCurve`] strategy: datasheet nominal-point scaling
//! or a signal-driven square-root law. Both share one policy for the control
//! signal, described in the internal [`core`] module.

pub(crate) mod core;

use twine_core::Model;
use uom::si::f64::{Pressure, Ratio, VolumeRate};

pub use self::core::{Fan, FanCurve, FanError, FanOperation, MIN_FLOW_FRACTION};

/// What the fan is asked to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FanInput {
    /// Deliver a volume flow against a pressure difference.
    Flow {
        flow: VolumeRate,
        pressure_difference: Pressure,
    },

    /// Run at a control signal against a pressure difference.
    Signal {
        signal: Ratio,
        pressure_difference: Pressure,
    },
}

impl Model for Fan {
    type Input = FanInput;
    type Output = FanOperation;
    type Error = FanError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        match *input {
            FanInput::Flow {
                flow,
                pressure_difference,
            } => self.at_flow(flow, pressure_difference),
            FanInput::Signal {
                signal,
                pressure_difference,
            } => self.at_signal(signal, pressure_difference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        angular_velocity::revolution_per_minute, f64::{AngularVelocity, Power}, power::watt,
        pressure::pascal, ratio::ratio, volume_rate::cubic_meter_per_hour,
    };

    #[test]
    fn model_dispatches_on_the_input() {
        let fan = Fan::new(
            FanCurve::Quadratic {
                max_flow: VolumeRate::new::<cubic_meter_per_hour>(2000.0),
                max_speed: AngularVelocity::new::<revolution_per_minute>(1200.0),
                max_power: Power::new::<watt>(150.0),
            },
            Pressure::new::<pascal>(200.0),
        )
        .unwrap();
        let dp = Pressure::new::<pascal>(50.0);

        let by_signal = fan
            .call(&FanInput::Signal {
                signal: Ratio::new::<ratio>(0.5),
                pressure_difference: dp,
            })
            .unwrap();
        let by_flow = fan
            .call(&FanInput::Flow {
                flow: by_signal.flow,
                pressure_difference: dp,
            })
            .unwrap();

        approx::assert_relative_eq!(
            by_flow.signal.get::<ratio>(),
            0.5,
            max_relative = 1e-12
        );
    }
}
