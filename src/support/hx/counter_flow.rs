use uom::si::ratio::ratio;

use super::{CapacitanceRate, Effectiveness, EffectivenessRelation, Ntu};

/// Counter-flow arrangement.
///
/// Multi-row fin-tube coils with cross-counter circuiting are treated as
/// counter flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterFlow;

impl EffectivenessRelation for CounterFlow {
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness {
        let [a, b] = capacitance_rates;
        let cr = (a.min(*b) / a.max(*b)).get::<ratio>();
        let ntu = ntu.get::<ratio>();

        let raw = if cr == 0.0 || cr.is_nan() {
            1.0 - (-ntu).exp()
        } else if cr < 1.0 {
            let decay = (-ntu * (1.0 - cr)).exp();
            (1.0 - decay) / (1.0 - cr * decay)
        } else {
            ntu / (1.0 + ntu)
        };
        Effectiveness::saturating(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    use crate::support::constraint::ConstraintResult;

    fn rates(pair: [f64; 2]) -> ConstraintResult<[CapacitanceRate; 2]> {
        Ok([
            CapacitanceRate::new::<watt_per_kelvin>(pair[0])?,
            CapacitanceRate::new::<watt_per_kelvin>(pair[1])?,
        ])
    }

    #[test]
    fn known_values() -> ConstraintResult<()> {
        let ntu = Ntu::new(1.0)?;

        let boiling = CounterFlow.effectiveness(ntu, rates([1.0, f64::INFINITY])?);
        assert_relative_eq!(boiling.get::<ratio>(), 1.0 - (-1.0_f64).exp(), epsilon = 1e-12);

        let balanced = CounterFlow.effectiveness(ntu, rates([1.0, 1.0])?);
        assert_relative_eq!(balanced.get::<ratio>(), 0.5, epsilon = 1e-12);

        let half = CounterFlow.effectiveness(ntu, rates([1.0, 2.0])?);
        let decay = (-0.5_f64).exp();
        assert_relative_eq!(
            half.get::<ratio>(),
            (1.0 - decay) / (1.0 - 0.5 * decay),
            epsilon = 1e-12
        );
        Ok(())
    }

    #[test]
    fn more_area_never_hurts() -> ConstraintResult<()> {
        for pair in [[1.0, f64::INFINITY], [1.0, 4.0], [1.0, 1.0]] {
            let mut last = 0.0;
            for ntu in [0.0, 0.2, 0.5, 1.0, 3.0, 10.0] {
                let eff = CounterFlow.effectiveness(Ntu::new(ntu)?, rates(pair)?).get::<ratio>();
                assert!(eff >= last);
                last = eff;
            }
        }
        Ok(())
    }
}
