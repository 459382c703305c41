use uom::si::{
    f64::{Ratio, Volume},
    ratio::ratio,
    volume::cubic_meter,
};

use crate::support::constraint::UnitInterval;

use super::CompressorError;

/// How the polytropic exponent of the compression is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolytropicExponent {
    /// A fixed exponent `n ≥ 1`.
    ///
    /// Shaft power is the polytropic gas work divided by the isentropic and
    /// mechanical efficiencies.
    Fixed(f64),

    /// The exponent whose polytropic work reproduces the isentropic
    /// efficiency.
    ///
    /// The isentropic efficiency then shapes the discharge state rather than
    /// scaling the power, and shaft power is the polytropic gas work divided
    /// by the mechanical efficiency only.
    MatchIsentropicEfficiency,
}

/// Efficiencies of a compressor, each in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiencies {
    pub isentropic: Ratio,
    pub mechanical: Ratio,
    pub electrical: Ratio,
}

impl Default for Efficiencies {
    /// An ideal machine.
    fn default() -> Self {
        Self {
            isentropic: Ratio::new::<ratio>(1.0),
            mechanical: Ratio::new::<ratio>(1.0),
            electrical: Ratio::new::<ratio>(1.0),
        }
    }
}

/// Design parameters of a reciprocating compressor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorDesign {
    /// Swept volume per revolution.
    pub displacement: Volume,

    /// Clearance volume as a fraction of the displacement.
    pub clearance: Ratio,

    pub exponent: PolytropicExponent,
    pub efficiencies: Efficiencies,
}

impl CompressorDesign {
    pub(super) fn validate(&self) -> Result<(), CompressorError> {
        let displacement = self.displacement.get::<cubic_meter>();
        if !(displacement > 0.0 && displacement.is_finite()) {
            return Err(CompressorError::out_of_range(
                "displacement",
                format!("must be positive, got {displacement} m³"),
            ));
        }

        UnitInterval::new(self.clearance).map_err(|err| {
            CompressorError::out_of_range("clearance", format!("{:?}: {err}", self.clearance))
        })?;

        if let PolytropicExponent::Fixed(n) = self.exponent {
            if !(n >= 1.0 && n.is_finite()) {
                return Err(CompressorError::out_of_range(
                    "polytropic exponent",
                    format!("must be at least 1, got {n}"),
                ));
            }
        }

        let Efficiencies {
            isentropic,
            mechanical,
            electrical,
        } = self.efficiencies;
        for (quantity, eta) in [
            ("isentropic efficiency", isentropic),
            ("mechanical efficiency", mechanical),
            ("electrical efficiency", electrical),
        ] {
            let value = eta.get::<ratio>();
            if !(value > 0.0 && value <= 1.0) {
                return Err(CompressorError::out_of_range(
                    quantity,
                    format!("must lie in (0, 1], got {value}"),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::volume::cubic_centimeter;

    fn design() -> CompressorDesign {
        CompressorDesign {
            displacement: Volume::new::<cubic_centimeter>(25.0),
            clearance: Ratio::new::<ratio>(0.02),
            exponent: PolytropicExponent::Fixed(1.2),
            efficiencies: Efficiencies::default(),
        }
    }

    #[test]
    fn accepts_a_typical_design() {
        assert!(design().validate().is_ok());
    }

    #[test]
    fn rejects_invalid_parameters() {
        let cases = [
            (
                CompressorDesign {
                    displacement: Volume::new::<cubic_centimeter>(0.0),
                    ..design()
                },
                "displacement",
            ),
            (
                CompressorDesign {
                    clearance: Ratio::new::<ratio>(1.5),
                    ..design()
                },
                "clearance",
            ),
            (
                CompressorDesign {
                    exponent: PolytropicExponent::Fixed(0.9),
                    ..design()
                },
                "polytropic exponent",
            ),
            (
                CompressorDesign {
                    efficiencies: Efficiencies {
                        mechanical: Ratio::new::<ratio>(0.0),
                        ..Efficiencies::default()
                    },
                    ..design()
                },
                "mechanical efficiency",
            ),
        ];

        for (design, expected) in cases {
            match design.validate() {
                Err(CompressorError::OutOfRange { quantity, .. }) => {
                    assert_eq!(quantity, expected);
                }
                other => panic!("expected {expected} out of range, got {other:?}"),
            }
        }
    }
}
