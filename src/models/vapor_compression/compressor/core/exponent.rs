//! Polytropic exponent matching a target isentropic efficiency.

use tracing::debug;

use crate::support::root::find_root;

use super::{CompressorError, CompressorThermoModel, ReciprocatingCompressor, Suction};

/// Exponent bracket searched for a match.
///
/// `n = 1` keeps the discharge at suction temperature, which for any
/// condensable refrigerant lies below the discharge dew point and fails to
/// evaluate; the search treats that side as too efficient.
const EXPONENT_BRACKET: [f64; 2] = [1.0, 3.0];

impl<Fluid: Clone, Thermo: CompressorThermoModel<Fluid>> ReciprocatingCompressor<Fluid, Thermo> {
    /// Finds `n` such that `w_s / w_n = η_is`.
    ///
    /// The isentropic reference work `w_s` is fixed by the suction entropy, and
    /// the polytropic work `w_n` grows with `n`, so the residual
    /// `w_s / w_n − η_is` falls monotonically across the bracket.
    pub(super) fn matching_exponent(
        &self,
        suction: &Suction<Fluid>,
        isentropic_work: f64,
        isentropic_efficiency: f64,
    ) -> Result<f64, CompressorError> {
        let root = find_root(
            |n| {
                let compression = self.compress(suction, n)?;
                Ok::<_, CompressorError>(isentropic_work / compression.work - isentropic_efficiency)
            },
            EXPONENT_BRACKET,
            &self.root,
        )?;

        debug!(
            n = root.x,
            residual = root.residual,
            iters = root.iters,
            "matched polytropic exponent"
        );
        Ok(root.x)
    }
}
