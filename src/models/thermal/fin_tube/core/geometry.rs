//! Plain continuous-fin, staggered-tube core geometry.
//!
//! Notation follows the usual coil conventions:
//!
//! - `L₁`: tube length exposed to the air stream.
//! - `L₂`: flow length in the air flow direction (coil depth).
//! - `L₃`: core height, perpendicular to both.
//! - `S_t`, `S_l`: transverse and longitudinal tube pitch.
//!
//! A region of the coil occupies part of the depth `L₂`; its areas scale with
//! the number of tubes that fit in that slice.

use std::f64::consts::PI;

use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{Area, HeatTransfer, Length, Ratio, ThermalConductivity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::constraint::{ConstraintError, StrictlyPositive};

/// Design dimensions of a fin-tube core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinTubeDimensions {
    /// Tube length exposed to the air stream (`L₁`).
    pub tube_length: Length,
    /// Core height (`L₃`).
    pub height: Length,
    /// Number of tube rows in the air flow direction.
    pub rows: usize,
    /// Transverse pitch between tubes of one row (`S_t`).
    pub transverse_pitch: Length,
    /// Longitudinal pitch between rows (`S_l`).
    pub longitudinal_pitch: Length,
    pub inner_diameter: Length,
    pub outer_diameter: Length,
    pub fin_thickness: Length,
    /// Distance between adjacent fins (the inverse of fin density).
    pub fin_pitch: Length,
    pub fin_conductivity: ThermalConductivity,
    /// Parallel refrigerant circuits.
    pub circuits: usize,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{name} is invalid: {source}")]
    Dimension {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("{name} must be at least one")]
    Count { name: &'static str },

    #[error("outer tube diameter must exceed the inner diameter")]
    TubeWall,

    #[error("tubes do not fit: outer diameter must be smaller than both pitches")]
    TubeSpacing,

    #[error("fin thickness must be smaller than the fin pitch")]
    FinSpacing,
}

/// Validated fin-tube core geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinTubeGeometry {
    dims: FinTubeDimensions,
}

impl FinTubeGeometry {
    /// Validates the dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if a dimension is not strictly positive or
    /// the parts do not fit together.
    pub fn new(dims: FinTubeDimensions) -> Result<Self, GeometryError> {
        let positive = |name: &'static str, value: Length| {
            StrictlyPositive::new(value)
                .map(|_| ())
                .map_err(|source| GeometryError::Dimension { name, source })
        };

        positive("tube_length", dims.tube_length)?;
        positive("height", dims.height)?;
        positive("transverse_pitch", dims.transverse_pitch)?;
        positive("longitudinal_pitch", dims.longitudinal_pitch)?;
        positive("inner_diameter", dims.inner_diameter)?;
        positive("outer_diameter", dims.outer_diameter)?;
        positive("fin_thickness", dims.fin_thickness)?;
        positive("fin_pitch", dims.fin_pitch)?;
        StrictlyPositive::new(dims.fin_conductivity).map_err(|source| {
            GeometryError::Dimension {
                name: "fin_conductivity",
                source,
            }
        })?;

        if dims.rows == 0 {
            return Err(GeometryError::Count { name: "rows" });
        }
        if dims.circuits == 0 {
            return Err(GeometryError::Count { name: "circuits" });
        }
        if dims.outer_diameter <= dims.inner_diameter {
            return Err(GeometryError::TubeWall);
        }
        if dims.outer_diameter >= dims.transverse_pitch
            || dims.outer_diameter >= dims.longitudinal_pitch
        {
            return Err(GeometryError::TubeSpacing);
        }
        if dims.fin_thickness >= dims.fin_pitch {
            return Err(GeometryError::FinSpacing);
        }

        Ok(Self { dims })
    }

    #[must_use]
    pub fn dimensions(&self) -> &FinTubeDimensions {
        &self.dims
    }

    /// Total flow length of the core, `rows · S_l`.
    #[must_use]
    pub fn depth(&self) -> Length {
        self.dims.longitudinal_pitch * self.dims.rows as f64
    }

    /// Tubes per row, `k₁ = L₃ / S_t`.
    #[must_use]
    pub fn tubes_per_row(&self) -> f64 {
        (self.dims.height / self.dims.transverse_pitch).get::<ratio>()
    }

    /// Number of tubes in a slice of the given flow length.
    ///
    /// `n = ½·((2·k₁ − 1)·L₂/S_l + 1)`, and zero for an empty slice.
    #[must_use]
    pub fn tube_count(&self, flow_length: Length) -> f64 {
        if flow_length.get::<meter>() <= 0.0 {
            return 0.0;
        }
        let rows = (flow_length / self.dims.longitudinal_pitch).get::<ratio>();
        0.5 * ((2.0 * self.tubes_per_row() - 1.0) * rows + 1.0)
    }

    /// Flow length whose slice holds the given inner tube area.
    ///
    /// Inverse of [`inner_area`](Self::inner_area), floored at zero.
    #[must_use]
    pub fn flow_length_for_inner_area(&self, inner_area: Area) -> Length {
        let per_tube = PI * self.dims.inner_diameter * self.dims.tube_length;
        let tubes = (inner_area / per_tube).get::<ratio>();
        let rows = (2.0 * tubes - 1.0) / (2.0 * self.tubes_per_row() - 1.0);
        self.dims.longitudinal_pitch * rows.max(0.0)
    }

    /// Refrigerant-side heat transfer area.
    #[must_use]
    pub fn inner_area(&self, flow_length: Length) -> Area {
        PI * self.dims.inner_diameter * self.dims.tube_length * self.tube_count(flow_length)
    }

    /// Fin surface area, both faces, net of the tube holes.
    #[must_use]
    pub fn fin_area(&self, flow_length: Length) -> Area {
        let d = &self.dims;
        let fins = (d.tube_length / d.fin_pitch).get::<ratio>();
        let holes = self.tube_count(flow_length) * PI * d.outer_diameter * d.outer_diameter / 4.0;
        let face = d.height * flow_length - holes;
        (2.0 * fins * face).max(Area::new::<square_meter>(0.0))
    }

    /// Exposed tube surface between the fins.
    #[must_use]
    pub fn primary_area(&self, flow_length: Length) -> Area {
        let d = &self.dims;
        PI * d.outer_diameter * d.tube_length * self.open_fraction() * self.tube_count(flow_length)
    }

    /// Total air-side heat transfer area.
    #[must_use]
    pub fn outer_area(&self, flow_length: Length) -> Area {
        self.fin_area(flow_length) + self.primary_area(flow_length)
    }

    /// Minimum free-flow area on the air side.
    #[must_use]
    pub fn min_free_flow_area(&self) -> Area {
        let d = &self.dims;
        self.tubes_per_row()
            * (d.transverse_pitch - d.outer_diameter)
            * d.tube_length
            * self.open_fraction()
    }

    #[must_use]
    pub fn frontal_area(&self) -> Area {
        self.dims.tube_length * self.dims.height
    }

    /// Refrigerant flow area summed over the parallel circuits.
    #[must_use]
    pub fn inner_flow_area(&self) -> Area {
        let d = self.dims.inner_diameter;
        self.dims.circuits as f64 * PI * d * d / 4.0
    }

    /// Air-side hydraulic diameter `4·A_min·L₂ / A_o`.
    ///
    /// Falls back to the tube gap for an empty slice.
    #[must_use]
    pub fn hydraulic_diameter(&self, flow_length: Length) -> Length {
        let outer = self.outer_area(flow_length);
        if outer.value <= 0.0 {
            return self.dims.transverse_pitch - self.dims.outer_diameter;
        }
        4.0 * self.min_free_flow_area() * flow_length / outer
    }

    /// Fin efficiency by Schmidt's equivalent circular fin.
    ///
    /// Staggered rows are mapped onto a circular fin of equal area, then the
    /// straight-fin relation `tanh(m·r·φ) / (m·r·φ)` is applied.
    #[must_use]
    pub fn fin_efficiency(&self, coefficient: HeatTransfer) -> Ratio {
        let d = &self.dims;
        let r = d.outer_diameter.get::<meter>() / 2.0;
        let x_m = d.transverse_pitch.get::<meter>() / 2.0;
        let s_l = d.longitudinal_pitch.get::<meter>();
        let x_l = (x_m * x_m + s_l * s_l).sqrt() / 2.0;

        let radius_ratio = 1.27 * (x_m / r) * (x_l / x_m - 0.3).sqrt();
        let phi = (radius_ratio - 1.0) * (1.0 + 0.35 * radius_ratio.ln());

        let h = coefficient.get::<watt_per_square_meter_kelvin>().max(0.0);
        let k = d.fin_conductivity.get::<watt_per_meter_kelvin>();
        let m = (2.0 * h / (k * d.fin_thickness.get::<meter>())).sqrt();

        let x = m * r * phi;
        let eta = if x > 1e-9 { x.tanh() / x } else { 1.0 };
        Ratio::new::<ratio>(eta)
    }

    /// Overall surface efficiency `η_o = 1 − (A_f/A_o)·(1 − η_f)`.
    #[must_use]
    pub fn surface_efficiency(&self, flow_length: Length, fin_efficiency: Ratio) -> Ratio {
        let outer = self.outer_area(flow_length);
        if outer.value <= 0.0 {
            return Ratio::new::<ratio>(1.0);
        }
        let fin_fraction = (self.fin_area(flow_length) / outer).get::<ratio>();
        Ratio::new::<ratio>(1.0 - fin_fraction * (1.0 - fin_efficiency.get::<ratio>()))
    }

    fn open_fraction(&self) -> f64 {
        1.0 - (self.dims.fin_thickness / self.dims.fin_pitch).get::<ratio>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::millimeter;

    use crate::models::thermal::fin_tube::core::test_support::condenser_dimensions;

    fn geometry() -> FinTubeGeometry {
        FinTubeGeometry::new(condenser_dimensions()).expect("valid geometry")
    }

    #[test]
    fn full_core_areas() {
        let g = geometry();
        let depth = g.depth();

        assert_relative_eq!(depth.get::<millimeter>(), 110.0, epsilon = 1e-9);
        assert_relative_eq!(g.tube_count(depth), 63.74, max_relative = 1e-3);
        assert_relative_eq!(g.inner_area(depth).get::<square_meter>(), 1.692, max_relative = 2e-3);
        assert_relative_eq!(g.outer_area(depth).get::<square_meter>(), 21.76, max_relative = 2e-3);
        assert_relative_eq!(g.frontal_area().get::<square_meter>(), 0.335, max_relative = 1e-3);
    }

    #[test]
    fn inner_area_inverts_to_flow_length() {
        let g = geometry();
        for mm in [5.0, 40.0, 110.0] {
            let length = Length::new::<millimeter>(mm);
            let back = g.flow_length_for_inner_area(g.inner_area(length));
            assert_relative_eq!(back.get::<millimeter>(), mm, max_relative = 1e-12);
        }
        assert_relative_eq!(
            g.flow_length_for_inner_area(Area::new::<square_meter>(0.0)).get::<meter>(),
            0.0
        );
    }

    #[test]
    fn schmidt_fin_efficiency() {
        let g = geometry();
        let eta = g.fin_efficiency(HeatTransfer::new::<watt_per_square_meter_kelvin>(60.0));
        assert_relative_eq!(eta.get::<ratio>(), 0.94, epsilon = 5e-3);

        let still = g.fin_efficiency(HeatTransfer::new::<watt_per_square_meter_kelvin>(0.0));
        assert_relative_eq!(still.get::<ratio>(), 1.0);

        let eta_o = g.surface_efficiency(g.depth(), eta);
        assert!(eta_o > eta && eta_o.get::<ratio>() < 1.0);
    }

    #[test]
    fn rejects_fins_thicker_than_their_pitch() {
        let mut dims = condenser_dimensions();
        dims.fin_thickness = dims.fin_pitch;
        assert_eq!(FinTubeGeometry::new(dims), Err(GeometryError::FinSpacing));

        let mut dims = condenser_dimensions();
        dims.inner_diameter = Length::new::<millimeter>(-1.0);
        assert!(matches!(
            FinTubeGeometry::new(dims),
            Err(GeometryError::Dimension { name: "inner_diameter", .. })
        ));
    }
}
