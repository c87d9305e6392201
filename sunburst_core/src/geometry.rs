// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector geometry for presenters.
//!
//! Angles follow the arc convention (radians, 0 along +x, increasing toward
//! +y). In a y-down coordinate system this turns clockwise, which matches the
//! "clockwise from the top" starting angle.

use kurbo::{BezPath, Point, Vec2};

use crate::arc::Arc;

/// Linearly interpolates from `from` to `to` by `t`.
#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Arc {
    /// Returns the point at unit coordinates `(u, v)` within the sector.
    ///
    /// `u` moves around the arc from `start` (0) to `end` (1); `v` moves out
    /// from the inner radius (0) to the outer radius (1).
    #[must_use]
    pub fn point_at(&self, center: Point, u: f64, v: f64) -> Point {
        let angle = lerp(self.start, self.end, u);
        let radius = lerp(self.inner_radius, self.outer_radius, v);
        center + Vec2::from_angle(angle) * radius
    }

    /// Returns where the arc's label (name and image) is centered.
    #[must_use]
    pub fn label_anchor(&self, center: Point) -> Point {
        self.point_at(center, 0.5, 0.5)
    }

    /// Returns whether the sector covers any area.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.thickness() > 0.0
    }

    /// Builds the sector outline, with margins applied, as a closed path.
    ///
    /// The inner edge runs from `start + inner_margin` to
    /// `end - inner_margin`, the outer edge back from `end - outer_margin` to
    /// `start + outer_margin`. An inner radius of zero degenerates the inner
    /// edge to the center, producing a pie slice.
    #[must_use]
    pub fn to_path(&self, center: Point, tolerance: f64) -> BezPath {
        let inner_start = self.start + self.inner_margin;
        let inner_sweep = (self.end - self.inner_margin) - inner_start;
        let outer_end = self.end - self.outer_margin;
        let outer_sweep = (self.start + self.outer_margin) - outer_end;

        let mut path = BezPath::new();
        path.move_to(center + Vec2::from_angle(inner_start) * self.inner_radius);
        if self.inner_radius > 0.0 {
            let inner = kurbo::Arc {
                center,
                radii: Vec2::new(self.inner_radius, self.inner_radius),
                start_angle: inner_start,
                sweep_angle: inner_sweep,
                x_rotation: 0.0,
            };
            path.extend(inner.append_iter(tolerance));
        }

        path.line_to(center + Vec2::from_angle(outer_end) * self.outer_radius);
        let outer = kurbo::Arc {
            center,
            radii: Vec2::new(self.outer_radius, self.outer_radius),
            start_angle: outer_end,
            sweep_angle: outer_sweep,
            x_rotation: 0.0,
        };
        path.extend(outer.append_iter(tolerance));
        path.close_path();
        path
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use kurbo::Shape;

    use super::*;
    use crate::node::NodeStore;

    const EPS: f64 = 1e-9;

    fn quarter() -> Arc {
        let mut store = NodeStore::new();
        let mut arc = Arc::new(store.create_node("q"));
        arc.width = FRAC_PI_2;
        arc.start = 0.0;
        arc.end = FRAC_PI_2;
        arc.inner_radius = 10.0;
        arc.outer_radius = 20.0;
        arc
    }

    #[test]
    fn point_at_interpolates_angle_and_radius() {
        let arc = quarter();
        let p = arc.point_at(Point::ORIGIN, 0.0, 0.0);
        assert!((p.x - 10.0).abs() < EPS && p.y.abs() < EPS);
        let p = arc.point_at(Point::ORIGIN, 1.0, 1.0);
        assert!(p.x.abs() < EPS && (p.y - 20.0).abs() < EPS);
    }

    #[test]
    fn label_anchor_is_the_sector_midpoint() {
        let arc = quarter();
        let anchor = arc.label_anchor(Point::new(100.0, 100.0));
        let expected = Point::new(100.0, 100.0) + Vec2::from_angle(PI / 4.0) * 15.0;
        assert!((anchor - expected).hypot() < EPS);
    }

    #[test]
    fn path_covers_the_annular_sector() {
        let arc = quarter();
        let path = arc.to_path(Point::ORIGIN, 0.01);
        // θ/2 · (R² − r²)
        let expected = FRAC_PI_2 / 2.0 * (20.0 * 20.0 - 10.0 * 10.0);
        assert!((path.area().abs() - expected).abs() < 0.5);
        let bbox = path.bounding_box();
        assert!(bbox.x0 > -1e-6 && bbox.y0 > -1e-6);
        assert!((bbox.x1 - 20.0).abs() < 1e-3);
    }

    #[test]
    fn visibility_needs_width_and_thickness() {
        let mut arc = quarter();
        assert!(arc.is_visible());
        arc.outer_radius = arc.inner_radius;
        assert!(!arc.is_visible());
        arc = quarter();
        arc.width = 0.0;
        assert!(!arc.is_visible());
    }
}
