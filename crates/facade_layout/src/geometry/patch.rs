//! Bounded rectangular surfaces.
use glam::DVec3;

use crate::geometry::{GeometryKind, GeometryOracle, Plane, PointContainment};

/// A planar rectangle spanning `[0, width] x [0, height]` in the frame of `plane`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patch {
    pub plane: Plane,
    pub width: f64,
    pub height: f64,
}

impl Patch {
    pub fn new(plane: Plane, width: f64, height: f64) -> Self {
        Self {
            plane,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Patch whose corner sits at `origin`, spanned by `u_edge` and the part of `v_edge`
    /// perpendicular to it. Returns `None` for degenerate edges.
    pub fn from_edges(origin: DVec3, u_edge: DVec3, v_edge: DVec3) -> Option<Self> {
        let plane = Plane::from_points(origin, origin + u_edge, origin + v_edge)?;
        let height = v_edge.dot(plane.y_axis);
        Some(Self::new(plane, u_edge.length(), height))
    }
}

impl GeometryOracle for Patch {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Surface
    }

    fn closest_point(&self, point: DVec3) -> Option<DVec3> {
        let local = self.plane.to_local(point);
        Some(self.plane.point_at(
            local.x.clamp(0.0, self.width),
            local.y.clamp(0.0, self.height),
        ))
    }

    fn contains(&self, _point: DVec3, _plane: &Plane, _tolerance: f64) -> PointContainment {
        PointContainment::Outside
    }

    fn is_closed_planar_coplanar(&self, _plane: &Plane, _tolerance: f64) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_point_projects_inside_bounds() {
        let patch = Patch::new(Plane::world_xy(DVec3::ZERO), 4.0, 2.0);
        let cp = patch.closest_point(DVec3::new(1.0, 1.0, 3.0)).unwrap();
        assert_eq!(cp, DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn closest_point_clamps_to_edges() {
        let patch = Patch::new(Plane::world_xy(DVec3::ZERO), 4.0, 2.0);
        let cp = patch.closest_point(DVec3::new(6.0, -1.0, 0.0)).unwrap();
        assert_eq!(cp, DVec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn from_edges_orthogonalizes_v() {
        let patch = Patch::from_edges(
            DVec3::ZERO,
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 3.0),
        )
        .expect("non-degenerate");
        assert!((patch.width - 2.0).abs() < 1e-12);
        assert!((patch.height - 3.0).abs() < 1e-12);
        assert_eq!(patch.kind(), GeometryKind::Surface);
    }

    #[test]
    fn negative_extents_collapse_to_zero() {
        let patch = Patch::new(Plane::world_xy(DVec3::ZERO), -1.0, 2.0);
        assert_eq!(patch.width, 0.0);
    }
}
