//! Geometry capability interface used by region selection.
//!
//! The layout core never evaluates curves or surfaces itself. Host geometry is wrapped
//! in a type implementing [`GeometryOracle`], which answers the three questions region
//! selection needs: closest point, point containment, and closed/planar/coplanar tests.
//! [`Polyline`] and [`Patch`] are small reference implementations.
use glam::{DVec2, DVec3};

pub mod patch;
pub mod polyline;

pub use patch::Patch;
pub use polyline::Polyline;

/// What a piece of region geometry is, as far as region selection cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    /// A curve. Closed curves bound an area, open curves mark a path.
    Curve { closed: bool },
    /// A surface or polysurface.
    Surface,
    /// Anything else. Region selection skips these.
    Unsupported,
}

/// Result of testing a point against a closed curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointContainment {
    Inside,
    Outside,
    /// The point lies on the curve within tolerance.
    Coincident,
}

impl PointContainment {
    /// Inside or on the boundary.
    #[inline]
    pub fn is_enclosed(self) -> bool {
        matches!(self, PointContainment::Inside | PointContainment::Coincident)
    }
}

/// Capability interface for host geometry.
///
/// Implementors wrap whatever the host kernel provides. All distances are in model units.
pub trait GeometryOracle: Send + Sync {
    fn kind(&self) -> GeometryKind;

    /// Closest point on the geometry to `point`, or `None` if it cannot be computed.
    fn closest_point(&self, point: DVec3) -> Option<DVec3>;

    /// Containment of `point` projected onto `plane`. Only meaningful for closed curves.
    fn contains(&self, point: DVec3, plane: &Plane, tolerance: f64) -> PointContainment;

    /// True for a closed curve that is planar and lies in `plane`.
    fn is_closed_planar_coplanar(&self, plane: &Plane, tolerance: f64) -> bool;
}

/// An oriented plane with an orthonormal frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub origin: DVec3,
    pub x_axis: DVec3,
    pub y_axis: DVec3,
    pub normal: DVec3,
}

impl Plane {
    /// World XY plane through `origin`.
    pub fn world_xy(origin: DVec3) -> Self {
        Self {
            origin,
            x_axis: DVec3::X,
            y_axis: DVec3::Y,
            normal: DVec3::Z,
        }
    }

    /// Plane through three points: origin at `a`, x axis toward `b`, `c` on the positive y side.
    ///
    /// Returns `None` when the points are coincident or collinear.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let x_axis = (b - a).try_normalize()?;
        let normal = x_axis.cross(c - a).try_normalize()?;
        let y_axis = normal.cross(x_axis);
        Some(Self {
            origin: a,
            x_axis,
            y_axis,
            normal,
        })
    }

    /// Signed distance from the plane along its normal.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Coordinates of `point` projected into the plane frame.
    #[inline]
    pub fn to_local(&self, point: DVec3) -> DVec2 {
        let d = point - self.origin;
        DVec2::new(d.dot(self.x_axis), d.dot(self.y_axis))
    }

    /// World point at plane coordinates `(x, y)`.
    #[inline]
    pub fn point_at(&self, x: f64, y: f64) -> DVec3 {
        self.origin + self.x_axis * x + self.y_axis * y
    }
}
