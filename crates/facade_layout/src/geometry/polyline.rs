//! Piecewise-linear curves.
use glam::{DVec2, DVec3};

use crate::geometry::{GeometryKind, GeometryOracle, Plane, PointContainment};

/// An open or closed 3D polyline.
///
/// A closed polyline has an implicit segment from the last point back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<DVec3>,
    closed: bool,
}

impl Polyline {
    /// Creates an open polyline through `points`.
    pub fn open<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec3>,
    {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            closed: false,
        }
    }

    /// Creates a closed polyline. A trailing point equal to the first is dropped.
    pub fn closed<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec3>,
    {
        let mut points: Vec<DVec3> = points.into_iter().map(Into::into).collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self {
            points,
            closed: true,
        }
    }

    /// Axis-aligned closed rectangle in `plane`, from plane coordinates `min` to `max`.
    pub fn rectangle(plane: &Plane, min: DVec2, max: DVec2) -> Self {
        Self::closed([
            plane.point_at(min.x, min.y),
            plane.point_at(max.x, min.y),
            plane.point_at(max.x, max.y),
            plane.point_at(min.x, max.y),
        ])
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn segments(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        let n = self.points.len();
        let closing = if self.closed && n >= 3 {
            Some((self.points[n - 1], self.points[0]))
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

#[inline]
fn closest_on_segment(p: DVec3, a: DVec3, b: DVec3) -> DVec3 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

#[inline]
fn distance_to_segment_2d(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 == 0.0 {
        0.0
    } else {
        ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
    };
    (a + ab * t).distance(p)
}

impl GeometryOracle for Polyline {
    fn kind(&self) -> GeometryKind {
        if self.points.is_empty() {
            GeometryKind::Unsupported
        } else {
            GeometryKind::Curve {
                closed: self.closed,
            }
        }
    }

    fn closest_point(&self, point: DVec3) -> Option<DVec3> {
        match self.points.len() {
            0 => None,
            1 => Some(self.points[0]),
            _ => self
                .segments()
                .map(|(a, b)| closest_on_segment(point, a, b))
                .min_by(|x, y| x.distance_squared(point).total_cmp(&y.distance_squared(point))),
        }
    }

    fn contains(&self, point: DVec3, plane: &Plane, tolerance: f64) -> PointContainment {
        if !self.closed || self.points.len() < 3 {
            return PointContainment::Outside;
        }

        let p = plane.to_local(point);
        let verts: Vec<DVec2> = self.points.iter().map(|v| plane.to_local(*v)).collect();
        let n = verts.len();

        let mut inside = false;
        for i in 0..n {
            let a = verts[i];
            let b = verts[(i + 1) % n];
            if distance_to_segment_2d(p, a, b) <= tolerance {
                return PointContainment::Coincident;
            }
            // Crossing-number test on a ray toward +x.
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }

        if inside {
            PointContainment::Inside
        } else {
            PointContainment::Outside
        }
    }

    fn is_closed_planar_coplanar(&self, plane: &Plane, tolerance: f64) -> bool {
        self.closed
            && self.points.len() >= 3
            && self
                .points
                .iter()
                .all(|p| plane.signed_distance(*p).abs() <= tolerance)
    }
}
