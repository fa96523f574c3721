//! Region proximity tests and edge falloff blending.
//!
//! [`RegionSelector::evaluate`] decides whether one cell is flagged by one region:
//! 1. Closed planar curves lying in the cell plane flag every cell whose center is inside
//!    or on the curve. This takes precedence over everything else.
//! 2. Open curves flag cells whose center lies within half the cell width and height of
//!    the curve's closest point.
//! 3. Surfaces flag cells whose center is within tolerance plus the region distance
//!    threshold.
//! 4. Otherwise, with a positive falloff, a random draw may still flag the cell based on
//!    its distance to the region ([`falloff_accepts`]).
//!
//! A region falloff of -1 (or less) keeps only the containment test of step 1.
use glam::DVec3;
use tracing::trace;

use crate::geometry::GeometryKind;
use crate::layout::cell::CellGeometry;
use crate::layout::metadata::PatternToken;
use crate::layout::region::ModifierRegion;
use crate::layout::settings::LayoutSettings;
use crate::layout::FALLOFF_SKIP_GRADIENT;

/// Which test flagged a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagReason {
    /// Center inside or on a closed coplanar curve.
    Contained,
    /// Center within the half-extents of the cell from an open curve.
    CurveFootprint,
    /// Center within the distance threshold of a surface.
    SurfaceProximity,
    /// Accepted by the random falloff blend.
    FalloffBlend,
}

/// Outcome of evaluating one region against one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionVerdict<'r> {
    pub reason: Option<FlagReason>,
    /// Falloff used for this region after applying its override.
    pub falloff: f64,
    /// Pattern token from the region metadata, if any.
    pub pattern: Option<&'r PatternToken>,
    /// Distance from the cell center to the region, when it was measured.
    pub distance: Option<f64>,
}

impl RegionVerdict<'_> {
    #[inline]
    pub fn flagged(&self) -> bool {
        self.reason.is_some()
    }
}

/// Both falloff acceptance tests for a draw `r` in [0, 1).
///
/// The second term is an empirically tuned edge dither kept as-is; it has no
/// closed-form probability model.
#[inline]
pub fn falloff_accepts(r: f64, distance: f64, falloff: f64) -> bool {
    r > distance / falloff || r > distance - falloff / r / 15.0
}

/// Evaluates regions against cells using thresholds from [`LayoutSettings`].
#[derive(Clone, Copy, Debug)]
pub struct RegionSelector {
    pub global_falloff: f64,
    pub distance_threshold: f64,
    pub tolerance: f64,
}

impl RegionSelector {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            global_falloff: settings.falloff,
            distance_threshold: settings.region_distance_threshold(),
            tolerance: settings.tolerance(),
        }
    }

    /// Evaluates `region` for `cell`. `r` is the cell's base random draw and is only
    /// consulted by the falloff blend.
    pub fn evaluate<'r>(
        &self,
        region: &'r ModifierRegion,
        cell: &CellGeometry,
        r: f64,
    ) -> RegionVerdict<'r> {
        let falloff = region.metadata.resolved_falloff(self.global_falloff);
        let mut verdict = RegionVerdict {
            reason: None,
            falloff,
            pattern: region.metadata.pattern.as_ref(),
            distance: None,
        };

        let kind = region.geometry.kind();
        let tol = self.tolerance;

        if let GeometryKind::Curve { .. } = kind {
            if region.geometry.is_closed_planar_coplanar(&cell.plane, tol)
                && region
                    .geometry
                    .contains(cell.center, &cell.plane, tol)
                    .is_enclosed()
            {
                verdict.reason = Some(FlagReason::Contained);
                return verdict;
            }
        }

        if falloff <= FALLOFF_SKIP_GRADIENT {
            trace!("{}: gradient check skipped.", region.context());
            return verdict;
        }

        let distance = match kind {
            GeometryKind::Curve { closed } => {
                let Some(cp) = region.geometry.closest_point(cell.center) else {
                    return verdict;
                };
                if !closed && within_footprint(cp, cell, tol) {
                    verdict.reason = Some(FlagReason::CurveFootprint);
                }
                cp.distance(cell.center)
            }
            GeometryKind::Surface => {
                let Some(cp) = region.geometry.closest_point(cell.center) else {
                    return verdict;
                };
                let distance = cp.distance(cell.center);
                if distance < tol + self.distance_threshold {
                    verdict.reason = Some(FlagReason::SurfaceProximity);
                }
                distance
            }
            GeometryKind::Unsupported => return verdict,
        };
        verdict.distance = Some(distance);

        if verdict.reason.is_none() && falloff > 0.0 && falloff_accepts(r, distance, falloff) {
            verdict.reason = Some(FlagReason::FalloffBlend);
        }

        trace!(
            "{}: distance {:.4}, falloff {}, reason {:?}.",
            region.context(),
            distance,
            falloff,
            verdict.reason
        );
        verdict
    }
}

/// Height offset along world Z and horizontal offset, each padded by `tol`, must stay
/// under half the cell height and width.
fn within_footprint(closest: DVec3, cell: &CellGeometry, tol: f64) -> bool {
    let center = cell.center;
    let height_offset = (closest.z - center.z).abs() + tol;
    let width_offset = closest.distance(DVec3::new(center.x, center.y, closest.z)) + tol;
    height_offset < cell.height / 2.0 && width_offset < cell.width / 2.0
}
