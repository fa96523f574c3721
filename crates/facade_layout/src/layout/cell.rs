//! Per-cell inputs from the grid generator and the geometry derived from them.
use glam::DVec3;
use tracing::debug;

use crate::geometry::Plane;

/// Inputs for evaluating one grid cell.
///
/// Corners are ordered so that `corners[0]..corners[1]` is the bottom edge and
/// `corners[3]` is diagonally opposite `corners[0]`.
#[derive(Clone, Debug)]
pub struct CellContext<'a, B> {
    pub corners: [DVec3; 4],
    pub row: usize,
    pub column: usize,
    /// Bay index at this cell before any design function changed it.
    pub bay_index: usize,
    /// The generator's unmodified bay list.
    pub default_bays: &'a [B],
}

impl<'a, B> CellContext<'a, B> {
    pub fn new(
        corners: [DVec3; 4],
        row: usize,
        column: usize,
        bay_index: usize,
        default_bays: &'a [B],
    ) -> Self {
        Self {
            corners,
            row,
            column,
            bay_index,
            default_bays,
        }
    }

    /// Builds a context from `mint` points, for hosts that do not use glam.
    pub fn from_mint(
        corners: [mint::Vector3<f64>; 4],
        row: usize,
        column: usize,
        bay_index: usize,
        default_bays: &'a [B],
    ) -> Self {
        Self::new(
            corners.map(DVec3::from),
            row,
            column,
            bay_index,
            default_bays,
        )
    }

    pub fn geometry(&self) -> CellGeometry {
        CellGeometry::from_corners(&self.corners)
    }

    pub(crate) fn context(&self) -> String {
        format!("cell:{},{}", self.row, self.column)
    }
}

/// Center, extents and plane of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellGeometry {
    pub center: DVec3,
    pub width: f64,
    pub height: f64,
    pub plane: Plane,
}

impl CellGeometry {
    pub fn from_corners(corners: &[DVec3; 4]) -> Self {
        let center = corners[0] + (corners[3] - corners[0]) * 0.5;
        let width = corners[0].distance(corners[1]);
        let height = corners[1].distance(corners[3]);
        let plane = Plane::from_points(corners[0], corners[1], corners[2]).unwrap_or_else(|| {
            debug!("Degenerate cell corners; falling back to world XY plane.");
            Plane::world_xy(corners[0])
        });
        Self {
            center,
            width,
            height,
            plane,
        }
    }
}
