#![forbid(unsafe_code)]
//! Shared helpers for the facade_layout example binaries.
use facade_layout::prelude::*;
use glam::DVec3;

/// Installs a `tracing` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// A flat facade in the XZ plane split into equal panels.
#[derive(Clone, Copy, Debug)]
pub struct FacadeGrid {
    pub rows: usize,
    pub columns: usize,
    pub panel_width: f64,
    pub panel_height: f64,
}

impl FacadeGrid {
    pub fn new(rows: usize, columns: usize, panel_width: f64, panel_height: f64) -> Self {
        Self {
            rows,
            columns,
            panel_width,
            panel_height,
        }
    }

    /// The facade plane: x along the facade, y up.
    pub fn plane(&self) -> Plane {
        Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Z).unwrap_or(Plane::world_xy(DVec3::ZERO))
    }

    /// Corners of the panel at `(row, column)`, bottom edge first.
    pub fn corners(&self, row: usize, column: usize) -> [DVec3; 4] {
        let x = column as f64 * self.panel_width;
        let z = row as f64 * self.panel_height;
        [
            DVec3::new(x, 0.0, z),
            DVec3::new(x + self.panel_width, 0.0, z),
            DVec3::new(x, 0.0, z + self.panel_height),
            DVec3::new(x + self.panel_width, 0.0, z + self.panel_height),
        ]
    }

    /// Runs every cell through `assigner`, bottom row first.
    ///
    /// `base_index` gives the generator's bay index for each cell, wrapped to the bay count.
    pub fn assign<B: Clone + PartialEq>(
        &self,
        assigner: &mut BayAssigner<B>,
        bays: &[B],
        base_index: impl Fn(usize, usize) -> usize,
    ) -> facade_layout::error::Result<Vec<Vec<SelectionResult<B>>>> {
        let mut rows = Vec::with_capacity(self.rows);
        if bays.is_empty() {
            return Ok(rows);
        }
        for row in 0..self.rows {
            let mut line = Vec::with_capacity(self.columns);
            for column in 0..self.columns {
                let index = base_index(row, column) % bays.len();
                let cell = CellContext::new(self.corners(row, column), row, column, index, bays);
                line.push(assigner.assign_bay(&cell, bays, &bays[index])?);
            }
            rows.push(line);
        }
        Ok(rows)
    }
}

/// Renders results top row first, one character per cell. Reassigned cells are upper case.
pub fn render_ascii<B>(rows: &[Vec<SelectionResult<B>>], glyph: impl Fn(&B) -> char) -> String {
    let mut out = String::new();
    for line in rows.iter().rev() {
        for result in line {
            let c = glyph(&result.bay);
            out.push(if result.is_reassigned() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            });
        }
        out.push('\n');
    }
    out
}

/// Number of reassigned cells.
pub fn reassigned_count<B>(rows: &[Vec<SelectionResult<B>>]) -> usize {
    rows.iter()
        .flatten()
        .filter(|r| r.is_reassigned())
        .count()
}
