use std::time::Duration;

use criterion::{Criterion, Throughput};
use facade_layout::prelude::CellContext;
use glam::DVec3;

pub fn facade_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

/// Throughput in cells per iteration.
pub fn cells(count: usize) -> Throughput {
    Throughput::Elements(count.max(1) as u64)
}

/// Unit cell in the XZ plane at `(column, row)`.
pub fn cell<B>(row: usize, column: usize, default_bays: &[B]) -> CellContext<'_, B> {
    let (x, z) = (column as f64, row as f64);
    let corner = |dx: f64, dz: f64| DVec3::new(x + dx, 0.0, z + dz);
    CellContext::new(
        [corner(0.0, 0.0), corner(1.0, 0.0), corner(0.0, 1.0), corner(1.0, 1.0)],
        row,
        column,
        0,
        default_bays,
    )
}
