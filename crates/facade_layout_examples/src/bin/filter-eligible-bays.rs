use facade_layout::prelude::*;
use facade_layout_examples::{init_tracing, reassigned_count, render_ascii, FacadeGrid};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let grid = FacadeGrid::new(8, 24, 1.5, 3.0);
    let bays = ['a', 'b', 'c', 'd'];

    // No regions: the pattern applies everywhere, but only to bays 1 and 3. Id 0 is
    // rejected with a warning.
    let rules = LayoutRules::<char>::new(
        LayoutSettings::default().with_random_seed(11),
        Some(Box::new(RandomPattern::new(11))),
    )
    .with_filter_ids([0, 1, 3]);

    let mut assigner = BayAssigner::new(rules);
    let mut sink = VecSink::new();
    let mut rows = Vec::new();
    for row in 0..grid.rows {
        let mut line = Vec::new();
        for column in 0..grid.columns {
            let index = column % bays.len();
            let cell = CellContext::new(grid.corners(row, column), row, column, index, &bays);
            line.push(assigner.assign_bay_with_events(&cell, &bays, &bays[index], &mut sink)?);
        }
        rows.push(line);
    }

    println!("{}", render_ascii(&rows, |b| *b));
    info!(
        "Reassigned {} panels, skipped {} ineligible cells.",
        reassigned_count(&rows),
        sink.count(LayoutEventKind::CellSkipped)
    );
    for warning in assigner.take_warnings() {
        info!("Warning: {}", warning);
    }

    Ok(())
}
