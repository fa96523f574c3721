use facade_layout::prelude::*;
use facade_layout_examples::{init_tracing, reassigned_count, render_ascii, FacadeGrid};
use glam::DVec2;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 12 x 30 panels of 1.2 m x 3.5 m.
    let grid = FacadeGrid::new(12, 30, 1.2, 3.5);
    let bays = ['a', 'b', 'c', 'd'];

    // A closed outline drawn on the facade: every panel inside gets bay 'c'.
    let outline = Polyline::rectangle(
        &grid.plane(),
        DVec2::new(6.0, 7.0),
        DVec2::new(24.0, 28.0),
    );

    let rules = LayoutRules::<char>::try_new(
        LayoutSettings::new(UnitSystem::Meters),
        Some(Box::new(SequencePattern::new(vec![1]))),
    )?
    .with_regions(vec![RegionSource::new(outline)
        .with_metadata("PATTERN=3")
        .with_label("atrium")]);

    let mut assigner = BayAssigner::new(rules);
    let rows = grid.assign(&mut assigner, &bays, |_, _| 0)?;

    println!("{}", render_ascii(&rows, |b| *b));
    info!("Reassigned {} panels.", reassigned_count(&rows));
    for warning in assigner.warnings() {
        info!("Warning: {}", warning);
    }

    Ok(())
}
