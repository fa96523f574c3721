#![forbid(unsafe_code)]
//! facade_layout: region-driven panel bay reassignment for facade grids.
//!
//! Modules:
//! - geometry: planes, the [`geometry::GeometryOracle`] capability trait and two reference primitives
//! - layout: settings, region metadata, region selection, bay assignment, pattern functions, events
//!
//! The host grid generator calls [`layout::assigner::BayAssigner::assign_bay`] once per cell.
pub mod error;
pub mod geometry;
pub mod layout;

/// Convenient re-exports for common types. Import with `use facade_layout::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{
        GeometryKind, GeometryOracle, Patch, Plane, PointContainment, Polyline,
    };
    pub use crate::layout::assigner::{BayAssigner, LayoutRules, SelectionResult};
    pub use crate::layout::cell::{CellContext, CellGeometry};
    pub use crate::layout::events::{
        EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink,
    };
    pub use crate::layout::filter::BayFilter;
    pub use crate::layout::metadata::{PatternToken, RegionMetadata};
    pub use crate::layout::pattern::{
        PatternFunction, PatternRequest, RandomPattern, SequencePattern,
    };
    pub use crate::layout::region::{ModifierRegion, RegionSource};
    pub use crate::layout::seed::seed_for_cell;
    pub use crate::layout::selector::{falloff_accepts, FlagReason, RegionSelector, RegionVerdict};
    pub use crate::layout::settings::{LayoutSettings, UnitSystem};
    pub use crate::layout::LayoutWarning;
}
