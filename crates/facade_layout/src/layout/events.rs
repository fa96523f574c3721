//! Event types and sinks for observing bay assignment.
//!
//! This module defines [`LayoutEvent`] and a set of sinks to emit, collect or forward
//! events while running [`crate::layout::assigner::BayAssigner`] or
//! [`crate::layout::assigner::LayoutRules::assign`].
use crate::layout::metadata::PatternToken;
use crate::layout::selector::FlagReason;

/// Describes events emitted during bay assignment.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// The shared generator was reseeded.
    AssignerReset {
        seed: u64,
    },

    /// The cell's bay is not in the filter list; nothing was evaluated.
    CellSkipped {
        row: usize,
        column: usize,
        /// Index of the bay the cell keeps.
        bay_index: usize,
    },

    /// A region flagged the cell for reassignment.
    RegionFlagged {
        row: usize,
        column: usize,
        /// 1-based region number.
        region: usize,
        reason: FlagReason,
        /// Distance from the cell center to the region, when measured.
        distance: Option<f64>,
    },

    /// The pattern function was called.
    PatternInvoked {
        row: usize,
        column: usize,
        /// Region that triggered the call, `None` when no regions are configured.
        region: Option<usize>,
        pattern: Option<PatternToken>,
        /// Index returned by the pattern function, before validation.
        returned: usize,
    },

    /// Final result for a cell.
    CellAssigned {
        row: usize,
        column: usize,
        index: usize,
        original_index: usize,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. region number, cell position).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`LayoutEvent`], used to filter what a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    AssignerReset,
    CellSkipped,
    RegionFlagged,
    PatternInvoked,
    CellAssigned,
    Warning,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::AssignerReset { .. } => LayoutEventKind::AssignerReset,
            LayoutEvent::CellSkipped { .. } => LayoutEventKind::CellSkipped,
            LayoutEvent::RegionFlagged { .. } => LayoutEventKind::RegionFlagged,
            LayoutEvent::PatternInvoked { .. } => LayoutEventKind::PatternInvoked,
            LayoutEvent::CellAssigned { .. } => LayoutEventKind::CellAssigned,
            LayoutEvent::Warning { .. } => LayoutEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: LayoutEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: LayoutEvent) {
        let kind = event.kind();
        let mut targets = self.sinks.iter_mut().filter(|s| s.wants(kind)).peekable();
        while let Some(sink) = targets.next() {
            if targets.peek().is_some() {
                sink.send(event.clone());
            } else {
                sink.send(event);
                break;
            }
        }
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
