//! Modifier regions and their construction from host inputs.
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::Error;
use crate::geometry::{GeometryKind, GeometryOracle};
use crate::layout::metadata::RegionMetadata;
use crate::layout::LayoutWarning;

/// One host-supplied region before validation.
#[derive(Clone, Default)]
pub struct RegionSource {
    /// Resolved geometry, or `None` when the host reference could not be resolved.
    pub geometry: Option<Arc<dyn GeometryOracle>>,
    /// Free-text metadata, e.g. `FALLOFF=2/PATTERN=[1,2]`.
    pub metadata: Option<String>,
    /// Optional display label used in diagnostics.
    pub label: Option<String>,
}

impl RegionSource {
    pub fn new<G: GeometryOracle + 'static>(geometry: G) -> Self {
        Self {
            geometry: Some(Arc::new(geometry)),
            metadata: None,
            label: None,
        }
    }

    /// Placeholder for a host reference that failed to resolve.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Validated region geometry with parsed overrides.
#[derive(Clone)]
pub struct ModifierRegion {
    /// 1-based position in the input list.
    pub number: usize,
    pub label: Option<String>,
    pub geometry: Arc<dyn GeometryOracle>,
    pub metadata: RegionMetadata,
}

impl ModifierRegion {
    pub fn new(number: usize, geometry: Arc<dyn GeometryOracle>, metadata: RegionMetadata) -> Self {
        Self {
            number,
            label: None,
            geometry,
            metadata,
        }
    }

    /// Context string used for warnings and events.
    pub fn context(&self) -> String {
        match &self.label {
            Some(label) => format!("region:{} ({label})", self.number),
            None => format!("region:{}", self.number),
        }
    }
}

impl fmt::Debug for ModifierRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierRegion")
            .field("number", &self.number)
            .field("label", &self.label)
            .field("kind", &self.geometry.kind())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Validates `sources` in order, numbering them from `first_number`.
///
/// Unresolved sources are dropped; every problem becomes a warning.
pub fn build_regions(
    sources: Vec<RegionSource>,
    first_number: usize,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec<ModifierRegion> {
    let mut regions = Vec::with_capacity(sources.len());
    for (index, source) in sources.into_iter().enumerate() {
        let number = first_number + index;
        let Some(geometry) = source.geometry else {
            let err = Error::InvalidRegion { number };
            warn!("{}.", err);
            warnings.push(LayoutWarning::new("regions", err.to_string()));
            continue;
        };

        let (metadata, errors) = source
            .metadata
            .as_deref()
            .map(RegionMetadata::parse)
            .unwrap_or_default();

        let mut region = ModifierRegion::new(number, geometry, metadata);
        region.label = source.label;
        for err in errors {
            warn!("Region {}: {}.", number, err);
            warnings.push(LayoutWarning::new(region.context(), err.to_string()));
        }
        if region.geometry.kind() == GeometryKind::Unsupported {
            warn!("Region {} has unsupported geometry; it will be skipped.", number);
            warnings.push(LayoutWarning::new(
                region.context(),
                "unsupported geometry type; region has no effect",
            ));
        }
        regions.push(region);
    }
    regions
}
