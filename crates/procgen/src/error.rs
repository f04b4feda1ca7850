//! Errors reported by the path generator.

use thiserror::Error;

use crate::segment::SegmentType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// No player could be resolved when the generator started. The generator disables itself.
    #[error("no player reference available, path generation disabled")]
    MissingPlayerReference,
    /// The geometry library has no entry for the selected segment type.
    #[error("no geometry mapped for {} segments", .0.name())]
    MissingGeometryHandle(SegmentType),
    /// The world refused to instantiate a segment.
    #[error("failed to instantiate {} segment: {reason}", .kind.name())]
    InstantiateFailed { kind: SegmentType, reason: String },
    #[error("invalid path config: {0}")]
    InvalidConfig(String),
    /// Operation attempted on a generator that disabled itself.
    #[error("path generator is disabled")]
    Disabled,
}
