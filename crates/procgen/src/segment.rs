//! Track segment types and the geometry they are built from.

use std::collections::HashMap;

use engine_core::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The closed set of track pieces the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentType {
    Straight,
    LeftCorner,
    RightCorner,
    /// Straight piece with an obstacle filling the left half of the lane.
    HalfLaneLeft,
    /// Straight piece with an obstacle filling the right half of the lane.
    HalfLaneRight,
}

impl SegmentType {
    pub const ALL: [SegmentType; 5] = [
        SegmentType::Straight,
        SegmentType::LeftCorner,
        SegmentType::RightCorner,
        SegmentType::HalfLaneLeft,
        SegmentType::HalfLaneRight,
    ];

    /// Position in `SegmentType::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_corner(self) -> bool {
        matches!(self, SegmentType::LeftCorner | SegmentType::RightCorner)
    }

    /// Which half of the lane this piece blocks, if it is a lane obstacle.
    pub fn lane_side(self) -> Option<LaneSide> {
        match self {
            SegmentType::HalfLaneLeft => Some(LaneSide::Left),
            SegmentType::HalfLaneRight => Some(LaneSide::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SegmentType::Straight => "straight",
            SegmentType::LeftCorner => "left corner",
            SegmentType::RightCorner => "right corner",
            SegmentType::HalfLaneLeft => "half lane left",
            SegmentType::HalfLaneRight => "half lane right",
        }
    }
}

/// Side of the lane occupied by a half-lane obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneSide {
    Left,
    Right,
}

impl LaneSide {
    pub fn opposite(self) -> Self {
        match self {
            LaneSide::Left => LaneSide::Right,
            LaneSide::Right => LaneSide::Left,
        }
    }

    /// The half-lane segment type that blocks this side.
    pub fn segment_type(self) -> SegmentType {
        match self {
            LaneSide::Left => SegmentType::HalfLaneLeft,
            LaneSide::Right => SegmentType::HalfLaneRight,
        }
    }
}

/// Opaque id of the geometry (prefab/mesh) a segment type is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeometryId(pub u32);

/// Mapping from segment type to the geometry that represents it.
#[derive(Debug, Clone, Default)]
pub struct GeometryLibrary {
    entries: HashMap<SegmentType, GeometryId>,
}

impl GeometryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with every segment type mapped, ids assigned in `SegmentType::ALL` order.
    pub fn with_defaults() -> Self {
        let entries = SegmentType::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| (*kind, GeometryId(i as u32)))
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, kind: SegmentType, geometry: GeometryId) -> Option<GeometryId> {
        self.entries.insert(kind, geometry)
    }

    pub fn remove(&mut self, kind: SegmentType) -> Option<GeometryId> {
        self.entries.remove(&kind)
    }

    pub fn get(&self, kind: SegmentType) -> Option<GeometryId> {
        self.entries.get(&kind).copied()
    }

    /// Segment types with no geometry mapped.
    pub fn missing(&self) -> Vec<SegmentType> {
        SegmentType::ALL
            .iter()
            .copied()
            .filter(|kind| !self.entries.contains_key(kind))
            .collect()
    }
}

/// A live piece of track, owned by the generator's active window.
#[derive(Debug, Clone)]
pub struct Segment<H> {
    pub kind: SegmentType,
    /// World transform the piece was instantiated with (lateral offset included).
    pub transform: Transform,
    /// Sideways shift from the track centerline, non-zero for half-lane obstacles.
    pub offset: Vec3,
    /// Handle returned by the world when the piece was instantiated.
    pub handle: H,
}

impl<H> Segment<H> {
    /// Point on the track centerline where this segment starts.
    pub fn centerline_start(&self) -> Vec3 {
        self.transform.position - self.offset
    }
}
