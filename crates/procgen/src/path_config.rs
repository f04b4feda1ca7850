//! Tuning for the endless track generator.

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::segment::{LaneSide, SegmentType};

/// Relative weights of each segment type in the free-choice draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentWeights {
    pub straight: f32,
    pub left_corner: f32,
    pub right_corner: f32,
    pub half_lane_left: f32,
    pub half_lane_right: f32,
}

impl Default for SegmentWeights {
    fn default() -> Self {
        Self {
            straight: 3.0,
            left_corner: 1.0,
            right_corner: 1.0,
            half_lane_left: 1.0,
            half_lane_right: 1.0,
        }
    }
}

impl SegmentWeights {
    pub fn weight(&self, kind: SegmentType) -> f32 {
        match kind {
            SegmentType::Straight => self.straight,
            SegmentType::LeftCorner => self.left_corner,
            SegmentType::RightCorner => self.right_corner,
            SegmentType::HalfLaneLeft => self.half_lane_left,
            SegmentType::HalfLaneRight => self.half_lane_right,
        }
    }

    /// Weights for one draw, in `SegmentType::ALL` order, with the half-lane opposite to
    /// `last_side` zeroed out.
    pub fn for_draw(&self, last_side: Option<LaneSide>) -> [f32; 5] {
        let excluded = last_side.map(|side| side.opposite().segment_type());
        SegmentType::ALL.map(|kind| {
            if Some(kind) == excluded {
                0.0
            } else {
                self.weight(kind)
            }
        })
    }
}

/// Configuration for path generation. Validated once and then treated as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Length of one straight piece along its forward axis.
    pub segment_length: f32,
    /// Segments kept alive ahead of the player.
    pub visible_ahead: usize,
    /// Segments kept alive behind the player before they are despawned.
    pub behind_buffer: usize,
    /// Obstacle-free straights emitted at the start of a run.
    pub forced_straight_count: usize,
    /// Straights required after a corner before another free choice.
    pub min_straight_after_turn: usize,
    /// Maximum run length of same-side lane obstacles.
    pub sequence_length: usize,
    /// Forward distance from a corner's entry to its pivot.
    pub corner_depth_offset: f32,
    /// Distance from the pivot to the corner's exit, along the new heading.
    pub corner_width_offset: f32,
    /// Sideways shift that aligns half-lane obstacles to one half of the lane.
    pub side_alignment_offset: f32,
    /// Spawn ahead once the player is this close to the end of the tail segment.
    pub spawn_trigger_distance: f32,
    /// Extra distance past the behind buffer before a segment is despawned.
    pub despawn_slack: f32,
    pub weights: SegmentWeights,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            segment_length: 10.0,
            visible_ahead: 10,
            behind_buffer: 2,
            forced_straight_count: 5,
            min_straight_after_turn: 4,
            sequence_length: 3,
            corner_depth_offset: 5.0,
            corner_width_offset: 5.0,
            side_alignment_offset: 1.5,
            spawn_trigger_distance: 3.0,
            despawn_slack: 5.0,
            weights: SegmentWeights::default(),
        }
    }
}

impl PathConfig {
    /// Number of segments the generator tries to keep alive.
    pub fn target_window(&self) -> usize {
        self.visible_ahead + self.behind_buffer + self.forced_straight_count
    }

    /// Distance behind the player past which the head segment is despawned.
    pub fn despawn_distance(&self) -> f32 {
        self.behind_buffer as f32 * self.segment_length + self.despawn_slack
    }

    pub fn validate(&self) -> Result<(), PathError> {
        fn invalid(msg: impl Into<String>) -> Result<(), PathError> {
            Err(PathError::InvalidConfig(msg.into()))
        }

        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return invalid(format!("segment_length must be positive, got {}", self.segment_length));
        }
        if self.target_window() == 0 {
            return invalid("target window is empty (visible_ahead + behind_buffer + forced_straight_count == 0)");
        }
        if self.sequence_length == 0 {
            return invalid("sequence_length must be at least 1");
        }
        if !(0.0..=self.segment_length).contains(&self.spawn_trigger_distance) {
            return invalid(format!(
                "spawn_trigger_distance {} outside [0, {}]",
                self.spawn_trigger_distance, self.segment_length
            ));
        }
        let distances = [
            ("corner_depth_offset", self.corner_depth_offset),
            ("corner_width_offset", self.corner_width_offset),
            ("side_alignment_offset", self.side_alignment_offset),
            ("despawn_slack", self.despawn_slack),
        ];
        for (name, value) in distances {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} must be a non-negative distance, got {value}"));
            }
        }
        for kind in SegmentType::ALL {
            let w = self.weights.weight(kind);
            if !(w.is_finite() && w >= 0.0) {
                return invalid(format!("weight for {} must be non-negative, got {w}", kind.name()));
            }
        }
        for last_side in [None, Some(LaneSide::Left), Some(LaneSide::Right)] {
            if self.weights.for_draw(last_side).iter().sum::<f32>() <= 0.0 {
                return invalid("segment weights leave nothing to draw from");
            }
        }
        Ok(())
    }
}
