//! Where a segment goes and where the one after it starts.

use std::f32::consts::FRAC_PI_2;

use engine_core::Transform;
use glam::Vec3;

use crate::path_config::PathConfig;
use crate::segment::{LaneSide, SegmentType};

/// Result of placing one segment at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Centerline transform of the segment (the cursor it was placed at).
    pub spawn: Transform,
    /// Sideways shift applied when instantiating half-lane obstacles.
    pub lateral_offset: Vec3,
    /// Cursor for the segment after this one.
    pub next_cursor: Transform,
}

impl Placement {
    /// Transform the geometry is instantiated with.
    pub fn instance_transform(&self) -> Transform {
        Transform::from_position_rotation(self.spawn.position + self.lateral_offset, self.spawn.rotation)
    }
}

/// Yaw applied by a segment type. Left turns are positive.
pub fn turn_angle(kind: SegmentType) -> f32 {
    match kind {
        SegmentType::LeftCorner => FRAC_PI_2,
        SegmentType::RightCorner => -FRAC_PI_2,
        _ => 0.0,
    }
}

/// Place a segment of `kind` at `cursor`.
///
/// Straights and half-lanes advance the cursor one `segment_length` along its heading.
/// Corners advance `corner_depth_offset` to the pivot, turn, then advance
/// `corner_width_offset` along the new heading.
pub fn compute_placement(kind: SegmentType, cursor: &Transform, config: &PathConfig) -> Placement {
    let spawn = Transform::from_position_rotation(cursor.position, cursor.rotation);

    let next_cursor = if kind.is_corner() {
        let turned = spawn.yawed(turn_angle(kind));
        Transform::from_position_rotation(
            spawn.position + spawn.forward() * config.corner_depth_offset
                + turned.forward() * config.corner_width_offset,
            turned.rotation,
        )
    } else {
        spawn.advanced(config.segment_length)
    };

    let lateral_offset = match kind.lane_side() {
        Some(LaneSide::Left) => spawn.left() * config.side_alignment_offset,
        Some(LaneSide::Right) => spawn.right() * config.side_alignment_offset,
        None => Vec3::ZERO,
    };

    Placement {
        spawn,
        lateral_offset,
        next_cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PathConfig {
        PathConfig {
            segment_length: 10.0,
            corner_depth_offset: 4.0,
            corner_width_offset: 6.0,
            side_alignment_offset: 1.5,
            ..Default::default()
        }
    }

    #[test]
    fn straight_advances_one_length() {
        let p = compute_placement(SegmentType::Straight, &Transform::default(), &config());
        assert!(p.next_cursor.position.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-5));
        assert_eq!(p.next_cursor.rotation, p.spawn.rotation);
        assert_eq!(p.lateral_offset, Vec3::ZERO);
    }

    #[test]
    fn half_lanes_shift_instance_but_not_cursor() {
        let c = config();
        let left = compute_placement(SegmentType::HalfLaneLeft, &Transform::default(), &c);
        let right = compute_placement(SegmentType::HalfLaneRight, &Transform::default(), &c);
        assert!(left.lateral_offset.abs_diff_eq(Vec3::new(-1.5, 0.0, 0.0), 1e-5));
        assert!(right.lateral_offset.abs_diff_eq(Vec3::new(1.5, 0.0, 0.0), 1e-5));
        assert!(left.instance_transform().position.abs_diff_eq(Vec3::new(-1.5, 0.0, 0.0), 1e-5));
        assert!(left.next_cursor.position.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-5));
        assert_eq!(left.next_cursor, right.next_cursor);
    }

    #[test]
    fn left_corner_turns_left() {
        let p = compute_placement(SegmentType::LeftCorner, &Transform::default(), &config());
        // 4 forward to the pivot, then 6 along the new heading (-X).
        assert!(p.next_cursor.position.abs_diff_eq(Vec3::new(-6.0, 0.0, -4.0), 1e-5));
        assert!(p.next_cursor.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn right_corner_mirrors_left() {
        let p = compute_placement(SegmentType::RightCorner, &Transform::default(), &config());
        assert!(p.next_cursor.position.abs_diff_eq(Vec3::new(6.0, 0.0, -4.0), 1e-5));
        assert!(p.next_cursor.forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn chained_placements_follow_the_turned_heading() {
        let c = config();
        let corner = compute_placement(SegmentType::RightCorner, &Transform::default(), &c);
        let straight = compute_placement(SegmentType::Straight, &corner.next_cursor, &c);
        assert!(straight.next_cursor.position.abs_diff_eq(Vec3::new(16.0, 0.0, -4.0), 1e-4));
        let lane = compute_placement(SegmentType::HalfLaneRight, &corner.next_cursor, &c);
        // Right of a +X heading is +Z.
        assert!(lane.lateral_offset.abs_diff_eq(Vec3::new(0.0, 0.0, 1.5), 1e-5));
    }

    #[test]
    fn four_left_corners_close_the_loop() {
        let c = config();
        let mut cursor = Transform::default();
        for _ in 0..4 {
            cursor = compute_placement(SegmentType::LeftCorner, &cursor, &c).next_cursor;
        }
        assert!(cursor.position.abs_diff_eq(Vec3::ZERO, 1e-4));
        assert!(cursor.forward().abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }
}
