//! Scripted runner that follows the generated track.

use engine_core::{Runner, Transform};
use glam::Vec3;
use hecs::{Entity, World};
use procgen::{PathGenerator, Segment};

/// Waypoints the runner may pass within a single step.
const MAX_WAYPOINTS_PER_STEP: usize = 8;

/// Drives the player from segment to segment along the track centerline, stepping into the
/// free half of the lane when a half-lane obstacle is ahead.
#[derive(Debug, Default)]
pub struct Autopilot {
    /// Segment whose waypoint was reached last.
    reached: Option<Entity>,
}

impl Autopilot {
    /// Move the player for one step. Returns the distance covered.
    pub fn step(&mut self, world: &mut World, path: &PathGenerator<Entity>, player: Entity, dt: f32) -> f32 {
        let Ok((transform, runner)) = world.query_one_mut::<(&mut Transform, &mut Runner)>(player) else {
            log::warn!("Autopilot has no runner to drive");
            return 0.0;
        };

        let covered = runner.step(dt);
        let mut budget = covered;
        for _ in 0..MAX_WAYPOINTS_PER_STEP {
            let Some((handle, waypoint)) = self.next_waypoint(path, transform.position) else {
                break;
            };
            let to = waypoint - transform.position;
            let distance = to.length();
            if distance <= budget {
                transform.position = waypoint;
                budget -= distance;
                self.reached = Some(handle);
            } else {
                transform.position += to / distance * budget;
                transform.look_at(waypoint, Vec3::Y);
                break;
            }
        }
        covered
    }

    /// The segment after the one reached last, or the nearest one if that has been despawned.
    fn next_waypoint(&self, path: &PathGenerator<Entity>, position: Vec3) -> Option<(Entity, Vec3)> {
        let mut segments = path.segments();
        let next = match self.reached {
            Some(reached) => {
                if segments.any(|s| s.handle == reached) {
                    segments.next()
                } else {
                    path.segments().min_by(|a, b| {
                        let da = a.centerline_start().distance_squared(position);
                        let db = b.centerline_start().distance_squared(position);
                        da.total_cmp(&db)
                    })
                }
            }
            None => segments.next(),
        }?;
        Some((next.handle, dodge_point(next)))
    }
}

/// Where to aim for a segment: its centerline start, mirrored across it for half-lane
/// obstacles so the runner ends up in the free half.
fn dodge_point(segment: &Segment<Entity>) -> Vec3 {
    segment.centerline_start() - segment.offset
}
