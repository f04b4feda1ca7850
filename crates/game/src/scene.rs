//! ECS scene the track is built into.

use engine_core::{Player, Runner, TrackPiece, Transform};
use hecs::{Entity, World};
use procgen::{GeometryId, PathError, PlayerPose, SegmentType, TrackWorld};

/// Owns the hecs world holding the player and every live track piece.
pub struct TrackScene {
    pub world: World,
}

impl Default for TrackScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackScene {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    /// Spawn the runner.
    pub fn spawn_player(&mut self, transform: Transform, speed: f32) -> Entity {
        self.world.spawn((transform, Player, Runner::new(speed)))
    }

    /// Number of track pieces currently in the world.
    pub fn track_piece_count(&self) -> usize {
        self.world.query::<&TrackPiece>().iter().count()
    }
}

impl TrackWorld for TrackScene {
    type Handle = Entity;

    fn player_pose(&self) -> Option<PlayerPose> {
        let mut query = self.world.query::<(&Transform, &Player)>();
        let pose = query
            .iter()
            .next()
            .map(|(_, (transform, _))| PlayerPose::from_transform(transform));
        pose
    }

    fn instantiate(
        &mut self,
        geometry: GeometryId,
        kind: SegmentType,
        transform: Transform,
    ) -> Result<Entity, PathError> {
        Ok(self.world.spawn((transform, kind, TrackPiece::new(geometry.0))))
    }

    fn destroy(&mut self, handle: Entity) {
        if self.world.despawn(handle).is_err() {
            log::warn!("Track piece {:?} was already gone", handle);
        }
    }
}
