//! Common ECS components used across the engine.

/// Tag component for the player entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Forward-running movement state for the player.
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    /// Ground speed in metres per second.
    pub speed: f32,
    /// Distance covered since the run started.
    pub distance: f32,
}

impl Runner {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            distance: 0.0,
        }
    }

    /// Advance by one step and return the distance covered.
    pub fn step(&mut self, dt: f32) -> f32 {
        let covered = self.speed * dt;
        self.distance += covered;
        covered
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Track piece reference component: links an entity to the geometry it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackPiece {
    pub geometry_id: u32,
}

impl TrackPiece {
    pub fn new(geometry_id: u32) -> Self {
        Self { geometry_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_step_accumulates_distance() {
        let mut r = Runner::new(10.0);
        assert_eq!(r.step(0.5), 5.0);
        r.step(0.5);
        assert_eq!(r.distance, 10.0);
    }
}
