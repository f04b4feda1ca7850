//! Endless track generator.
//!
//! Keeps a window of track segments alive around a moving player: segments that fall far
//! enough behind are despawned from the head of the window, new ones are appended at the
//! tail as the player nears its end. Placement is chained through a cursor, so the window is
//! always one contiguous path.

use std::collections::VecDeque;

use engine_core::Transform;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::PathError;
use crate::path_config::PathConfig;
use crate::placement::compute_placement;
use crate::segment::{GeometryId, GeometryLibrary, Segment, SegmentType};
use crate::selection::SelectionState;

/// Player position and heading sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub position: Vec3,
    /// Unit heading, or zero if the player has none.
    pub forward: Vec3,
}

impl PlayerPose {
    /// `forward` is normalized, so a velocity works as well as a direction.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalize_or_zero(),
        }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.position, transform.forward())
    }

    /// How far the player has moved past `point`, along the player's heading.
    pub fn distance_past(&self, point: Vec3) -> f32 {
        (self.position - point).dot(self.forward)
    }
}

/// The scene the generator builds into.
pub trait TrackWorld {
    /// Opaque handle to an instantiated segment.
    type Handle;

    /// Current player pose, if a player exists.
    fn player_pose(&self) -> Option<PlayerPose>;

    /// Instantiate `geometry` at `transform`.
    fn instantiate(
        &mut self,
        geometry: GeometryId,
        kind: SegmentType,
        transform: Transform,
    ) -> Result<Self::Handle, PathError>;

    /// Release a segment previously returned by `instantiate`.
    fn destroy(&mut self, handle: Self::Handle);
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub despawned: usize,
    pub spawned: usize,
    pub failed_spawns: usize,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStats {
    pub spawned: u64,
    pub despawned: u64,
    pub failed_spawns: u64,
    /// Successful spawns per segment type, in `SegmentType::ALL` order.
    pub emitted: [u64; 5],
}

impl PathStats {
    /// How many segments of `kind` have been spawned.
    pub fn emitted(&self, kind: SegmentType) -> u64 {
        self.emitted[kind.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Idle,
    Running,
    Disabled,
}

/// Generates and recycles track segments around the player.
pub struct PathGenerator<H> {
    config: PathConfig,
    library: GeometryLibrary,
    /// Oldest (furthest behind) first.
    segments: VecDeque<Segment<H>>,
    cursor: Transform,
    selection: SelectionState,
    rng: StdRng,
    status: Status,
    stats: PathStats,
}

impl<H> PathGenerator<H> {
    /// Create a generator. The config is validated here and never changes afterwards.
    pub fn new(config: PathConfig, library: GeometryLibrary, seed: u64) -> Result<Self, PathError> {
        config.validate()?;
        Ok(Self {
            config,
            library,
            segments: VecDeque::new(),
            cursor: Transform::default(),
            selection: SelectionState::default(),
            rng: StdRng::seed_from_u64(seed),
            status: Status::Idle,
            stats: PathStats::default(),
        })
    }

    /// Start the track at `origin` instead of the world origin.
    pub fn with_origin(mut self, origin: Transform) -> Self {
        self.cursor = Transform::from_position_rotation(origin.position, origin.rotation);
        self
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Number of segments the generator keeps alive.
    pub fn target_window(&self) -> usize {
        self.config.target_window()
    }

    /// Active segments, oldest first.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Segment<H>> + '_ {
        self.segments.iter()
    }

    pub fn active_count(&self) -> usize {
        self.segments.len()
    }

    /// Where the next segment will be placed.
    pub fn cursor(&self) -> &Transform {
        &self.cursor
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn stats(&self) -> &PathStats {
        &self.stats
    }

    pub fn is_enabled(&self) -> bool {
        self.status != Status::Disabled
    }

    /// Resolve the player and fill the initial window.
    ///
    /// Without a player the generator disables itself for the rest of the session.
    /// Returns the number of segments alive afterwards.
    pub fn start<W>(&mut self, world: &mut W) -> Result<usize, PathError>
    where
        W: TrackWorld<Handle = H>,
    {
        if self.status == Status::Disabled {
            return Err(PathError::Disabled);
        }
        if world.player_pose().is_none() {
            log::error!("{}", PathError::MissingPlayerReference);
            self.status = Status::Disabled;
            return Err(PathError::MissingPlayerReference);
        }

        let missing = self.library.missing();
        if !missing.is_empty() {
            log::warn!("No geometry mapped for {:?}, those segments will fail to spawn", missing);
        }

        self.status = Status::Running;
        let target = self.target_window();
        let mut report = TickReport::default();
        for _ in 0..target {
            self.spawn_next(world, &mut report);
        }
        log::info!(
            "Track window filled: {}/{} segments ({} failed)",
            self.segments.len(),
            target,
            report.failed_spawns
        );
        Ok(self.segments.len())
    }

    /// Advance the window for the player's current pose.
    ///
    /// Despawns segments the player has left behind (backfilling each one), then spawns
    /// ahead if the player is close to the end of the tail segment. Failures are logged and
    /// counted, never propagated.
    pub fn tick<W>(&mut self, world: &mut W, pose: PlayerPose) -> TickReport
    where
        W: TrackWorld<Handle = H>,
    {
        let mut report = TickReport::default();
        if self.status != Status::Running {
            return report;
        }
        let target = self.target_window();

        // Segments are ordered along the path, so stop at the first one still in range.
        // Distances are projected on the player's current heading, which after a corner no
        // longer follows path order; a segment past the first in-range one may linger until
        // the head goes. Backfilled segments land at the tail and are not examined this tick.
        let despawn_distance = self.config.despawn_distance();
        for _ in 0..self.segments.len() {
            let behind = match self.segments.front() {
                Some(head) => pose.distance_past(head.centerline_start()),
                None => break,
            };
            if behind <= despawn_distance {
                break;
            }
            if let Some(head) = self.segments.pop_front() {
                log::trace!("Despawning {} segment {:.1}m behind", head.kind.name(), behind);
                world.destroy(head.handle);
                report.despawned += 1;
                self.stats.despawned += 1;
            }
            if self.segments.len() < target {
                self.spawn_next(world, &mut report);
            }
        }

        if self.segments.len() < target {
            let due = match self.segments.back() {
                Some(tail) => {
                    let travelled = tail.transform.distance_ahead(pose.position);
                    self.config.segment_length - travelled <= self.config.spawn_trigger_distance
                }
                // Every spawn so far failed; keep retrying at the cursor.
                None => true,
            };
            if due {
                self.spawn_next(world, &mut report);
            }
        }

        report
    }

    /// Destroy every active segment.
    pub fn clear<W>(&mut self, world: &mut W)
    where
        W: TrackWorld<Handle = H>,
    {
        while let Some(segment) = self.segments.pop_front() {
            world.destroy(segment.handle);
            self.stats.despawned += 1;
        }
    }

    fn spawn_next<W>(&mut self, world: &mut W, report: &mut TickReport)
    where
        W: TrackWorld<Handle = H>,
    {
        match self.try_spawn(world) {
            Ok(kind) => {
                report.spawned += 1;
                self.stats.spawned += 1;
                self.stats.emitted[kind.index()] += 1;
            }
            Err(e) => {
                log::error!("{}", e);
                report.failed_spawns += 1;
                self.stats.failed_spawns += 1;
            }
        }
    }

    /// Select, place and instantiate one segment. Cursor and selection state are only
    /// committed once the world has accepted the segment.
    fn try_spawn<W>(&mut self, world: &mut W) -> Result<SegmentType, PathError>
    where
        W: TrackWorld<Handle = H>,
    {
        let selection = self.selection.select(&self.config, &mut self.rng);
        let kind = selection.kind;
        let placement = compute_placement(kind, &self.cursor, &self.config);
        let geometry = self
            .library
            .get(kind)
            .ok_or(PathError::MissingGeometryHandle(kind))?;

        let transform = placement.instance_transform();
        let handle = world.instantiate(geometry, kind, transform)?;
        log::trace!(
            "Spawned {} segment at {:?} ({:?})",
            kind.name(),
            transform.position,
            selection.rule
        );

        self.segments.push_back(Segment {
            kind,
            transform,
            offset: placement.lateral_offset,
            handle,
        });
        self.cursor = placement.next_cursor;
        self.selection = selection.next;
        Ok(kind)
    }
}
