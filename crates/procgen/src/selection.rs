//! Next-segment selection: a fixed priority chain over a small piece of state.
//!
//! In order, first match wins:
//! 1. forced straights at the start of a run,
//! 2. continuation of an unfinished lane-obstacle run,
//! 3. straights after a corner until `min_straight_after_turn` is met,
//! 4. a weighted draw, never picking the half-lane opposite to the one just emitted.
//!
//! Selection never mutates the current state; it returns the state to commit once the
//! segment has actually been placed, so a failed spawn leaves the chain untouched.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::path_config::PathConfig;
use crate::segment::{LaneSide, SegmentType};

/// A streak of same-type lane obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceRun {
    pub kind: SegmentType,
    /// Segments of this run emitted so far, `1..=sequence_length`.
    pub emitted: usize,
}

/// Which link of the priority chain produced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRule {
    ForcedStraight,
    SequenceRun,
    MinStraightGuard,
    FreeChoice,
}

/// Bookkeeping behind segment selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// Straight segments emitted since the last corner.
    pub straight_since_turn: usize,
    /// Current or most recently finished lane-obstacle run.
    pub run: Option<SequenceRun>,
    /// Side of the last emitted lane obstacle, cleared by any other segment.
    pub last_lane_side: Option<LaneSide>,
    /// Forced straights emitted at the start of the run.
    pub forced_emitted: usize,
}

/// Outcome of one selection: the chosen type and the state to commit after placing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub kind: SegmentType,
    pub rule: SelectionRule,
    pub next: SelectionState,
}

impl SelectionState {
    /// Whether a lane-obstacle run is still short of `sequence_length`.
    pub fn run_in_progress(&self, config: &PathConfig) -> Option<SequenceRun> {
        self.run.filter(|run| run.emitted < config.sequence_length)
    }

    /// Pick the next segment type.
    pub fn select<R: Rng + ?Sized>(&self, config: &PathConfig, rng: &mut R) -> Selection {
        let mut next = *self;

        let (kind, rule) = if self.forced_emitted < config.forced_straight_count {
            next.forced_emitted += 1;
            (SegmentType::Straight, SelectionRule::ForcedStraight)
        } else if let Some(run) = self.run_in_progress(config) {
            (run.kind, SelectionRule::SequenceRun)
        } else if self.straight_since_turn < config.min_straight_after_turn {
            (SegmentType::Straight, SelectionRule::MinStraightGuard)
        } else {
            (self.draw(config, rng), SelectionRule::FreeChoice)
        };

        next.record(kind, config);
        Selection { kind, rule, next }
    }

    fn draw<R: Rng + ?Sized>(&self, config: &PathConfig, rng: &mut R) -> SegmentType {
        let weights = config.weights.for_draw(self.last_lane_side);
        match WeightedIndex::new(weights) {
            Ok(dist) => SegmentType::ALL[dist.sample(rng)],
            Err(e) => {
                log::warn!("Segment weights unusable ({}), falling back to straight", e);
                SegmentType::Straight
            }
        }
    }

    fn record(&mut self, kind: SegmentType, config: &PathConfig) {
        match kind.lane_side() {
            Some(side) => {
                let emitted = match self.run_in_progress(config) {
                    Some(run) if run.kind == kind => run.emitted + 1,
                    _ => 1,
                };
                self.run = Some(SequenceRun { kind, emitted });
                self.last_lane_side = Some(side);
            }
            None => {
                self.run = None;
                self.last_lane_side = None;
                if kind.is_corner() {
                    self.straight_since_turn = 0;
                } else {
                    self.straight_since_turn += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_config::SegmentWeights;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario_config() -> PathConfig {
        PathConfig {
            forced_straight_count: 5,
            min_straight_after_turn: 4,
            sequence_length: 3,
            ..Default::default()
        }
    }

    fn generate(config: &PathConfig, seed: u64, count: usize) -> Vec<(Selection, SelectionState)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = SelectionState::default();
        (0..count)
            .map(|_| {
                let s = state.select(config, &mut rng);
                state = s.next;
                (s, state)
            })
            .collect()
    }

    #[test]
    fn first_spawns_are_forced_straight() {
        let config = PathConfig {
            weights: SegmentWeights {
                straight: 0.0,
                ..Default::default()
            },
            ..scenario_config()
        };
        for seed in 0..20 {
            let picks = generate(&config, seed, 6);
            for (s, _) in &picks[..5] {
                assert_eq!(s.kind, SegmentType::Straight);
                assert_eq!(s.rule, SelectionRule::ForcedStraight);
            }
            assert_ne!(picks[5].0.rule, SelectionRule::ForcedStraight);
            assert_eq!(picks[5].1.forced_emitted, 5);
        }
    }

    #[test]
    fn corners_are_separated_by_min_straights() {
        let config = scenario_config();
        for seed in 0..10 {
            let kinds: Vec<_> = generate(&config, seed, 5000).iter().map(|(s, _)| s.kind).collect();
            let corners: Vec<usize> = (0..kinds.len()).filter(|&i| kinds[i].is_corner()).collect();
            assert!(!corners.is_empty());
            for pair in corners.windows(2) {
                let straights = kinds[pair[0] + 1..pair[1]]
                    .iter()
                    .filter(|k| **k == SegmentType::Straight)
                    .count();
                assert!(straights >= config.min_straight_after_turn, "seed {seed}: {straights} straights");
            }
        }
    }

    #[test]
    fn opposite_half_lanes_never_touch() {
        let config = scenario_config();
        for seed in 0..10 {
            let kinds: Vec<_> = generate(&config, seed, 5000).iter().map(|(s, _)| s.kind).collect();
            for pair in kinds.windows(2) {
                let swap = matches!(
                    (pair[0], pair[1]),
                    (SegmentType::HalfLaneLeft, SegmentType::HalfLaneRight)
                        | (SegmentType::HalfLaneRight, SegmentType::HalfLaneLeft)
                );
                assert!(!swap, "seed {seed}: {:?}", pair);
            }
        }
    }

    #[test]
    fn runs_fill_to_sequence_length() {
        let config = scenario_config();
        let picks = generate(&config, 7, 5000);
        let mut checked = 0;
        for (i, (s, after)) in picks.iter().enumerate() {
            if let Some(run) = after.run {
                assert!(run.emitted <= config.sequence_length);
            }
            let starts_run = s.rule == SelectionRule::FreeChoice && s.kind.lane_side().is_some();
            if starts_run && i + config.sequence_length <= picks.len() {
                for (follow, _) in &picks[i + 1..i + config.sequence_length] {
                    assert_eq!(follow.kind, s.kind);
                    assert_eq!(follow.rule, SelectionRule::SequenceRun);
                }
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn corner_resets_straight_count_and_lane_memory() {
        let config = scenario_config();
        let mut state = SelectionState {
            straight_since_turn: 9,
            run: Some(SequenceRun {
                kind: SegmentType::HalfLaneLeft,
                emitted: 3,
            }),
            last_lane_side: Some(LaneSide::Left),
            forced_emitted: 5,
        };
        state.record(SegmentType::RightCorner, &config);
        assert_eq!(state.straight_since_turn, 0);
        assert_eq!(state.run, None);
        assert_eq!(state.last_lane_side, None);
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = PathConfig::default();
        let a: Vec<_> = generate(&config, 42, 500).iter().map(|(s, _)| s.kind).collect();
        let b: Vec<_> = generate(&config, 42, 500).iter().map(|(s, _)| s.kind).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn select_does_not_touch_current_state() {
        let config = scenario_config();
        let state = SelectionState::default();
        let mut rng = StdRng::seed_from_u64(1);
        let s = state.select(&config, &mut rng);
        assert_eq!(state, SelectionState::default());
        assert_eq!(s.next.forced_emitted, 1);
    }
}
