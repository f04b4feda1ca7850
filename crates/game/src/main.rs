//! Track runner - headless endless-runner simulation over the procedural track generator.

mod config;
mod player;
mod scene;

use anyhow::{Context, Result};
use engine_core::{FixedStep, Runner, Transform};
use procgen::{GeometryLibrary, PathGenerator, SegmentType, TrackWorld};
use std::time::Duration;

use config::RunnerConfig;
use player::Autopilot;
use scene::TrackScene;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunnerConfig::load();
    log::info!(
        "Starting track runner (seed {:#x}, {:.0}s at {} Hz, {} m/s)",
        config.seed,
        config.duration_seconds,
        config.tick_rate_hz,
        config.run_speed
    );

    let mut scene = TrackScene::new();
    let player = scene.spawn_player(Transform::default(), config.run_speed);

    let mut path = PathGenerator::new(config.path.clone(), GeometryLibrary::with_defaults(), config.seed)
        .context("building path generator")?;
    path.start(&mut scene).context("starting path generator")?;

    let mut autopilot = Autopilot::default();
    let mut clock = FixedStep::from_rate(config.tick_rate_hz);
    let total_steps = config.total_steps();

    while clock.step_count() < total_steps {
        if config.realtime {
            clock.begin_frame();
        } else {
            clock.accumulate(clock.step());
        }

        while clock.step_count() < total_steps && clock.should_step() {
            autopilot.step(&mut scene.world, &path, player, clock.step_seconds());
            let Some(pose) = scene.player_pose() else {
                anyhow::bail!("player vanished from the scene");
            };

            path.tick(&mut scene, pose);

            if config.log_every_ticks > 0 && clock.step_count() % config.log_every_ticks == 0 {
                let recent: Vec<&str> = path
                    .segments()
                    .rev()
                    .take(5)
                    .map(|s| s.kind.name())
                    .collect();
                log::info!(
                    "t={:.1}s pos=({:.1}, {:.1}) active={} next=[{}]",
                    clock.elapsed_seconds(),
                    pose.position.x,
                    pose.position.z,
                    path.active_count(),
                    recent.join(", ")
                );
            }
        }

        if config.realtime {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    let distance = scene
        .world
        .get::<&Runner>(player)
        .map(|runner| runner.distance)
        .unwrap_or(0.0);
    let stats = *path.stats();
    log::info!(
        "Run finished: {:.0}m covered, {} pieces live, {} segments spawned, {} despawned, {} failed",
        distance,
        scene.track_piece_count(),
        stats.spawned,
        stats.despawned,
        stats.failed_spawns
    );
    for kind in SegmentType::ALL {
        log::info!("  {:>16}: {}", kind.name(), stats.emitted(kind));
    }
    log::debug!(
        "Final selection state: {:?}, cursor at {:?}",
        path.selection(),
        path.cursor().position
    );

    path.clear(&mut scene);
    Ok(())
}
