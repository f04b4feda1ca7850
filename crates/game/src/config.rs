//! Runner configuration (simulation, track tuning). Loaded from runner.ron at startup.

use anyhow::{Context, Result};
use procgen::PathConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent runner settings. Loaded from `runner.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Seed for the track's random draws.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Runner ground speed in metres per second.
    #[serde(default = "default_run_speed")]
    pub run_speed: f32,
    /// Simulation steps per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: f64,
    /// Simulated run length in seconds.
    #[serde(default = "default_duration")]
    pub duration_seconds: f32,
    /// Log a progress line every this many steps (0 = never).
    #[serde(default = "default_log_every")]
    pub log_every_ticks: u64,
    /// Pace steps against the wall clock instead of running as fast as possible.
    #[serde(default)]
    pub realtime: bool,
    /// Track generation tuning.
    #[serde(default)]
    pub path: PathConfig,
}

fn default_seed() -> u64 {
    0x5eed
}
fn default_run_speed() -> f32 {
    12.0
}
fn default_tick_rate() -> f64 {
    60.0
}
fn default_duration() -> f32 {
    120.0
}
fn default_log_every() -> u64 {
    600
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            run_speed: default_run_speed(),
            tick_rate_hz: default_tick_rate(),
            duration_seconds: default_duration(),
            log_every_ticks: default_log_every(),
            realtime: false,
            path: PathConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load config from `runner.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {:#}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self> {
        let config: Self = ron::from_str(data).context("parsing runner config")?;
        config.path.validate()?;
        Ok(config)
    }

    /// Total number of fixed steps in the run.
    pub fn total_steps(&self) -> u64 {
        (self.duration_seconds.max(0.0) as f64 * self.tick_rate_hz).round() as u64
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("runner.ron")
}
