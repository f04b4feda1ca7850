//! Core engine types and utilities for the track runner.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial helpers
//! - Fixed-step timing
//! - Common component types for ECS

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec3};
pub use hecs::{Entity, World};
