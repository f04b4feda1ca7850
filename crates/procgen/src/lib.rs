//! Procedural generation for the endless runner track.

pub mod error;
pub mod generator;
pub mod path_config;
pub mod placement;
pub mod segment;
pub mod selection;

pub use error::*;
pub use generator::*;
pub use path_config::*;
pub use placement::*;
pub use segment::*;
pub use selection::*;
