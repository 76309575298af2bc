//! CLI command implementations.

pub mod asoundrc;
pub mod common;
pub mod devices;
pub mod params;
pub mod render;
pub mod simulate;
