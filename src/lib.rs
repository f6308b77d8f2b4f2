// src/lib.rs
//! NMEA Replay Library
//!
//! Decodes recorded NMEA-0183 GPS logs into per-second epochs, position
//! fixes and satellites-in-view groups, and replays them step by step.

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod gps;
pub mod logging;
pub mod session;
pub mod track;

// Re-export main types for convenience
pub use error::{ReplayError, Result};
pub use gps::{Epoch, Fix, SatelliteGroup, SatelliteView};
pub use session::{DecodedLog, Frame, ReplaySession};
