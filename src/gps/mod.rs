// src/gps/mod.rs
//! NMEA log decoding

pub mod data;
pub mod gsv;
pub mod nmea;
pub mod segment;

pub use data::{Epoch, Fix, SatelliteGroup, SatelliteObservation, SignalReading, SkyPoint};
pub use gsv::{aggregate, extract_gsv_lines, observations, observations_with, SatelliteView};
pub use nmea::{decode_latitude, decode_longitude, Sentence, SentenceKind};
pub use segment::{segment, EpochSegmenter, Segmentation};
