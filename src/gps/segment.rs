// src/gps/segment.rs
//! Split a recorded sentence stream into per-second epochs

use super::data::{Epoch, Fix};
use super::nmea::{checked_latitude, checked_longitude, Sentence};
use log::debug;
use std::mem;

/// Epochs and fixes read from one log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    pub epochs: Vec<Epoch>,
    /// One entry per usable fix data sentence. Epochs without one have no entry,
    /// so this list is only index-aligned with `epochs` for clean logs.
    pub fixes: Vec<Fix>,
}

/// Single forward pass over the sentence stream.
///
/// A new epoch opens whenever a timed sentence ($GPGGA or $GPRMC) reports a
/// time key different from the open one. Keys are never merged back, so
/// `T1, T2, T1` gives three epochs.
#[derive(Debug, Default)]
pub struct EpochSegmenter {
    current_key: Option<String>,
    current: Epoch,
    epochs: Vec<Epoch>,
    fixes: Vec<Fix>,
}

impl EpochSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sentence: Sentence) {
        if let Some(key) = sentence.time_key() {
            if self.current_key.as_deref() != Some(key.as_str()) {
                self.close_current();
                self.current = Epoch::new(Some(key.clone()));
                self.current_key = Some(key);
            }
        }

        if let Some(fix) = self.decode_fix(&sentence) {
            self.fixes.push(fix);
        }

        self.current.lines.push(sentence);
    }

    pub fn finish(mut self) -> Segmentation {
        self.close_current();
        Segmentation {
            epochs: self.epochs,
            fixes: self.fixes,
        }
    }

    fn close_current(&mut self) {
        let block = mem::take(&mut self.current);
        if !block.is_empty() {
            self.epochs.push(block);
        }
    }

    /// Decode a fix data sentence into a position, skipping it when any value is unreadable
    fn decode_fix(&self, sentence: &Sentence) -> Option<Fix> {
        let fields = sentence.position_fields()?;

        let latitude = checked_latitude(fields.latitude, fields.latitude_hemisphere);
        let longitude = checked_longitude(fields.longitude, fields.longitude_hemisphere);
        let altitude = fields.altitude.parse::<f64>().ok().filter(|alt| alt.is_finite());

        // Out-of-range degrees count as unreadable so every fix keeps |latitude| <= 90
        match (latitude, longitude, altitude) {
            (Some(latitude), Some(longitude), Some(altitude))
                if latitude.abs() <= 90.0 && longitude.abs() <= 180.0 =>
            {
                Some(Fix {
                    latitude,
                    longitude,
                    altitude,
                    epoch_index: self.epochs.len(),
                })
            }
            _ => {
                debug!("Skipping unreadable fix sentence: {}", sentence);
                None
            }
        }
    }
}

/// Segment an ordered sequence of log lines
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Segmentation {
    let mut segmenter = EpochSegmenter::new();
    for line in lines {
        segmenter.push(Sentence::new(line.as_ref()));
    }
    segmenter.finish()
}
