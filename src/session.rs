// src/session.rs
//! Decoded log ownership and playback cursor

use crate::{
    error::Result,
    gps::{
        data::{Epoch, Fix, SatelliteGroup},
        gsv::{self, SatelliteView},
        segment::segment,
    },
};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Read a log file into trimmed, non-blank lines.
///
/// Invalid UTF-8 is replaced rather than rejected so a partially corrupted
/// recording still loads.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Everything decoded from one log file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedLog {
    pub epochs: Vec<Epoch>,
    pub fixes: Vec<Fix>,
    pub satellite_groups: Vec<SatelliteGroup>,
}

impl DecodedLog {
    /// Decode an ordered sequence of lines. Never fails: malformed sentences are skipped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let segmentation = segment(lines);
        let satellite_groups = gsv::aggregate(&gsv::extract_gsv_lines(lines));

        Self {
            epochs: segmentation.epochs,
            fixes: segmentation.fixes,
            satellite_groups,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let lines = read_log_lines(path)?;
        let log = Self::from_lines(&lines);
        info!(
            "Decoded {}: {} lines, {} epochs, {} fixes, {} satellite groups",
            path.display(),
            lines.len(),
            log.epochs.len(),
            log.fixes.len(),
            log.satellite_groups.len()
        );
        Ok(log)
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn sentence_count(&self) -> usize {
        self.epochs.iter().map(Epoch::len).sum()
    }

    pub fn summary(&self) -> LogSummary {
        LogSummary {
            sentences: self.sentence_count(),
            epochs: self.epochs.len(),
            fixes: self.fixes.len(),
            satellite_groups: self.satellite_groups.len(),
            truncated_groups: self
                .satellite_groups
                .iter()
                .filter(|group| group.is_truncated())
                .count(),
            first_epoch: self.epochs.first().map(Epoch::display_time),
            last_epoch: self.epochs.last().map(Epoch::display_time),
            fixes_aligned: self.fixes.len() == self.epochs.len()
                && self.fixes.iter().enumerate().all(|(i, fix)| fix.epoch_index == i),
        }
    }
}

/// Counts reported by `nmea-replay summary`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    pub sentences: usize,
    pub epochs: usize,
    pub fixes: usize,
    pub satellite_groups: usize,
    pub truncated_groups: usize,
    pub first_epoch: Option<String>,
    pub last_epoch: Option<String>,
    /// Whether fix `i` belongs to epoch `i` for every index
    pub fixes_aligned: bool,
}

/// What is shown for one playback step. Each list is indexed independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub index: usize,
    pub epoch: Option<&'a Epoch>,
    pub fix: Option<&'a Fix>,
    pub satellites: Option<SatelliteView>,
}

/// Owns one decoded log and the playback position within it
#[derive(Debug, Default)]
pub struct ReplaySession {
    log: DecodedLog,
    position: usize,
    source: Option<PathBuf>,
    strip_checksums: bool,
}

impl ReplaySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_log(log: DecodedLog) -> Self {
        Self {
            log,
            position: 0,
            source: None,
            strip_checksums: false,
        }
    }

    /// Cut `*hh` checksums off GSV sentences before reading SNR values.
    ///
    /// Off by default: the last satellite of a checksummed sentence then has no SNR.
    pub fn set_strip_checksums(&mut self, strip: bool) {
        self.strip_checksums = strip;
    }

    /// Replace the session contents with a freshly decoded file.
    ///
    /// Previous data is dropped before reading, so a failed load leaves the
    /// session empty.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.clear();
        self.log = DecodedLog::load(path)?;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.log = DecodedLog::default();
        self.position = 0;
        self.source = None;
    }

    pub fn log(&self) -> &DecodedLog {
        &self.log
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of playback steps: one per decoded fix
    pub fn frame_count(&self) -> usize {
        self.log.fixes.len()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.frame_count()
    }

    pub fn advance(&mut self) {
        if !self.is_finished() {
            self.position += 1;
        }
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn frame(&self) -> Frame<'_> {
        self.frame_at(self.position)
    }

    pub fn frame_at(&self, index: usize) -> Frame<'_> {
        Frame {
            index,
            epoch: self.log.epochs.get(index),
            fix: self.log.fixes.get(index),
            satellites: self
                .log
                .satellite_groups
                .get(index)
                .map(|group| SatelliteView::from_group_with(group, self.strip_checksums)),
        }
    }
}
