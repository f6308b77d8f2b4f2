// src/gps/nmea.rs
//! NMEA sentence model and coordinate decoding

use serde::Serialize;
use std::fmt;

/// Prefix of the GPS fix data sentence (time, position, altitude)
pub const FIX_DATA_PREFIX: &str = "$GPGGA";
/// Prefix of the recommended minimum sentence (time used for epoch boundaries only)
pub const RECOMMENDED_MINIMUM_PREFIX: &str = "$GPRMC";
/// Prefix of the satellites-in-view sentence
pub const SATELLITES_IN_VIEW_PREFIX: &str = "$GPGSV";

// Field offsets inside a $GPGGA sentence
const GGA_LATITUDE: usize = 2;
const GGA_LATITUDE_HEMISPHERE: usize = 3;
const GGA_LONGITUDE: usize = 4;
const GGA_LONGITUDE_HEMISPHERE: usize = 5;
const GGA_ALTITUDE: usize = 9;

/// Sentence types the decoder distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    FixData,
    RecommendedMinimum,
    SatellitesInView,
    Other,
}

impl SentenceKind {
    pub fn of(line: &str) -> Self {
        if line.starts_with(FIX_DATA_PREFIX) {
            SentenceKind::FixData
        } else if line.starts_with(RECOMMENDED_MINIMUM_PREFIX) {
            SentenceKind::RecommendedMinimum
        } else if line.starts_with(SATELLITES_IN_VIEW_PREFIX) {
            SentenceKind::SatellitesInView
        } else {
            SentenceKind::Other
        }
    }

    /// Whether this sentence carries a UTC time in field 1
    pub fn carries_time(&self) -> bool {
        matches!(self, SentenceKind::FixData | SentenceKind::RecommendedMinimum)
    }
}

/// One line of a recorded log, exactly as read (trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sentence(String);

impl Sentence {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> SentenceKind {
        SentenceKind::of(&self.0)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.split(',').collect()
    }

    /// First six characters of the time field, if this is a timed sentence with a non-empty time
    pub fn time_key(&self) -> Option<String> {
        if !self.kind().carries_time() {
            return None;
        }
        let time = self.0.split(',').nth(1)?;
        if time.is_empty() {
            return None;
        }
        Some(time.chars().take(6).collect())
    }

    /// Raw GGA position fields: (latitude, hemisphere, longitude, hemisphere, altitude).
    ///
    /// `None` unless this is a fix data sentence with more than nine fields and
    /// every one of the five fields non-empty.
    pub fn position_fields(&self) -> Option<PositionFields<'_>> {
        if self.kind() != SentenceKind::FixData {
            return None;
        }
        let parts = self.fields();
        if parts.len() <= GGA_ALTITUDE {
            return None;
        }
        let fields = PositionFields {
            latitude: parts[GGA_LATITUDE],
            latitude_hemisphere: parts[GGA_LATITUDE_HEMISPHERE],
            longitude: parts[GGA_LONGITUDE],
            longitude_hemisphere: parts[GGA_LONGITUDE_HEMISPHERE],
            altitude: parts[GGA_ALTITUDE],
        };
        if fields.any_empty() {
            return None;
        }
        Some(fields)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionFields<'a> {
    pub latitude: &'a str,
    pub latitude_hemisphere: &'a str,
    pub longitude: &'a str,
    pub longitude_hemisphere: &'a str,
    pub altitude: &'a str,
}

impl PositionFields<'_> {
    fn any_empty(&self) -> bool {
        self.latitude.is_empty()
            || self.latitude_hemisphere.is_empty()
            || self.longitude.is_empty()
            || self.longitude_hemisphere.is_empty()
            || self.altitude.is_empty()
    }
}

/// Convert an NMEA `ddmm.mmmm` latitude to signed decimal degrees.
///
/// Returns 0.0 when either input is empty, or when the digits cannot be read.
pub fn decode_latitude(raw: &str, hemisphere: &str) -> f64 {
    checked_latitude(raw, hemisphere).unwrap_or(0.0)
}

/// Convert an NMEA `dddmm.mmmm` longitude to signed decimal degrees.
///
/// Returns 0.0 when either input is empty, or when the digits cannot be read.
pub fn decode_longitude(raw: &str, hemisphere: &str) -> f64 {
    checked_longitude(raw, hemisphere).unwrap_or(0.0)
}

/// Like [`decode_latitude`] but `None` for non-numeric content.
pub fn checked_latitude(raw: &str, hemisphere: &str) -> Option<f64> {
    degree_minutes(raw, hemisphere, 2, "S")
}

/// Like [`decode_longitude`] but `None` for non-numeric content.
pub fn checked_longitude(raw: &str, hemisphere: &str) -> Option<f64> {
    degree_minutes(raw, hemisphere, 3, "W")
}

fn degree_minutes(raw: &str, hemisphere: &str, degree_digits: usize, negative: &str) -> Option<f64> {
    if raw.is_empty() || hemisphere.is_empty() {
        return Some(0.0);
    }

    let degrees = raw.get(..degree_digits)?.parse::<u32>().ok()?;
    let minutes = raw.get(degree_digits..)?.parse::<f64>().ok()?;
    let decimal = degrees as f64 + minutes / 60.0;

    if hemisphere == negative {
        Some(-decimal)
    } else {
        Some(decimal)
    }
}
