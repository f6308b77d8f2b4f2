// src/gps/data.rs
//! Decoded log data structures

use super::nmea::Sentence;
use chrono::NaiveTime;
use serde::Serialize;

/// A decoded position for one fix data sentence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fix {
    pub latitude: f64,   // decimal degrees, south negative
    pub longitude: f64,  // decimal degrees, west negative
    pub altitude: f64,   // meters above mean sea level
    /// Index of the epoch the sentence was read into
    pub epoch_index: usize,
}

/// All sentences recorded under one reported time of day
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Epoch {
    /// First six characters of the time field; `None` for lines seen before any timed sentence
    pub timestamp_key: Option<String>,
    pub lines: Vec<Sentence>,
}

impl Epoch {
    pub fn new(timestamp_key: Option<String>) -> Self {
        Self {
            timestamp_key,
            lines: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The key read as `hhmmss`, when it is one
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        let key = self.timestamp_key.as_deref()?;
        NaiveTime::parse_from_str(key, "%H%M%S").ok()
    }

    /// Label for display: `hh:mm:ss`, the raw key, or a dash
    pub fn display_time(&self) -> String {
        match (self.time_of_day(), self.timestamp_key.as_deref()) {
            (Some(time), _) => time.format("%H:%M:%S").to_string(),
            (None, Some(key)) => key.to_string(),
            (None, None) => "--:--:--".to_string(),
        }
    }
}

/// Consecutive satellites-in-view sentences forming one logical message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteGroup {
    /// Total message count read from the first sentence
    pub declared_total: usize,
    pub sentences: Vec<Sentence>,
}

impl SatelliteGroup {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// True when the log ended before all declared sentences arrived
    pub fn is_truncated(&self) -> bool {
        self.sentences.len() < self.declared_total
    }
}

/// One satellite window of a satellites-in-view sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteObservation {
    pub id: String,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub snr_dbhz: Option<u32>,
}

/// Latest C/N0 reported for a satellite within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalReading {
    pub id: String,
    pub snr_dbhz: u32,
}

impl SignalReading {
    /// Chart label, GPS satellites prefixed with `G`
    pub fn label(&self) -> String {
        format!("G{}", self.id)
    }

    pub fn strength_description(&self) -> &'static str {
        match self.snr_dbhz {
            40.. => "Excellent",
            35..=39 => "Good",
            25..=34 => "Fair",
            15..=24 => "Poor",
            _ => "Very Poor",
        }
    }
}

/// A satellite position in sky plot coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkyPoint {
    pub azimuth_rad: f64,
    /// Zenith distance in degrees (`90 - elevation`); 0 is overhead, 90 the horizon
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_time_of_day() {
        let epoch = Epoch::new(Some("123519".to_string()));
        assert_eq!(epoch.time_of_day(), NaiveTime::from_hms_opt(12, 35, 19));
        assert_eq!(epoch.display_time(), "12:35:19");
    }

    #[test]
    fn test_epoch_display_time_fallbacks() {
        assert_eq!(Epoch::new(Some("99xx".to_string())).display_time(), "99xx");
        assert_eq!(Epoch::new(None).display_time(), "--:--:--");
    }

    #[test]
    fn test_group_truncation() {
        let group = SatelliteGroup {
            declared_total: 3,
            sentences: vec![Sentence::new("$GPGSV,3,1,09")],
        };
        assert!(group.is_truncated());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_signal_reading() {
        let reading = SignalReading { id: "07".to_string(), snr_dbhz: 41 };
        assert_eq!(reading.label(), "G07");
        assert_eq!(reading.strength_description(), "Excellent");

        let weak = SignalReading { id: "30".to_string(), snr_dbhz: 12 };
        assert_eq!(weak.strength_description(), "Very Poor");
    }
}
