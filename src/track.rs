// src/track.rs
//! Export of the decoded fix track

use crate::error::{ReplayError, Result};
use crate::session::DecodedLog;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One fix with the time label of its epoch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPoint {
    pub time: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    Csv,
    GeoJson,
    Gpx,
}

impl TrackFormat {
    pub fn extension(&self) -> &str {
        match self {
            TrackFormat::Csv => "csv",
            TrackFormat::GeoJson => "geojson",
            TrackFormat::Gpx => "gpx",
        }
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(TrackFormat::Csv),
            "geojson" | "json" => Some(TrackFormat::GeoJson),
            "gpx" => Some(TrackFormat::Gpx),
            _ => None,
        }
    }
}

pub struct TrackExporter {
    points: Vec<TrackPoint>,
}

impl TrackExporter {
    pub fn from_log(log: &DecodedLog) -> Self {
        let points = log
            .fixes
            .iter()
            .map(|fix| TrackPoint {
                time: log
                    .epochs
                    .get(fix.epoch_index)
                    .and_then(|epoch| epoch.time_of_day())
                    .map(|time| time.format("%H:%M:%S").to_string()),
                latitude: fix.latitude,
                longitude: fix.longitude,
                altitude: fix.altitude,
            })
            .collect();

        Self { points }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn render(&self, format: TrackFormat) -> Result<String> {
        if self.points.is_empty() {
            return Err(ReplayError::Other("No fixes to export".to_string()));
        }

        match format {
            TrackFormat::Csv => Ok(self.to_csv()),
            TrackFormat::GeoJson => self.to_geojson(),
            TrackFormat::Gpx => Ok(self.to_gpx()),
        }
    }

    pub fn export_to_file(&self, path: &Path, format: TrackFormat) -> Result<()> {
        let content = self.render(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn to_csv(&self) -> String {
        let mut csv = String::from("time,latitude,longitude,altitude\n");

        for point in &self.points {
            csv.push_str(&format!(
                "{},{:.7},{:.7},{}\n",
                point.time.as_deref().unwrap_or(""),
                point.latitude,
                point.longitude,
                point.altitude
            ));
        }

        csv
    }

    fn to_geojson(&self) -> Result<String> {
        let coordinates: Vec<[f64; 3]> = self
            .points
            .iter()
            .map(|p| [p.longitude, p.latitude, p.altitude])
            .collect();
        let times: Vec<Option<&str>> = self.points.iter().map(|p| p.time.as_deref()).collect();

        let feature_collection = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates
                },
                "properties": {
                    "times": times
                }
            }]
        });

        Ok(serde_json::to_string_pretty(&feature_collection)?)
    }

    fn to_gpx(&self) -> String {
        let mut gpx = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="nmea-replay" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>NMEA replay track</name>
    <trkseg>
"#);

        for point in &self.points {
            gpx.push_str(&format!(
                "      <trkpt lat=\"{:.7}\" lon=\"{:.7}\">\n        <ele>{}</ele>\n",
                point.latitude, point.longitude, point.altitude
            ));
            // GPX wants a full timestamp; NMEA GGA only carries time of day
            if let Some(ref time) = point.time {
                gpx.push_str(&format!("        <desc>{}</desc>\n", time));
            }
            gpx.push_str("      </trkpt>\n");
        }

        gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
        gpx
    }
}
