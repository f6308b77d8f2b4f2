// src/gps/gsv.rs
//! Satellites-in-view (GSV) regrouping and per-satellite extraction

use super::data::{SatelliteGroup, SatelliteObservation, SignalReading, SkyPoint};
use super::nmea::{Sentence, SentenceKind};
use log::debug;
use serde::Serialize;

/// First satellite window starts after `$GPGSV,total,index,in_view`
const FIRST_WINDOW: usize = 4;
const WINDOW_LEN: usize = 4;

/// Keep only satellites-in-view lines, in log order
pub fn extract_gsv_lines<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| SentenceKind::of(line) == SentenceKind::SatellitesInView)
        .collect()
}

/// Regroup GSV lines into logical messages using the total-messages field.
///
/// The cursor moves forward only. A line whose count cannot be read is
/// skipped on its own; a final group that runs past the end is kept short.
pub fn aggregate<S: AsRef<str>>(gsv_lines: &[S]) -> Vec<SatelliteGroup> {
    let mut groups = Vec::new();
    let mut cursor = 0;

    while cursor < gsv_lines.len() {
        let line = gsv_lines[cursor].as_ref();
        match total_messages(line) {
            Some(total) => {
                let end = cursor.saturating_add(total).min(gsv_lines.len());
                groups.push(SatelliteGroup {
                    declared_total: total,
                    sentences: gsv_lines[cursor..end]
                        .iter()
                        .map(|line| Sentence::new(line.as_ref()))
                        .collect(),
                });
                cursor = end;
            }
            None => {
                debug!("Skipping GSV sentence without a message count: {}", line);
                cursor += 1;
            }
        }
    }

    groups
}

/// Field 1 as a positive message count
fn total_messages(line: &str) -> Option<usize> {
    line.split(',')
        .nth(1)?
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|total| *total > 0)
}

/// Every satellite window with a readable elevation and azimuth, in sentence order.
///
/// Fields are taken as written: a trailing `*hh` checksum stays attached to the
/// last SNR field, which then fails the digits-only test and reads as absent.
pub fn observations(group: &SatelliteGroup) -> Vec<SatelliteObservation> {
    observations_with(group, false)
}

/// Like [`observations`], optionally cutting off the `*hh` checksum first (it is never verified)
pub fn observations_with(group: &SatelliteGroup, strip_checksum: bool) -> Vec<SatelliteObservation> {
    let mut result = Vec::new();
    for sentence in &group.sentences {
        scan_windows(sentence.as_str(), strip_checksum, &mut result);
    }
    result
}

fn scan_windows(line: &str, strip_checksum: bool, out: &mut Vec<SatelliteObservation>) {
    let body = if strip_checksum {
        line.split_once('*').map_or(line, |(body, _)| body)
    } else {
        line
    };
    let parts: Vec<&str> = body.split(',').collect();

    let mut index = FIRST_WINDOW;
    while index + 3 < parts.len() {
        let id = parts[index];
        let elevation = parts[index + 1].trim().parse::<f64>();
        let azimuth = parts[index + 2].trim().parse::<f64>();

        match (elevation, azimuth) {
            (Ok(elevation_deg), Ok(azimuth_deg)) => out.push(SatelliteObservation {
                id: id.to_string(),
                elevation_deg,
                azimuth_deg,
                snr_dbhz: parse_snr(parts[index + 3]),
            }),
            _ => debug!("Skipping satellite window {} in: {}", index, line),
        }

        index += WINDOW_LEN;
    }
}

/// Digits only, no sign
fn parse_snr(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u32>().ok()
}

/// Signal bars and sky plot points for one satellite group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SatelliteView {
    /// Last reported SNR per satellite, in first-seen order
    pub signals: Vec<SignalReading>,
    pub sky: Vec<SkyPoint>,
}

impl SatelliteView {
    pub fn from_group(group: &SatelliteGroup) -> Self {
        Self::from_group_with(group, false)
    }

    pub fn from_group_with(group: &SatelliteGroup, strip_checksum: bool) -> Self {
        let mut view = Self::default();

        for observation in observations_with(group, strip_checksum) {
            match observation.snr_dbhz {
                Some(snr) if !observation.id.is_empty() => view.record_signal(&observation.id, snr),
                _ => {}
            }

            let visible = (0.0..=360.0).contains(&observation.azimuth_deg)
                && (0.0..=90.0).contains(&observation.elevation_deg);
            if visible {
                view.sky.push(SkyPoint {
                    azimuth_rad: observation.azimuth_deg.to_radians(),
                    radius: 90.0 - observation.elevation_deg,
                });
            }
        }

        view
    }

    fn record_signal(&mut self, id: &str, snr_dbhz: u32) {
        if let Some(existing) = self.signals.iter_mut().find(|s| s.id == id) {
            existing.snr_dbhz = snr_dbhz;
        } else {
            self.signals.push(SignalReading {
                id: id.to_string(),
                snr_dbhz,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.sky.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(lines: &[&str]) -> SatelliteGroup {
        SatelliteGroup {
            declared_total: lines.len(),
            sentences: lines.iter().map(|line| Sentence::new(*line)).collect(),
        }
    }

    fn sizes(groups: &[SatelliteGroup]) -> Vec<usize> {
        groups.iter().map(|group| group.len()).collect()
    }

    #[test]
    fn test_extract_gsv_lines() {
        let lines = [
            "$GPGGA,120000,4807.038,N",
            "$GPGSV,1,1,01,07,79,048,42",
            "$GLGSV,1,1,01,65,10,100,30",
            "$GPRMC,120000,A",
        ];
        assert_eq!(extract_gsv_lines(&lines), vec!["$GPGSV,1,1,01,07,79,048,42"]);
    }

    #[test]
    fn test_aggregate_consumes_declared_counts() {
        let lines = [
            "$GPGSV,2,1,08,01,40,083,46",
            "$GPGSV,2,2,08,02,17,308,41",
            "$GPGSV,3,1,12,01,40,083,46",
            "$GPGSV,3,2,12,02,17,308,41",
            "$GPGSV,3,3,12,12,07,344,39",
        ];
        let groups = aggregate(&lines);
        assert_eq!(sizes(&groups), vec![2, 3]);
        assert_eq!(groups[1].sentences[0].as_str(), lines[2]);
        assert!(groups.iter().all(|group| !group.is_truncated()));
    }

    #[test]
    fn test_aggregate_skips_unreadable_count() {
        let lines = [
            "$GPGSV,x,1,08,01,40,083,46",
            "$GPGSV,1,1,01,07,79,048,42",
            "$GPGSV",
            "$GPGSV,0,1,00",
            "$GPGSV,1,1,01,09,10,200,20",
        ];
        let groups = aggregate(&lines);
        assert_eq!(sizes(&groups), vec![1, 1]);
        assert_eq!(groups[0].sentences[0].as_str(), lines[1]);
        assert_eq!(groups[1].sentences[0].as_str(), lines[4]);
    }

    #[test]
    fn test_aggregate_truncates_final_group() {
        let lines = ["$GPGSV,3,1,12,01,40,083,46", "$GPGSV,3,2,12,02,17,308,41"];
        let groups = aggregate(&lines);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].declared_total, 3);
        assert!(groups[0].is_truncated());
    }

    #[test]
    fn test_aggregate_follows_count_not_index() {
        // Group boundaries follow the count field even when it disagrees with the index field
        let lines = [
            "$GPGSV,2,2,08,01,40,083,46",
            "$GPGSV,2,1,08,02,17,308,41",
            "$GPGSV,1,1,04,03,20,100,33",
        ];
        assert_eq!(sizes(&aggregate(&lines)), vec![2, 1]);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_observations_keep_checksum_on_last_snr() {
        let group = group_of(&["$GPGSV,3,1,12,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75"]);
        let obs = observations(&group);
        assert_eq!(obs.len(), 4);
        assert_eq!(obs[0].id, "01");
        assert_eq!(obs[0].elevation_deg, 40.0);
        assert_eq!(obs[0].azimuth_deg, 83.0);
        assert_eq!(obs[0].snr_dbhz, Some(46));
        assert_eq!(obs[3].id, "14");
        assert_eq!(obs[3].snr_dbhz, None);

        let stripped = observations_with(&group, true);
        assert_eq!(stripped[3].snr_dbhz, Some(45));
    }

    #[test]
    fn test_view_drops_snr_carrying_checksum() {
        let group = group_of(&["$GPGSV,1,1,02,07,79,048,30,09,10,200,42*75"]);

        let view = SatelliteView::from_group(&group);
        assert_eq!(view.signals, vec![SignalReading { id: "07".to_string(), snr_dbhz: 30 }]);
        assert_eq!(view.sky.len(), 2);

        let stripped = SatelliteView::from_group_with(&group, true);
        let ids: Vec<&str> = stripped.signals.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["07", "09"]);
        assert_eq!(stripped.signals[1].snr_dbhz, 42);
    }

    #[test]
    fn test_observations_skip_non_numeric_angles() {
        let group = group_of(&["$GPGSV,1,1,03,05,,120,30,06,45,abc,40,07,50,210,"]);
        let obs = observations(&group);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].id, "07");
        assert_eq!(obs[0].snr_dbhz, None);
    }

    #[test]
    fn test_short_sentence_has_no_windows() {
        let group = group_of(&["$GPGSV,1,1,00", "$GPGSV,1,1,01,07,79,048"]);
        assert!(observations(&group).is_empty());
    }

    #[test]
    fn test_view_last_snr_wins_in_first_seen_order() {
        let group = group_of(&[
            "$GPGSV,2,1,05,07,79,048,42,09,10,200,20",
            "$GPGSV,2,2,05,07,79,048,44,11,30,300,33",
        ]);
        let view = SatelliteView::from_group(&group);
        let ids: Vec<&str> = view.signals.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["07", "09", "11"]);
        assert_eq!(view.signals[0].snr_dbhz, 44);
        assert_eq!(view.sky.len(), 4);
    }

    #[test]
    fn test_view_filters_are_independent() {
        let group = group_of(&["$GPGSV,1,1,04,01,95,083,46,02,17,308,,,30,100,25,04,-5,10,+3"]);
        let view = SatelliteView::from_group(&group);

        // 01 has an SNR but an elevation above 90
        assert_eq!(view.signals.len(), 1);
        assert_eq!(view.signals[0].id, "01");

        // 02 and the id-less window are plotted, 04 is below the horizon
        assert_eq!(view.sky.len(), 2);
        assert!((view.sky[0].azimuth_rad - 308f64.to_radians()).abs() < 1e-12);
        assert_eq!(view.sky[0].radius, 73.0);
        assert_eq!(view.sky[1].radius, 60.0);
    }

    #[test]
    fn test_view_from_empty_group() {
        let view = SatelliteView::from_group(&group_of(&[]));
        assert!(view.is_empty());
    }
}
