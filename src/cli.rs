// src/cli.rs
//! Command line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::track::TrackFormat;

#[derive(Parser, Debug)]
#[command(version, about = "Decode and replay recorded NMEA GPS logs", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, default_value_t = log::LevelFilter::Warn)]
    pub log_level: log::LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Step through the log one epoch per tick
    Play {
        file: PathBuf,

        /// Milliseconds between frames (overrides the config file)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Hide the raw sentences of each epoch
        #[arg(long, default_value_t = false)]
        no_raw: bool,

        /// Cut `*hh` checksums off GSV sentences so the last satellite keeps its SNR
        #[arg(long, default_value_t = false)]
        strip_checksums: bool,
    },
    /// Print counts of decoded epochs, fixes and satellite groups
    Summary {
        file: PathBuf,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the decoded fix track to a file
    Export {
        file: PathBuf,
        output: PathBuf,

        /// Output format; guessed from the output extension when omitted
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Geojson,
    Gpx,
}

impl From<ExportFormat> for TrackFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => TrackFormat::Csv,
            ExportFormat::Geojson => TrackFormat::GeoJson,
            ExportFormat::Gpx => TrackFormat::Gpx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play() {
        let cli = Cli::parse_from(["nmea-replay", "play", "drive.nmea", "--interval-ms", "200", "--no-raw"]);
        match cli.command {
            Command::Play { file, interval_ms, no_raw, strip_checksums } => {
                assert_eq!(file, PathBuf::from("drive.nmea"));
                assert_eq!(interval_ms, Some(200));
                assert!(no_raw);
                assert!(!strip_checksums);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn test_parse_export_with_log_level() {
        let cli = Cli::parse_from([
            "nmea-replay",
            "export",
            "drive.nmea",
            "track.out",
            "--format",
            "gpx",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level, log::LevelFilter::Debug);
        match cli.command {
            Command::Export { format, .. } => assert_eq!(format.map(TrackFormat::from), Some(TrackFormat::Gpx)),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
