// src/main.rs
//! NMEA Replay - decode recorded NMEA logs and replay them in the terminal

use anyhow::{anyhow, Context};
use clap::Parser;
use nmea_replay::{
    cli::{Cli, Command},
    config::ReplayConfig,
    display::TerminalDisplay,
    logging::setup_logging,
    session::{DecodedLog, ReplaySession},
    track::{TrackExporter, TrackFormat},
};
use std::sync::{atomic::AtomicBool, Arc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    match cli.command {
        Command::Play { file, interval_ms, no_raw, strip_checksums } => {
            let mut config = ReplayConfig::load().unwrap_or_else(|e| {
                log::warn!("{}; using defaults", e);
                ReplayConfig::default()
            });
            config.update_playback(interval_ms, no_raw, strip_checksums);

            let mut session = ReplaySession::new();
            session.set_strip_checksums(config.strip_checksums);
            session
                .open(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;

            if session.frame_count() == 0 {
                println!("No position fixes found in {}", file.display());
                return Ok(());
            }

            let running = Arc::new(AtomicBool::new(true));
            TerminalDisplay::new(config).run(&mut session, running).await?;
        }
        Command::Summary { file, json } => {
            let log = DecodedLog::load(&file).with_context(|| format!("Failed to load {}", file.display()))?;
            let summary = log.summary();

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("File:              {}", file.display());
                println!("Sentences:         {}", summary.sentences);
                println!("Epochs:            {}", summary.epochs);
                println!("Fixes:             {}", summary.fixes);
                println!("Satellite groups:  {} ({} truncated)", summary.satellite_groups, summary.truncated_groups);
                println!("First epoch:       {}", summary.first_epoch.as_deref().unwrap_or("-"));
                println!("Last epoch:        {}", summary.last_epoch.as_deref().unwrap_or("-"));
                if !summary.fixes_aligned {
                    println!("Note: some epochs have no usable fix; fix and epoch indices differ");
                }
            }
        }
        Command::Export { file, output, format } => {
            let format = match format {
                Some(format) => TrackFormat::from(format),
                None => TrackFormat::from_extension(&output)
                    .ok_or_else(|| anyhow!("Cannot infer export format from {}; use --format", output.display()))?,
            };

            let log = DecodedLog::load(&file).with_context(|| format!("Failed to load {}", file.display()))?;
            let exporter = TrackExporter::from_log(&log);
            exporter
                .export_to_file(&output, format)
                .with_context(|| format!("Failed to export to {}", output.display()))?;

            println!(
                "Exported {} fixes to {} ({})",
                exporter.point_count(),
                output.display(),
                format.extension()
            );
        }
    }

    Ok(())
}
