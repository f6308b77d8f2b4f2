// src/display/terminal.rs
//! Terminal playback of a decoded log

use crate::{
    config::ReplayConfig,
    error::Result,
    gps::{data::SignalReading, SatelliteView},
    session::{Frame, ReplaySession},
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType, DisableLineWrap, EnableLineWrap},
};
use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

pub struct TerminalDisplay {
    config: ReplayConfig,
}

impl TerminalDisplay {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Step through the session once per configured tick until it ends or Ctrl+C is pressed
    pub async fn run(&self, session: &mut ReplaySession, running: Arc<AtomicBool>) -> Result<()> {
        let running_clone = Arc::clone(&running);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                running_clone.store(false, Ordering::Relaxed);
            }
        });

        let mut stdout = io::stdout();
        self.run_on(&mut stdout, session, &running).await
    }

    /// Playback onto any terminal writer; the cursor and line wrap are restored on every exit path
    pub async fn run_on(&self, out: &mut impl Write, session: &mut ReplaySession, running: &AtomicBool) -> Result<()> {
        execute!(out, Hide, DisableLineWrap)?;

        let played = self.play(out, session, running).await;

        let restored = execute!(out, Show, EnableLineWrap);
        log::info!("Playback stopped at frame {} of {}", session.position(), session.frame_count());
        played?;
        restored?;
        Ok(())
    }

    async fn play(&self, out: &mut impl Write, session: &mut ReplaySession, running: &AtomicBool) -> Result<()> {
        let mut ticker = tokio::time::interval(self.config.tick_interval());
        while running.load(Ordering::Relaxed) && !session.is_finished() {
            ticker.tick().await;

            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            self.render_frame(out, &session.frame(), session.frame_count())?;
            out.flush()?;

            session.advance();
        }
        Ok(())
    }

    /// Render one playback step
    pub fn render_frame(&self, out: &mut impl Write, frame: &Frame<'_>, total: usize) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            Print(format!("NMEA Replay - frame {} of {}", frame.index + 1, total)),
            Print("\n"),
            Print("=".repeat(60)),
            Print("\n"),
            ResetColor
        )?;

        let time = frame.epoch.map_or_else(|| "--:--:--".to_string(), |e| e.display_time());
        execute!(out, Print(format!("Epoch time: {}\n\n", time)))?;

        self.render_position_section(out, frame)?;

        match frame.satellites {
            Some(ref view) => self.render_satellite_section(out, view)?,
            None => execute!(out, Print("SATELLITES:\n  No satellite data\n\n"))?,
        }

        if self.config.show_raw_sentences {
            self.render_raw_section(out, frame)?;
        }

        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\nPress Ctrl+C to exit\n"),
            ResetColor
        )?;

        Ok(())
    }

    fn render_position_section(&self, out: &mut impl Write, frame: &Frame<'_>) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print("POSITION:\n"),
            ResetColor
        )?;

        match frame.fix {
            Some(fix) => execute!(
                out,
                Print(format!("  Latitude:  {:>12.6}°\n", fix.latitude)),
                Print(format!("  Longitude: {:>12.6}°\n", fix.longitude)),
                Print(format!("  Altitude:  {:>12.2} m\n\n", fix.altitude))
            )?,
            None => execute!(out, Print("  No fix\n\n"))?,
        }

        Ok(())
    }

    fn render_satellite_section(&self, out: &mut impl Write, view: &SatelliteView) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Magenta),
            Print("SATELLITE LEVEL, C/N0 (dB-Hz):\n"),
            ResetColor
        )?;

        if view.signals.is_empty() {
            execute!(out, Print("  No signal data\n"))?;
        }
        for reading in &view.signals {
            execute!(out, Print(format!("  {}\n", self.signal_bar(reading))))?;
        }

        execute!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format!("\nSKY POSITIONS ({}):\n", view.sky.len())),
            ResetColor
        )?;
        for point in &view.sky {
            execute!(
                out,
                Print(format!(
                    "  az {:>6.1}°  el {:>4.1}°\n",
                    point.azimuth_rad.to_degrees(),
                    90.0 - point.radius
                ))
            )?;
        }
        execute!(out, Print("\n"))?;

        Ok(())
    }

    fn render_raw_section(&self, out: &mut impl Write, frame: &Frame<'_>) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Blue),
            Print("NMEA DATA:\n"),
            ResetColor
        )?;

        match frame.epoch {
            Some(epoch) => {
                for line in &epoch.lines {
                    execute!(out, Print(format!("  {}\n", line)))?;
                }
            }
            None => execute!(out, Print("  No data\n"))?,
        }
        execute!(out, Print("\n"))?;

        Ok(())
    }

    fn signal_bar(&self, reading: &SignalReading) -> String {
        let ceiling = self.config.snr_ceiling.max(1);
        let filled = (reading.snr_dbhz.min(ceiling) as usize * self.config.bar_width) / ceiling as usize;
        format!(
            "{:<4} {:<width$} {:>3}  {}",
            reading.label(),
            "#".repeat(filled),
            reading.snr_dbhz,
            reading.strength_description(),
            width = self.config.bar_width
        )
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new(ReplayConfig::default())
    }
}
