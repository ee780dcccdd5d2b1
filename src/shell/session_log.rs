use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pomodoro::Phase;

/// Timestamped record of one run of the timer, optionally mirrored to a file.
#[derive(Debug)]
pub struct SessionLog {
    log_file: Option<PathBuf>,
    session_start: DateTime<Local>,
    work_periods: u32,
    short_breaks: u32,
    long_breaks: u32,
    pauses: u32,
}

impl SessionLog {
    pub fn new(log_file: Option<PathBuf>) -> std::io::Result<Self> {
        let now = Local::now();
        if let Some(ref path) = log_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Self::log_to_file(
                path,
                &format!(
                    "=== Session started at {} ===",
                    now.format("%Y-%m-%d %H:%M:%S")
                ),
            )?;
        }
        Ok(Self {
            log_file,
            session_start: now,
            work_periods: 0,
            short_breaks: 0,
            long_breaks: 0,
            pauses: 0,
        })
    }

    fn log_to_file(path: &Path, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", message)?;
        Ok(())
    }

    /// Appends a `[HH:MM:SS]`-stamped line. Write failures are reported and dropped.
    pub fn log(&self, message: &str) {
        let Some(ref path) = self.log_file else {
            return;
        };
        let line = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        if let Err(e) = Self::log_to_file(path, &line) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write session log");
        }
    }

    /// Breaks are counted as they start. `long_break` comes from the timer
    /// since a merged long break still shows as `ShortBreak`.
    pub fn record_transition(
        &mut self,
        from: Phase,
        to: Phase,
        long_break: bool,
        remaining_seconds: u32,
    ) {
        if from == Phase::Work {
            self.work_periods += 1;
        }
        let label = if to.is_break() {
            if long_break {
                self.long_breaks += 1;
                Phase::LongBreak.as_str()
            } else {
                self.short_breaks += 1;
                Phase::ShortBreak.as_str()
            }
        } else {
            to.as_str()
        };
        self.log(&format!(
            "{} finished, switched to {} ({} min)",
            from,
            label,
            remaining_seconds / 60
        ));
    }

    pub fn record_toggle(&mut self, running: bool) {
        if running {
            self.log("Resumed");
        } else {
            self.pauses += 1;
            self.log("Paused");
        }
    }

    pub fn work_periods(&self) -> u32 {
        self.work_periods
    }

    pub fn short_breaks(&self) -> u32 {
        self.short_breaks
    }

    pub fn long_breaks(&self) -> u32 {
        self.long_breaks
    }

    pub fn pauses(&self) -> u32 {
        self.pauses
    }

    fn session_duration(&self) -> i64 {
        (Local::now() - self.session_start).num_seconds()
    }

    pub fn write_stats<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "\n--- Session Statistics ---")?;
        writeln!(
            out,
            "Session duration: {} minutes",
            self.session_duration() / 60
        )?;
        writeln!(out, "Work periods completed: {}", self.work_periods)?;
        writeln!(out, "Short breaks taken: {}", self.short_breaks)?;
        writeln!(out, "Long breaks taken: {}", self.long_breaks)?;
        writeln!(out, "Pauses: {}", self.pauses)?;
        writeln!(out, "------------------------")?;
        Ok(())
    }
}
