use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;

use crate::pomodoro::{Appearance, Phase, PhaseTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything a front end needs to draw the timer face.
#[derive(Debug, Serialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u32,
    pub display_minutes: u32,
    pub phase: Phase,
    pub is_running: bool,
    pub break_count: u32,
    pub appearance: Appearance,
    pub color: String,
}

impl TimerSnapshot {
    pub fn of(timer: &PhaseTimer) -> Self {
        let appearance = Appearance::of(timer);
        Self {
            remaining_seconds: timer.remaining_seconds(),
            display_minutes: timer.display_minutes(),
            phase: timer.phase(),
            is_running: timer.is_running(),
            break_count: timer.break_count(),
            appearance,
            color: appearance.hex(),
        }
    }
}

pub fn status_line(timer: &TimerSnapshot) -> String {
    let face = timer
        .appearance
        .paint(&format!("{} min", timer.display_minutes));
    if timer.is_running {
        format!("{} {} {}", timer.phase.emoji(), timer.phase, face)
    } else {
        format!("⏸ {} {} (paused)", timer.phase, face)
    }
}

pub fn render(format: OutputFormat, timer: &PhaseTimer) -> Result<String, serde_json::Error> {
    let snapshot = TimerSnapshot::of(timer);
    match format {
        OutputFormat::Text => Ok(format!(
            "[{}] {}",
            Local::now().format("%H:%M:%S"),
            status_line(&snapshot)
        )),
        OutputFormat::Json => serde_json::to_string(&snapshot),
    }
}
