use super::phase::Phase;
use super::timer::PhaseTimer;
use serde::Serialize;

/// Background fill for the timer face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    Work,
    Break,
    LongBreak,
    Paused,
}

impl Appearance {
    /// Paused wins over the phase color.
    pub fn of(timer: &PhaseTimer) -> Self {
        if !timer.is_running() {
            return Appearance::Paused;
        }
        match timer.phase() {
            Phase::Work => Appearance::Work,
            Phase::ShortBreak => Appearance::Break,
            Phase::LongBreak => Appearance::LongBreak,
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Appearance::Work => (0xFF, 0x00, 0x00),
            Appearance::Break => (0xAD, 0xD8, 0xE6),
            Appearance::LongBreak => (0x46, 0x82, 0xB4),
            Appearance::Paused => (0x00, 0x80, 0x00),
        }
    }

    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// 24-bit ANSI background escape followed by `text` and a reset.
    pub fn paint(&self, text: &str) -> String {
        let (r, g, b) = self.rgb();
        format!("\x1b[48;2;{};{};{}m\x1b[30m {} \x1b[0m", r, g, b, text)
    }
}
