use super::phase::Phase;
use thiserror::Error;

pub const WORK_SECS: u32 = 25 * 60; // Default Pomodoro work time
pub const BREAK_SECS: u32 = 5 * 60; // Default short break
pub const LONG_BREAK_SECS: u32 = 15 * 60; // Default long break
pub const LONG_BREAK_ALT_SECS: u32 = 30 * 60; // Longer variant some builds shipped with
pub const LONG_BREAK_EVERY: u32 = 4; // Every 4th break is long

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("{field} must be at least one second")]
    NonPositiveDuration { field: &'static str },
    #[error("long break cadence must be at least one break")]
    NonPositiveCadence,
}

/// Whether a long break shows up as its own phase or as a longer short break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongBreakPolicy {
    #[default]
    DistinctPhase,
    MergedIntoBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    work_secs: u32,
    break_secs: u32,
    long_break_secs: u32,
    long_break_every: u32,
    has_pause: bool,
    long_break_policy: LongBreakPolicy,
}

impl TimerConfig {
    pub fn new(
        work_secs: u32,
        break_secs: u32,
        long_break_secs: u32,
        long_break_every: u32,
    ) -> Result<Self, TimerError> {
        for (field, secs) in [
            ("work duration", work_secs),
            ("break duration", break_secs),
            ("long break duration", long_break_secs),
        ] {
            if secs == 0 {
                return Err(TimerError::NonPositiveDuration { field });
            }
        }
        if long_break_every == 0 {
            return Err(TimerError::NonPositiveCadence);
        }

        Ok(Self {
            work_secs,
            break_secs,
            long_break_secs,
            long_break_every,
            has_pause: true,
            long_break_policy: LongBreakPolicy::default(),
        })
    }

    pub fn with_pause(mut self, has_pause: bool) -> Self {
        self.has_pause = has_pause;
        self
    }

    pub fn with_long_break_policy(mut self, policy: LongBreakPolicy) -> Self {
        self.long_break_policy = policy;
        self
    }

    pub fn work_secs(&self) -> u32 {
        self.work_secs
    }

    pub fn break_secs(&self) -> u32 {
        self.break_secs
    }

    pub fn long_break_secs(&self) -> u32 {
        self.long_break_secs
    }

    pub fn long_break_every(&self) -> u32 {
        self.long_break_every
    }

    pub fn has_pause(&self) -> bool {
        self.has_pause
    }

    pub fn long_break_policy(&self) -> LongBreakPolicy {
        self.long_break_policy
    }

    /// Upper bound for `PhaseTimer::remaining_seconds`.
    pub fn longest_secs(&self) -> u32 {
        self.work_secs.max(self.break_secs).max(self.long_break_secs)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_secs: WORK_SECS,
            break_secs: BREAK_SECS,
            long_break_secs: LONG_BREAK_SECS,
            long_break_every: LONG_BREAK_EVERY,
            has_pause: true,
            long_break_policy: LongBreakPolicy::default(),
        }
    }
}

/// Work/break countdown advanced one second per `tick`.
///
/// The timer owns no clock. Whoever holds it decides the cadence and
/// re-reads the accessors after each call.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    config: TimerConfig,
    remaining_seconds: u32,
    phase: Phase,
    break_count: u32,
    is_running: bool,
    long_break: bool,
}

impl PhaseTimer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            remaining_seconds: config.work_secs,
            phase: Phase::Work,
            break_count: 0,
            is_running: true,
            long_break: false,
        }
    }

    pub fn tick(&mut self) {
        if self.config.has_pause && !self.is_running {
            return;
        }

        // Durations are validated non-zero, so the countdown always lands on 0.
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.advance_phase();
        }
    }

    /// Flips the running flag and returns the new value. A timer built
    /// without pause support keeps running.
    pub fn toggle_running(&mut self) -> bool {
        if self.config.has_pause {
            self.is_running = !self.is_running;
        }
        self.is_running
    }

    /// Whole minutes left, truncated: 59 seconds reads as 0.
    pub fn display_minutes(&self) -> u32 {
        self.remaining_seconds / 60
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn break_count(&self) -> u32 {
        self.break_count
    }

    /// True while the current break is a long one, whatever phase it shows as.
    pub fn is_long_break(&self) -> bool {
        self.long_break
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    fn advance_phase(&mut self) {
        match self.phase {
            Phase::Work => {
                self.break_count += 1;
                self.long_break = self.break_count % self.config.long_break_every == 0;
                if self.long_break {
                    self.break_count = 0;
                    self.remaining_seconds = self.config.long_break_secs;
                    self.phase = match self.config.long_break_policy {
                        LongBreakPolicy::DistinctPhase => Phase::LongBreak,
                        LongBreakPolicy::MergedIntoBreak => Phase::ShortBreak,
                    };
                } else {
                    self.remaining_seconds = self.config.break_secs;
                    self.phase = Phase::ShortBreak;
                }
            }
            Phase::ShortBreak | Phase::LongBreak => {
                self.long_break = false;
                self.phase = Phase::Work;
                self.remaining_seconds = self.config.work_secs;
            }
        }
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
