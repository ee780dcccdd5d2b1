use clap::Parser;
use std::path::PathBuf;

use crate::pomodoro::timer::{
    BREAK_SECS, LONG_BREAK_EVERY, LONG_BREAK_SECS, LongBreakPolicy, TimerConfig, TimerError,
    WORK_SECS,
};
use crate::shell::render::OutputFormat;

/// Work and break lengths are fixed at 25 and 5 minutes.
#[derive(Debug, Parser)]
#[command(version, about = "🍅 Pomodoro timer: 25 min work, 5 min break, a long break every 4th")]
pub struct Args {
    /// Long break length in seconds (900 or 1800 are the usual picks)
    #[arg(long = "long-break", default_value_t = LONG_BREAK_SECS)]
    pub long_break_secs: u32,

    /// Every Nth break is a long one
    #[arg(long, default_value_t = LONG_BREAK_EVERY)]
    pub long_break_every: u32,

    /// Ignore toggle input, the countdown never pauses
    #[arg(long)]
    pub no_pause: bool,

    /// Show long breaks as ordinary breaks that just last longer
    #[arg(long)]
    pub merge_long_break: bool,

    /// How the timer face is printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Append a timestamped session log to this file
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Log timer events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn timer_config(&self) -> Result<TimerConfig, TimerError> {
        let policy = if self.merge_long_break {
            LongBreakPolicy::MergedIntoBreak
        } else {
            LongBreakPolicy::DistinctPhase
        };
        Ok(
            TimerConfig::new(WORK_SECS, BREAK_SECS, self.long_break_secs, self.long_break_every)?
                .with_pause(!self.no_pause)
                .with_long_break_policy(policy),
        )
    }

    /// `RUST_LOG` wins over `--verbose`.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::timer::LONG_BREAK_ALT_SECS;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["pomodoro_timer"]).unwrap();
        let config = args.timer_config().unwrap();
        assert_eq!(config, TimerConfig::default());
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.log_filter(), "warn");
        assert!(args.log.is_none());
    }

    #[test]
    fn test_long_break_variant_and_policies() {
        let args = Args::try_parse_from([
            "pomodoro_timer",
            "--long-break",
            "1800",
            "--no-pause",
            "--merge-long-break",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        let config = args.timer_config().unwrap();
        assert_eq!(config.long_break_secs(), LONG_BREAK_ALT_SECS);
        assert_eq!(config.work_secs(), WORK_SECS);
        assert!(!config.has_pause());
        assert_eq!(config.long_break_policy(), LongBreakPolicy::MergedIntoBreak);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_zero_long_break_fails_fast() {
        let args = Args::try_parse_from(["pomodoro_timer", "--long-break", "0"]).unwrap();
        assert_eq!(
            args.timer_config(),
            Err(TimerError::NonPositiveDuration {
                field: "long break duration"
            })
        );
    }

    #[test]
    fn test_rejects_work_duration_flag() {
        assert!(Args::try_parse_from(["pomodoro_timer", "--work", "60"]).is_err());
    }
}
