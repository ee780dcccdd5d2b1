//! Terminal front end: owns the one `PhaseTimer`, ticks it every second,
//! turns input lines into clicks and prints the timer face.

pub mod command;
pub mod render;
pub mod session_log;

use std::io::Write;
use std::ops::ControlFlow;
use tokio::time::{Duration, Instant, interval_at};

use crate::error::AppError;
use crate::pomodoro::{Phase, PhaseTimer};
use command::{CommandReceiver, ShellCommand};
use render::OutputFormat;
use session_log::SessionLog;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct Shell<W: Write> {
    timer: PhaseTimer,
    log: SessionLog,
    format: OutputFormat,
    out: W,
    last_rendered: Option<(u32, Phase, bool)>,
}

impl<W: Write> Shell<W> {
    pub fn new(timer: PhaseTimer, log: SessionLog, format: OutputFormat, out: W) -> Self {
        Self {
            timer,
            log,
            format,
            out,
            last_rendered: None,
        }
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Drives the timer until `Quit` or Ctrl+C. A closed command channel
    /// only stops input; the countdown keeps going.
    pub async fn run(mut self, mut commands: CommandReceiver) -> Result<Self, AppError> {
        let mut clock = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);
        let mut input_open = true;

        self.render(true)?;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("interrupted");
                    break;
                }
                command = commands.recv(), if input_open => match command {
                    Some(command) => {
                        if self.on_command(command)?.is_break() {
                            break;
                        }
                    }
                    None => input_open = false,
                },
                _ = clock.tick() => self.on_tick()?,
            }
        }

        Ok(self)
    }

    pub fn on_tick(&mut self) -> Result<(), AppError> {
        let before = self.timer.phase();
        self.timer.tick();
        let after = self.timer.phase();

        if before != after {
            tracing::info!(
                from = %before,
                to = %after,
                remaining_seconds = self.timer.remaining_seconds(),
                break_count = self.timer.break_count(),
                long_break = self.timer.is_long_break(),
                "phase changed"
            );
            self.log.record_transition(
                before,
                after,
                self.timer.is_long_break(),
                self.timer.remaining_seconds(),
            );
        }
        self.render(false)
    }

    pub fn on_command(&mut self, command: ShellCommand) -> Result<ControlFlow<()>, AppError> {
        match command {
            ShellCommand::Toggle => {
                if !self.timer.config().has_pause() {
                    tracing::debug!("pause disabled, ignoring toggle");
                    return Ok(ControlFlow::Continue(()));
                }
                let running = self.timer.toggle_running();
                tracing::info!(running, "toggled");
                self.log.record_toggle(running);
                self.render(false)?;
            }
            ShellCommand::Status => self.render(true)?,
            ShellCommand::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Session statistics, text mode only so JSON output stays line-parseable.
    pub fn finish(&mut self) -> Result<(), AppError> {
        self.log.log("Session ended");
        if self.format == OutputFormat::Text {
            self.log.write_stats(&mut self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render(&mut self, force: bool) -> Result<(), AppError> {
        let key = (
            self.timer.display_minutes(),
            self.timer.phase(),
            self.timer.is_running(),
        );
        if !force && self.last_rendered == Some(key) {
            return Ok(());
        }
        self.last_rendered = Some(key);

        let line = render::render(self.format, &self.timer)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::{LongBreakPolicy, TimerConfig};
    use command::create_command_channel;
    use serde_json::Value;
    use tokio::time::sleep;

    fn json_shell(config: TimerConfig) -> Shell<Vec<u8>> {
        Shell::new(
            PhaseTimer::new(config),
            SessionLog::new(None).unwrap(),
            OutputFormat::Json,
            Vec::new(),
        )
    }

    fn rendered(output: Vec<u8>) -> Vec<Value> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_renders_only_on_visible_change() {
        let mut shell = json_shell(TimerConfig::default());
        shell.render(true).unwrap();
        for _ in 0..59 {
            shell.on_tick().unwrap();
        }
        // 1441 seconds left still reads 24 minutes, no extra line.
        let lines = rendered(shell.into_output());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["display_minutes"], 25);
        assert_eq!(lines[1]["display_minutes"], 24);
    }

    #[test]
    fn test_merged_long_breaks_counted_as_long() {
        let config = TimerConfig::new(1, 1, 5, 2)
            .unwrap()
            .with_long_break_policy(LongBreakPolicy::MergedIntoBreak);
        let mut shell = json_shell(config);
        // work, short break, work, merged long break (5s), work
        for _ in 0..(1 + 1 + 1 + 5 + 1) {
            shell.on_tick().unwrap();
        }

        assert_eq!(shell.timer().phase(), Phase::ShortBreak);
        assert_eq!(shell.session_log().work_periods(), 3);
        assert_eq!(shell.session_log().short_breaks(), 2);
        assert_eq!(shell.session_log().long_breaks(), 1);
    }

    #[test]
    fn test_toggle_ignored_when_pause_disabled() {
        let mut shell = json_shell(TimerConfig::new(5, 3, 7, 2).unwrap().with_pause(false));
        let flow = shell.on_command(ShellCommand::Toggle).unwrap();
        assert!(flow.is_continue());
        assert!(shell.timer().is_running());
        assert_eq!(shell.session_log().pauses(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_once_per_second() {
        let shell = json_shell(TimerConfig::new(5, 3, 7, 2).unwrap());
        let (tx, rx) = create_command_channel();

        let (result, _) = tokio::join!(shell.run(rx), async {
            sleep(Duration::from_millis(5_500)).await;
            tx.send(ShellCommand::Quit).unwrap();
        });
        let shell = result.unwrap();

        assert_eq!(shell.timer().phase(), Phase::ShortBreak);
        assert_eq!(shell.timer().remaining_seconds(), 3);
        assert_eq!(shell.timer().break_count(), 1);
        assert_eq!(shell.session_log().work_periods(), 1);

        let lines = rendered(shell.into_output());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["phase"], "work");
        assert_eq!(lines[1]["phase"], "short_break");
        assert_eq!(lines[1]["color"], "#ADD8E6");
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_shell_does_not_count_down() {
        let shell = json_shell(TimerConfig::new(5, 3, 7, 2).unwrap());
        let (tx, rx) = create_command_channel();

        let (result, _) = tokio::join!(shell.run(rx), async {
            sleep(Duration::from_millis(2_500)).await;
            tx.send(ShellCommand::Toggle).unwrap();
            sleep(Duration::from_secs(10)).await;
            tx.send(ShellCommand::Quit).unwrap();
        });
        let shell = result.unwrap();

        assert_eq!(shell.timer().phase(), Phase::Work);
        assert_eq!(shell.timer().remaining_seconds(), 3);
        assert!(!shell.timer().is_running());

        let lines = rendered(shell.into_output());
        let last = lines.last().unwrap();
        assert_eq!(last["appearance"], "paused");
        assert_eq!(last["color"], "#008000");
        assert_eq!(last["remaining_seconds"], 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_input_keeps_ticking() {
        let shell = json_shell(TimerConfig::new(5, 3, 7, 2).unwrap());
        let (tx, rx) = create_command_channel();
        drop(tx);

        let outcome = tokio::time::timeout(Duration::from_millis(3_500), shell.run(rx)).await;
        assert!(outcome.is_err(), "shell should still be running");
    }

    #[test]
    fn test_finish_writes_stats_in_text_mode() {
        let mut shell = Shell::new(
            PhaseTimer::default(),
            SessionLog::new(None).unwrap(),
            OutputFormat::Text,
            Vec::new(),
        );
        shell.finish().unwrap();
        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("--- Session Statistics ---"));
    }
}
