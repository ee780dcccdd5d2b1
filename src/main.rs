use clap::Parser;
use tracing_subscriber::EnvFilter;

use pomodoro_timer::config::Args;
use pomodoro_timer::error::AppError;
use pomodoro_timer::pomodoro::PhaseTimer;
use pomodoro_timer::shell::Shell;
use pomodoro_timer::shell::command::{create_command_channel, spawn_stdin_reader};
use pomodoro_timer::shell::render::OutputFormat;
use pomodoro_timer::shell::session_log::SessionLog;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.timer_config()?;
    let timer = PhaseTimer::new(config);

    if args.format == OutputFormat::Text {
        println!("🍅 Pomodoro Timer");
        println!("======================================================");
        println!(
            "{}min work / {}min break / {}min long break every {} breaks",
            config.work_secs() / 60,
            config.break_secs() / 60,
            config.long_break_secs() / 60,
            config.long_break_every()
        );
        if let Some(ref path) = args.log {
            println!("Logging to: {}", path.display());
        }
        if config.has_pause() {
            println!("Enter (or p) pauses/resumes, s shows status, q quits\n");
        } else {
            println!("s shows status, q quits\n");
        }
    }

    let log = SessionLog::new(args.log.clone())?;
    let (command_tx, command_rx) = create_command_channel();
    spawn_stdin_reader(command_tx)?;

    tracing::info!(?config, "timer started");
    let mut shell = Shell::new(timer, log, args.format, std::io::stdout())
        .run(command_rx)
        .await?;
    shell.finish()
}
