use std::io::BufRead;
use tokio::sync::mpsc;

/// Input the shell understands, one per stdin line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// The "click": pause or resume.
    Toggle,
    Status,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "" | "p" | "toggle" => Some(ShellCommand::Toggle),
            "s" | "status" => Some(ShellCommand::Status),
            "q" | "quit" => Some(ShellCommand::Quit),
            _ => None,
        }
    }
}

pub type CommandSender = mpsc::UnboundedSender<ShellCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<ShellCommand>;

pub fn create_command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::unbounded_channel()
}

/// Forwards parsed input lines until EOF or until the shell hangs up.
///
/// Blocking: run it on its own thread, see `spawn_stdin_reader`.
pub fn read_commands<R: BufRead>(input: R, command_tx: CommandSender) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                return;
            }
        };

        let Some(command) = ShellCommand::parse(&line) else {
            tracing::warn!(input = %line.trim(), "unknown command (enter/p toggles, s status, q quits)");
            continue;
        };
        if command_tx.send(command).is_err() {
            return;
        }
    }
    tracing::debug!("input closed");
}

/// Reads stdin on a detached thread so a pending read never holds up shutdown.
pub fn spawn_stdin_reader(command_tx: CommandSender) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || read_commands(std::io::stdin().lock(), command_tx))?;
    Ok(())
}
