pub mod config;
pub mod error;
pub mod pomodoro;
pub mod shell;
