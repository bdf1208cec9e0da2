use std::fmt::Display;

pub const RESET: &str = "\x1B[0m";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "error:",
            Level::Warn  => "warning:",
            Level::Info  => "info:",
            Level::Debug => "DEBUG:",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Error => "\x1B[1;31m",
            Level::Warn  => "\x1B[1;33m",
            Level::Info  => "\x1B[1;32m",
            Level::Debug => "\x1B[1;30m",
        }
    }
}

/// format a diagnostic line for stderr
pub fn line<S: Display>(level: Level, msg: S) -> String {
    format!("[psi] {}{}{} {}", level.color(), level.label(), RESET, msg)
}

pub fn log<S: Display>(level: Level, msg: S) {
    eprintln!("{}", line(level, msg));
}

#[allow(dead_code)]
pub fn error<S: Display>(msg: S) {
    log(Level::Error, msg)
}

#[allow(dead_code)]
pub fn warn<S: Display>(msg: S) {
    log(Level::Warn, msg)
}

#[allow(dead_code)]
pub fn info<S: Display>(msg: S) {
    log(Level::Info, msg)
}

#[allow(dead_code)]
pub fn debug<S: Display>(msg: S) {
    log(Level::Debug, msg)
}
