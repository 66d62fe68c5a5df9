//! A `log` backend for build scripts.
//!
//! Cargo shows build script output only through its own instructions, so
//! warnings and errors are turned into `cargo:warning=` lines. Everything
//! else goes to stderr, which Cargo keeps in the build log (`cargo build -vv`).

use embuild::cargo::print_warning;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: CargoLogger = CargoLogger;

/// Where a record of a given level ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// `cargo:warning=`, printed by Cargo on every build.
    Warning,
    /// The build script's stderr.
    Stderr,
}

impl Channel {
    pub fn for_level(level: Level) -> Self {
        if level <= Level::Warn {
            Channel::Warning
        } else {
            Channel::Stderr
        }
    }
}

pub struct CargoLogger;

impl Log for CargoLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match Channel::for_level(record.level()) {
            Channel::Warning => print_warning(record.args()),
            Channel::Stderr => eprintln!("[{}] {}", record.level(), record.args()),
        }
    }

    fn flush(&self) {}
}

/// Installs [`CargoLogger`] at `info` level. Fails if a logger is already set.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}
