//! Lets a [`Logger`] serve as the backend of the `log` facade.
//!
//! `log` has no FATAL, and TRACE is folded into DEBUG. Lines go through the
//! same gate, format and routing as the native calls.

use crate::prelude::{Level, Logger, Sink};

pub fn level_for(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

impl<S: Sink> log::Log for Logger<S> {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Level::admits(self.level().value(), level_for(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        self.emitf(level_for(record.level()), *record.args())
    }

    fn flush(&self) {}
}

/// Installs the shared logger as the `log` backend.
///
/// Filtering stays with the logger's own threshold, so `log`'s max level is
/// opened all the way.
#[cfg(feature = "singleton")]
pub fn init() -> Result<(), crate::prelude::LoggerError> {
    log::set_logger(crate::logger())?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
