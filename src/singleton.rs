//! The process-wide logger and its free-function surface.
//!
//! The direct and formatted flavours are macros, see [`info!`](crate::info)
//! and [`infof!`](crate::infof).

use core::fmt::Display;

use lazy_static::lazy_static;

use crate::prelude::{Config, Level, Logger, LoggerError};

lazy_static! {
    static ref LOGGER: Logger = Logger::default();
}

/// The shared logger, created on first use with the default settings.
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// See [`Logger::configure`].
pub fn configure(cfg: Config) {
    LOGGER.configure(cfg)
}

/// See [`Logger::try_configure`].
pub fn try_configure(cfg: Config) -> Result<(), LoggerError> {
    LOGGER.try_configure(cfg)
}

/// See [`Logger::set_level`].
pub fn set_level(level: Level) {
    LOGGER.set_level(level)
}

pub fn is_debug_enabled() -> bool {
    LOGGER.is_debug_enabled()
}

pub fn debugl<M: Display>(message: impl FnOnce() -> M) {
    LOGGER.debugl(message)
}

pub fn infol<M: Display>(message: impl FnOnce() -> M) {
    LOGGER.infol(message)
}

pub fn warnl<M: Display>(message: impl FnOnce() -> M) {
    LOGGER.warnl(message)
}

pub fn errorl<M: Display>(message: impl FnOnce() -> M) {
    LOGGER.errorl(message)
}

pub fn fatall<M: Display>(message: impl FnOnce() -> M) {
    LOGGER.fatall(message)
}

pub fn stdoutl<M: Display>(message: impl FnOnce() -> M) {
    LOGGER.stdoutl(message)
}

pub fn stderrl<M: Display>(message: impl FnOnce() -> M) {
    LOGGER.stderrl(message)
}
