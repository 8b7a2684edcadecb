#![cfg_attr(docsrs, feature(doc_cfg))]

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
//! <br><br>
//!
//! ## You're probably looking for:
//! * [`Logger`](Logger)
//! * [`configure`](configure) and the [`info!`](info) family of macros

pub mod prelude;
pub mod error;
pub mod levels;
pub(crate) mod sync;
#[cfg(feature = "singleton")]
mod singleton;
#[cfg(feature = "singleton")]
mod macros;
#[cfg(feature = "log")]
#[cfg_attr(docsrs, doc(cfg(feature = "log")))]
pub mod bridge;

pub use prelude::{
    Config, FatalAction, Level, Logger, LoggerError, Settings, Sink, StdStreams, Stream
};

#[cfg(feature = "singleton")]
pub use singleton::{
    configure, try_configure, set_level, is_debug_enabled, logger,
    debugl, infol, warnl, errorl, fatall, stdoutl, stderrl
};
