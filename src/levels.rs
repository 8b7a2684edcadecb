use core::fmt;
use core::str::FromStr;

use crate::error::LoggerError;

/// Severity of a line, and the threshold it is gated against.
///
/// Higher values are more verbose. The three negative values are not levels a
/// line can be written at; they only exist as thresholds, to silence the
/// raw stdout/stderr writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[repr(i8)]
pub enum Level {
    SuppressStderr = -3,
    SuppressStdout = -2,
    None = -1,
    Fatal = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

/// Standard stream a line ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Level {
    /// The levels a line can be written at, indexed by their value.
    pub const EMITTING: [Level; 5] = [
        Level::Fatal, Level::Error, Level::Warn, Level::Info, Level::Debug
    ];

    #[inline]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Whether a line at `level` passes a logger configured with `threshold`.
    ///
    /// DEBUG only passes at exactly DEBUG. FATAL always passes. Everything in
    /// between passes when the threshold is at least as verbose as the level.
    pub fn admits(threshold: i32, level: Level) -> bool {
        match level {
            Level::Debug => threshold == Level::Debug.value(),
            Level::Fatal => true,
            Level::Info | Level::Warn | Level::Error => threshold >= level.value(),
            Level::None | Level::SuppressStdout | Level::SuppressStderr => false,
        }
    }

    /// Whether the raw passthrough writer for `stream` is live under `threshold`.
    pub fn passes_through(threshold: i32, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => threshold > Level::SuppressStdout.value(),
            Stream::Stderr => threshold > Level::SuppressStderr.value(),
        }
    }

    pub const fn stream(self) -> Stream {
        match self {
            Level::Error | Level::Fatal => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    /// Index into the prefix table, for the emitting levels only.
    #[inline]
    pub(crate) fn prefix_index(self) -> Option<usize> {
        usize::try_from(self.value()).ok().filter(|i| *i < Level::EMITTING.len())
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::SuppressStderr => "SUPPRESS_STDERR",
            Level::SuppressStdout => "SUPPRESS_STDOUT",
            Level::None => "NONE",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

impl TryFrom<i32> for Level {
    type Error = LoggerError;

    fn try_from(value: i32) -> Result<Self, LoggerError> {
        match value {
            -3 => Ok(Level::SuppressStderr),
            -2 => Ok(Level::SuppressStdout),
            -1 => Ok(Level::None),
            0 => Ok(Level::Fatal),
            1 => Ok(Level::Error),
            2 => Ok(Level::Warn),
            3 => Ok(Level::Info),
            4 => Ok(Level::Debug),
            other => Err(LoggerError::InvalidThreshold(other)),
        }
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Level::SuppressStderr, Level::SuppressStdout, Level::None,
            Level::Fatal, Level::Error, Level::Warn, Level::Info, Level::Debug
        ]
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LoggerError::UnknownLevel(s.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
