use std::fmt::Formatter;

pub enum LoggerError {
    InvalidThreshold(i32),
    InvalidPrefixes(usize),
    InvalidTimestampFormat(String),
    UnknownLevel(String),

    #[cfg(feature = "log")]
    SetLogger(log::SetLoggerError),
}

fn format_logger_error(l: &LoggerError, fmt: &mut Formatter) -> std::fmt::Result {
    match l {
        LoggerError::InvalidThreshold(t) => {
            write!(fmt, "Invalid Threshold: {} is outside [0, 4]", t)
        }
        LoggerError::InvalidPrefixes(n) => {
            write!(fmt, "Invalid Prefixes: expected 5, got {}", n)
        }
        LoggerError::InvalidTimestampFormat(f) => {
            write!(fmt, "Invalid Timestamp Format: {:?}", f)
        }
        LoggerError::UnknownLevel(s) => {
            write!(fmt, "Unknown Level: {:?}", s)
        }
        #[cfg(feature = "log")]
        LoggerError::SetLogger(e) => {
            write!(fmt, "SetLoggerError: {}", e)
        }
    }
}

#[cfg(feature = "log")]
impl From<log::SetLoggerError> for LoggerError {
    fn from(e: log::SetLoggerError) -> Self {
        LoggerError::SetLogger(e)
    }
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        format_logger_error(self, f)
    }
}

impl std::fmt::Debug for LoggerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_logger_error(self, f)
    }
}

impl std::error::Error for LoggerError {}
