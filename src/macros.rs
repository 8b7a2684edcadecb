#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($method:ident $(, $arg:expr)* $(,)?) => {
        $crate::logger().$method(&[$(&$arg as &dyn ::core::fmt::Display),*])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emitf {
    ($method:ident, $($arg:tt)+) => {
        $crate::logger().$method(::core::format_args!($($arg)+))
    };
}

/// Writes a DEBUG line, only when the threshold is exactly DEBUG.
///
/// ```no_run
/// lvlog::debug!("cache size: ", 42);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:expr),* $(,)?) => { $crate::__emit!(debug $(, $arg)*) };
}

/// Writes a formatted DEBUG line.
///
/// ```no_run
/// lvlog::debugf!("cache size: {}", 42);
/// ```
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => { $crate::__emitf!(debugf, $($arg)+) };
}

/// Writes an INFO line, the values concatenated with no separator.
///
/// ```no_run
/// lvlog::info!("listening on port ", 8080);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:expr),* $(,)?) => { $crate::__emit!(info $(, $arg)*) };
}

#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => { $crate::__emitf!(infof, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:expr),* $(,)?) => { $crate::__emit!(warn $(, $arg)*) };
}

#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => { $crate::__emitf!(warnf, $($arg)+) };
}

/// Writes an ERROR line to stderr.
#[macro_export]
macro_rules! error {
    ($($arg:expr),* $(,)?) => { $crate::__emit!(error $(, $arg)*) };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => { $crate::__emitf!(errorf, $($arg)+) };
}

/// Writes a FATAL line to stderr, then runs the fatal action (by default,
/// exits with status 1).
#[macro_export]
macro_rules! fatal {
    ($($arg:expr),* $(,)?) => { $crate::__emit!(fatal $(, $arg)*) };
}

#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => { $crate::__emitf!(fatalf, $($arg)+) };
}

/// Writes the values and a newline to stdout, bypassing the level gate.
#[macro_export]
macro_rules! stdout {
    ($($arg:expr),* $(,)?) => { $crate::__emit!(stdout $(, $arg)*) };
}

#[macro_export]
macro_rules! stdoutf {
    ($($arg:tt)+) => { $crate::__emitf!(stdoutf, $($arg)+) };
}

/// Writes the values and a newline to stderr, bypassing the level gate.
#[macro_export]
macro_rules! stderr {
    ($($arg:expr),* $(,)?) => { $crate::__emit!(stderr $(, $arg)*) };
}

#[macro_export]
macro_rules! stderrf {
    ($($arg:tt)+) => { $crate::__emitf!(stderrf, $($arg)+) };
}
