use std::fmt::{self, Display, Write as _};
use std::io::{self, Write};
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::Local;

pub use crate::error::LoggerError;
pub use crate::levels::{Level, Stream};
use crate::sync::Snapshot;

/// Default timestamp layout, e.g. `2024/03/01 17:04:05`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Default labels, indexed by level value (FATAL first, DEBUG last).
pub const DEFAULT_PREFIXES: [&str; 5] = ["FATAL", "ERR", "WARN", "INFO", "DEBUG"];

/// The current local time in `format`, or `None` if chrono can't render it.
fn render_timestamp(format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", Local::now().format(format)).ok()?;
    Some(out)
}

/// What to do once a FATAL line has been written.
pub type FatalAction = Arc<dyn Fn() + Send + Sync>;

fn exit_with_failure() -> FatalAction {
    Arc::new(|| std::process::exit(1))
}

/// A partial update for a [`Logger`].
///
/// Every field left as `None` keeps its current value. Fields that are set but
/// invalid are ignored as well, see [`Logger::configure`].
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_fatal: Option<FatalAction>,
    /// Must be within `[Level::Fatal, Level::Debug]`, i.e. `0..=4`.
    pub threshold: Option<i32>,
    /// Must hold exactly five labels, FATAL first.
    pub prefixes: Option<Vec<String>>,
    /// A strftime pattern as understood by `chrono`. Empty means unset.
    pub timestamp_format: Option<String>,
}

impl Config {
    /// Sets the action run after every FATAL line.
    ///
    /// # Arguments
    ///
    /// * `action` - Replaces the default `exit(1)`, e.g. with a panic in tests.
    pub fn with_on_fatal(mut self, action: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_fatal = Some(Arc::new(action));
        self
    }

    /// Sets the threshold. Sentinels are rejected on merge, use
    /// [`Logger::set_level`] for those.
    pub fn with_threshold(mut self, threshold: Level) -> Self {
        self.threshold = Some(threshold.value());
        self
    }

    /// Sets the labels, FATAL first. Anything but five entries is rejected
    /// on merge.
    pub fn with_prefixes<I, P>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the chrono strftime pattern for the timestamp column.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("on_fatal", &self.on_fatal.as_ref().map(|_| "Fn()"))
            .field("threshold", &self.threshold)
            .field("prefixes", &self.prefixes)
            .field("timestamp_format", &self.timestamp_format)
            .finish()
    }
}

/// The live configuration of a [`Logger`] at one point in time.
#[derive(Clone)]
pub struct Settings {
    threshold: Level,
    prefixes: [String; 5],
    timestamp_format: String,
    on_fatal: FatalAction,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: Level::Info,
            prefixes: DEFAULT_PREFIXES.map(String::from),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            on_fatal: exit_with_failure(),
        }
    }
}

impl Settings {
    /// The threshold lines are gated against.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn prefixes(&self) -> &[String; 5] {
        &self.prefixes
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Label printed for `level`. Sentinel levels have no entry in the table
    /// and fall back to their own name.
    pub fn prefix(&self, level: Level) -> &str {
        level.prefix_index().map_or(level.as_str(), |i| self.prefixes[i].as_str())
    }

    /// Merges `cfg` field by field. Valid fields are always applied; the
    /// returned error only reports the first field that was rejected.
    fn merge(&mut self, cfg: Config) -> Result<(), LoggerError> {
        let mut rejected = None;

        if let Some(action) = cfg.on_fatal {
            self.on_fatal = action;
        }

        if let Some(threshold) = cfg.threshold {
            match Level::try_from(threshold) {
                Ok(level) if Level::EMITTING.contains(&level) => self.threshold = level,
                _ => {
                    rejected.get_or_insert(LoggerError::InvalidThreshold(threshold));
                }
            }
        }

        if let Some(prefixes) = cfg.prefixes {
            match <[String; 5]>::try_from(prefixes) {
                Ok(prefixes) => self.prefixes = prefixes,
                Err(prefixes) => {
                    rejected.get_or_insert(LoggerError::InvalidPrefixes(prefixes.len()));
                }
            }
        }

        if let Some(format) = cfg.timestamp_format.filter(|f| !f.is_empty()) {
            let parses = !StrftimeItems::new(&format).any(|item| matches!(item, Item::Error));
            // Some items parse but refuse to format, e.g. `%#z`.
            if !parses || render_timestamp(&format).is_none() {
                rejected.get_or_insert(LoggerError::InvalidTimestampFormat(format));
            } else {
                self.timestamp_format = format;
            }
        }

        rejected.map_or(Ok(()), Err)
    }

    /// `<prefix> | <timestamp> | <message>\n`
    fn line(&self, level: Level, message: impl Display) -> String {
        let timestamp = render_timestamp(&self.timestamp_format)
            .or_else(|| render_timestamp(DEFAULT_TIMESTAMP_FORMAT))
            .unwrap_or_default();

        let mut line = String::new();
        if writeln!(line, "{} | {} | {}", self.prefix(level), timestamp, message).is_err() {
            // A failing `Display` on the message still ends its line.
            line.push('\n');
        }
        line
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("threshold", &self.threshold)
            .field("prefixes", &self.prefixes)
            .field("timestamp_format", &self.timestamp_format)
            .finish_non_exhaustive()
    }
}

/// Where finished lines are written.
pub trait Sink: Send + Sync {
    /// Writes `line` verbatim, newline included.
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()>;
}

/// The process' standard output and standard error.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdStreams;

impl Sink for StdStreams {
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()> {
        match stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(line.as_bytes())?;
                out.flush()
            }
            Stream::Stderr => io::stderr().lock().write_all(line.as_bytes()),
        }
    }
}

/// Values rendered back to back, without separator.
struct Concat<'a>(&'a [&'a dyn Display]);

impl Display for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|part| part.fmt(f))
    }
}

/// A leveled logger writing to a [`Sink`].
///
/// Each level comes in three flavours:
/// - direct (`info`): values concatenated with no separator,
/// - formatted (`infof`): a `format_args!` template,
/// - lazy (`infol`): a closure only called when the line will be written.
///
/// None of them report errors. A failed write is dropped.
pub struct Logger<S = StdStreams> {
    settings: Snapshot<Settings>,
    sink: S,
}

impl Logger<StdStreams> {
    /// A logger writing to stdout/stderr with the default settings.
    pub fn new() -> Self {
        Self::with_sink(StdStreams)
    }
}

impl Default for Logger<StdStreams> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sink> Logger<S> {
    /// Constructs a logger with the default settings, writing every line to
    /// `sink`.
    ///
    /// # Arguments
    ///
    /// * `sink` - Receives each finished line along with its stream.
    pub fn with_sink(sink: S) -> Self {
        Self {
            settings: Snapshot::new(Settings::default()),
            sink,
        }
    }

    /// The sink lines are written to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The current settings. Later calls to `configure` don't change the
    /// returned value.
    pub fn settings(&self) -> Arc<Settings> {
        self.settings.load()
    }

    /// The current threshold, possibly one of the sentinels.
    pub fn level(&self) -> Level {
        self.settings.load().threshold
    }

    /// Merges `cfg` into the live settings.
    ///
    /// This never fails: an out of range threshold, a prefix list that isn't
    /// exactly five long, or a timestamp format `chrono` can't render are all
    /// skipped, leaving the previous value in place.
    ///
    /// # Arguments
    ///
    /// * `cfg` - The fields to replace. `None` fields are left alone.
    pub fn configure(&self, cfg: Config) {
        let _ = self.try_configure(cfg);
    }

    /// Same merge as [`configure`](Self::configure), reporting the first
    /// field that was skipped. The other fields are applied regardless.
    ///
    /// # Returns
    ///
    /// `Ok(())` if every field was applied, otherwise the `LoggerError` for
    /// the first rejected one.
    pub fn try_configure(&self, cfg: Config) -> Result<(), LoggerError> {
        self.settings.update(|settings| settings.merge(cfg))
    }

    /// Sets the threshold to any level, sentinels included.
    ///
    /// `Level::SuppressStdout` silences the raw stdout writers,
    /// `Level::SuppressStderr` silences both raw writers.
    pub fn set_level(&self, level: Level) {
        self.settings.update(|settings| settings.threshold = level);
    }

    /// True iff the threshold is exactly DEBUG.
    pub fn is_debug_enabled(&self) -> bool {
        self.level() == Level::Debug
    }

    /// Gates, renders and writes one line at `level`. For FATAL, the fatal
    /// action runs afterwards whether or not anything was written.
    ///
    /// # Arguments
    ///
    /// * `level` - Decides the gate, the prefix and the stream.
    /// * `message` - Only called if the line is written.
    pub fn emitl<M: Display>(&self, level: Level, message: impl FnOnce() -> M) {
        let settings = self.settings.load();

        if Level::admits(settings.threshold.value(), level) {
            let line = settings.line(level, message());
            let _ = self.sink.write_line(level.stream(), &line);
        }

        if level == Level::Fatal {
            (settings.on_fatal)();
        }
    }

    /// Like [`emitl`](Self::emitl), with `parts` concatenated with no
    /// separator.
    pub fn emit(&self, level: Level, parts: &[&dyn Display]) {
        self.emitl(level, || Concat(parts))
    }

    /// Like [`emitl`](Self::emitl), with a `format_args!` message.
    pub fn emitf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.emitl(level, || args)
    }

    // Debug

    /// Logs the values at DEBUG, on stdout. Only written when the threshold
    /// is exactly DEBUG.
    ///
    /// # Arguments
    ///
    /// * `parts` - Rendered back to back with `Display`.
    pub fn debug(&self, parts: &[&dyn Display]) {
        self.emit(Level::Debug, parts)
    }

    /// Logs a formatted DEBUG message.
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Debug, args)
    }

    /// Logs the result of `message` at DEBUG. `message` isn't called unless
    /// the threshold is DEBUG.
    pub fn debugl<M: Display>(&self, message: impl FnOnce() -> M) {
        self.emitl(Level::Debug, message)
    }

    // Info

    /// Logs the values at INFO, on stdout.
    ///
    /// # Arguments
    ///
    /// * `parts` - Rendered back to back with `Display`.
    pub fn info(&self, parts: &[&dyn Display]) {
        self.emit(Level::Info, parts)
    }

    /// Logs a formatted INFO message.
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Info, args)
    }

    /// Logs the result of `message` at INFO, calling it only if the line
    /// will be written.
    pub fn infol<M: Display>(&self, message: impl FnOnce() -> M) {
        self.emitl(Level::Info, message)
    }

    // Warn

    /// Logs the values at WARN, on stdout.
    ///
    /// # Arguments
    ///
    /// * `parts` - Rendered back to back with `Display`.
    pub fn warn(&self, parts: &[&dyn Display]) {
        self.emit(Level::Warn, parts)
    }

    /// Logs a formatted WARN message.
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Warn, args)
    }

    /// Logs the result of `message` at WARN, calling it only if the line
    /// will be written.
    pub fn warnl<M: Display>(&self, message: impl FnOnce() -> M) {
        self.emitl(Level::Warn, message)
    }

    // Error, on stderr

    /// Logs the values at ERROR, on stderr.
    ///
    /// # Arguments
    ///
    /// * `parts` - Rendered back to back with `Display`.
    pub fn error(&self, parts: &[&dyn Display]) {
        self.emit(Level::Error, parts)
    }

    /// Logs a formatted ERROR message.
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Error, args)
    }

    /// Logs the result of `message` at ERROR, calling it only if the line
    /// will be written.
    pub fn errorl<M: Display>(&self, message: impl FnOnce() -> M) {
        self.emitl(Level::Error, message)
    }

    // Fatal, on stderr

    /// Writes the line, then runs the fatal action, which by default exits
    /// the process with status 1.
    ///
    /// # Arguments
    ///
    /// * `parts` - Rendered back to back with `Display`.
    pub fn fatal(&self, parts: &[&dyn Display]) {
        self.emit(Level::Fatal, parts)
    }

    /// Writes a formatted FATAL line, then runs the fatal action.
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Fatal, args)
    }

    /// Writes the result of `message` at FATAL, then runs the fatal action.
    pub fn fatall<M: Display>(&self, message: impl FnOnce() -> M) {
        self.emitl(Level::Fatal, message)
    }

    // Raw writers

    fn passthrough<M: Display>(&self, stream: Stream, message: impl FnOnce() -> M) {
        if !Level::passes_through(self.level().value(), stream) {
            return;
        }

        let mut line = String::new();
        if writeln!(line, "{}", message()).is_err() {
            line.push('\n');
        }
        let _ = self.sink.write_line(stream, &line);
    }

    /// Writes the values and a newline to stdout, without prefix, timestamp
    /// or level gating. Silenced at `Level::SuppressStdout` and below.
    ///
    /// # Arguments
    ///
    /// * `parts` - Rendered back to back with `Display`.
    pub fn stdout(&self, parts: &[&dyn Display]) {
        self.passthrough(Stream::Stdout, || Concat(parts))
    }

    /// Writes a formatted raw line to stdout.
    pub fn stdoutf(&self, args: fmt::Arguments<'_>) {
        self.passthrough(Stream::Stdout, || args)
    }

    /// Writes the result of `message` as a raw line to stdout. `message`
    /// isn't called while stdout is silenced.
    pub fn stdoutl<M: Display>(&self, message: impl FnOnce() -> M) {
        self.passthrough(Stream::Stdout, message)
    }

    /// Writes the values and a newline to stderr, without prefix, timestamp
    /// or level gating. Silenced at `Level::SuppressStderr`.
    ///
    /// # Arguments
    ///
    /// * `parts` - Rendered back to back with `Display`.
    pub fn stderr(&self, parts: &[&dyn Display]) {
        self.passthrough(Stream::Stderr, || Concat(parts))
    }

    /// Writes a formatted raw line to stderr.
    pub fn stderrf(&self, args: fmt::Arguments<'_>) {
        self.passthrough(Stream::Stderr, || args)
    }

    /// Writes the result of `message` as a raw line to stderr. `message`
    /// isn't called while stderr is silenced.
    pub fn stderrl<M: Display>(&self, message: impl FnOnce() -> M) {
        self.passthrough(Stream::Stderr, message)
    }
}
