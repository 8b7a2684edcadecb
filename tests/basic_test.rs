use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lvlog::{Config, Level, Logger, Sink, Stream};

#[derive(Default)]
struct Recorder {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl Recorder {
    fn drain(&self) -> Vec<(Stream, String)> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

impl Sink for Recorder {
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push((stream, line.to_string()));
        Ok(())
    }
}

fn test_logger(fatals: &Arc<AtomicUsize>) -> Logger<Recorder> {
    let fatals = fatals.clone();
    let logger = Logger::with_sink(Recorder::default());
    logger.configure(
        Config::default()
            .with_timestamp_format("at noon")
            .with_prefixes(["FATAL", "ERR", "WARN", "INFO", "DEBUG"])
            .with_on_fatal(move || {
                fatals.fetch_add(1, Ordering::SeqCst);
            })
    );
    logger
}

#[test]
fn test_scenario_info_line() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = test_logger(&fatals);
    logger.configure(Config::default().with_threshold(Level::Info));

    logger.info(&[&"a", &1]);

    assert_eq!(logger.sink().drain(), vec![(Stream::Stdout, "INFO | at noon | a1\n".to_string())]);
}

#[test]
fn test_gate_grid_all_styles() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = test_logger(&fatals);

    for threshold in Level::EMITTING {
        logger.set_level(threshold);

        for level in Level::EMITTING {
            let expected = match level {
                Level::Debug => threshold == Level::Debug,
                Level::Fatal => true,
                _ => threshold.value() >= level.value(),
            };

            let calls = AtomicUsize::new(0);
            logger.emit(level, &[&"m"]);
            logger.emitf(level, format_args!("{}", "m"));
            logger.emitl(level, || {
                calls.fetch_add(1, Ordering::SeqCst);
                "m"
            });

            let lines = logger.sink().drain();
            let written = if expected { 3 } else { 0 };
            assert_eq!(lines.len(), written, "threshold {} level {}", threshold, level);
            assert_eq!(calls.load(Ordering::SeqCst), written / 3);
            for (stream, line) in lines {
                assert_eq!(stream, level.stream());
                assert!(line.ends_with(" | at noon | m\n"), "{:?}", line);
            }
        }
    }

    // one FATAL per style per threshold
    assert_eq!(fatals.load(Ordering::SeqCst), 3 * Level::EMITTING.len());
}

#[test]
fn test_error_and_fatal_go_to_stderr_in_every_style() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = test_logger(&fatals);

    logger.error(&[&1]);
    logger.errorf(format_args!("{}", 2));
    logger.errorl(|| 3);
    logger.fatal(&[&4]);
    logger.fatalf(format_args!("{}", 5));
    logger.fatall(|| 6);

    let lines = logger.sink().drain();
    assert_eq!(lines.len(), 6);
    assert!(lines.iter().all(|(stream, _)| *stream == Stream::Stderr));
    assert_eq!(fatals.load(Ordering::SeqCst), 3);
}

#[test]
fn test_debug_is_exact_match_only() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = test_logger(&fatals);

    logger.set_level(Level::Info);
    logger.debugf(format_args!("nope"));
    assert!(!logger.is_debug_enabled());
    assert!(logger.sink().drain().is_empty());

    logger.set_level(Level::Debug);
    logger.debugf(format_args!("{}={}", "k", "v"));
    assert!(logger.is_debug_enabled());
    assert_eq!(logger.sink().drain(), vec![(Stream::Stdout, "DEBUG | at noon | k=v\n".to_string())]);
}

#[test]
fn test_invalid_updates_keep_previous_values() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = test_logger(&fatals);
    logger.configure(Config::default().with_threshold(Level::Warn));

    logger.configure(Config { threshold: Some(-1), ..Default::default() });
    logger.configure(Config { threshold: Some(5), ..Default::default() });
    logger.configure(Config::default().with_prefixes(["a", "b"]));

    let settings = logger.settings();
    assert_eq!(settings.threshold(), Level::Warn);
    assert_eq!(settings.prefix(Level::Error), "ERR");
    assert_eq!(settings.timestamp_format(), "at noon");
}

#[test]
fn test_passthrough_writers() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = test_logger(&fatals);
    logger.set_level(Level::Fatal);

    logger.stdout(&[&"x", &1, &2.5]);
    logger.stderrf(format_args!("{:>3}", 7));
    assert_eq!(logger.sink().drain(), vec![
        (Stream::Stdout, "x12.5\n".to_string()),
        (Stream::Stderr, "  7\n".to_string()),
    ]);

    logger.set_level(Level::SuppressStdout);
    logger.stdout(&[&"hidden"]);
    logger.stderr(&[&"still here"]);
    assert_eq!(logger.sink().drain(), vec![(Stream::Stderr, "still here\n".to_string())]);

    logger.set_level(Level::SuppressStderr);
    logger.stdout(&[&"hidden"]);
    logger.stderr(&[&"hidden"]);
    assert!(logger.sink().drain().is_empty());
}

#[test]
fn test_concurrent_emit_and_configure() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = Arc::new(test_logger(&fatals));

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                for n in 0..100 {
                    logger.infof(format_args!("{}:{}", i, n));
                }
            })
        })
        .collect();

    let flipper = {
        let logger = logger.clone();
        std::thread::spawn(move || {
            for n in 0..100 {
                let level = if n % 2 == 0 { Level::Error } else { Level::Info };
                logger.set_level(level);
            }
        })
    };

    for w in writers {
        w.join().unwrap();
    }
    flipper.join().unwrap();

    let lines = logger.sink().drain();
    for (stream, line) in &lines {
        assert_eq!(*stream, Stream::Stdout);
        let message = line
            .strip_prefix("INFO | at noon | ")
            .and_then(|rest| rest.strip_suffix('\n'))
            .unwrap_or_else(|| panic!("incomplete line {:?}", line));
        let (writer, n) = message.split_once(':').unwrap();
        assert!(writer.parse::<u32>().unwrap() < 4);
        assert!(n.parse::<u32>().unwrap() < 100);
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_config_from_json() {
    let fatals = Arc::new(AtomicUsize::new(0));
    let logger = test_logger(&fatals);

    let cfg: Config = serde_json::from_str(
        r#"{ "threshold": 4, "timestamp_format": "%H" }"#
    ).unwrap();
    assert!(cfg.on_fatal.is_none());
    assert!(cfg.prefixes.is_none());

    logger.configure(cfg);
    assert!(logger.is_debug_enabled());
    assert_eq!(logger.settings().timestamp_format(), "%H");

    let level: Level = serde_json::from_str(r#""SUPPRESS_STDOUT""#).unwrap();
    assert_eq!(level, Level::SuppressStdout);
}
