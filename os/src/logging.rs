use log::{self, Level, LevelFilter, Log, Metadata, Record};

use crate::println;

struct Logger;

fn color_code(level: Level) -> u8 {
    match level {
        Level::Error => 31, // red
        Level::Warn => 93,  // bright yellow
        Level::Info => 34,  // blue
        Level::Debug => 32, // green
        Level::Trace => 90, // bright black
    }
}

impl Log for Logger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        println!(
            "\x1b[{}m[{:>5}] {}\x1b[0m",
            color_code(record.level()),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger;

pub fn init() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(match option_env!("LOG") {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    });
}
