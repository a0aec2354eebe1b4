use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use std::io::Write;

/// Parses a log level, falling back to `info` for anything unrecognised.
pub fn level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Initiates a logger that writes to stderr, showing records at `level` and above. See [level] for the accepted names.
pub fn init(level: &str) {
    env_logger::builder()
        .filter_level(self::level(level))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Rgb(100, 200, 255)),
                Level::Trace => style.set_color(Color::Rgb(255, 100, 255)),
            };

            writeln!(
                buf,
                "{} | {} | {} | {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                format_args!("{:^5}", style.value(record.level())),
                format_args!("{:^30}", record.target()),
                record.args(),
            )
        })
        .init()
}
