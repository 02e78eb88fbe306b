// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

/// Installs the stderr logger. Only the first call in a process succeeds.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Parses `error|warn|info|debug|trace|off`, case-insensitively.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
  name.trim().parse().ok()
}

fn icon(level: Level) -> &'static str {
  match level {
    Level::Error => "🔴", // Red Circle
    Level::Warn => "🟠",  // Orange Circle
    Level::Info => "🔵",  // Blue Circle
    Level::Debug => "⚪", // White/Gray Circle
    Level::Trace => "▫️", // Small dot
  }
}

impl log::Log for StderrLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      // Format: "🔴  file.cif: missing field"
      let mut err = std::io::stderr().lock();
      let _ = writeln!(err, "{}  {}", icon(record.level()), record.args());
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn level_names() {
    assert_eq!(parse_level("warn"), Some(LevelFilter::Warn));
    assert_eq!(parse_level(" DEBUG "), Some(LevelFilter::Debug));
    assert_eq!(parse_level("off"), Some(LevelFilter::Off));
    assert_eq!(parse_level("loud"), None);
  }

  #[test]
  fn every_level_has_an_icon() {
    for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
      assert!(!icon(level).is_empty());
    }
  }
}
