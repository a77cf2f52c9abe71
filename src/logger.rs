use std::sync::Arc;

use spdlog::sink::{FileSink, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stdout = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);

    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);

    builder.sink(stdout).sink(stderr);

    Ok(())
}

fn log_level(config: &Config, verbose: bool) -> Level {
    if verbose {
        return Level::Debug;
    }
    config.log.as_ref().map(|log| log.level.into()).unwrap_or(Level::Info)
}

/// Console logging is always on unless a log file is configured with
/// `log_to_console = false`.
pub fn configure_logger(config: &Config, verbose: bool) -> spdlog::Result<()> {
    let level = log_level(config, verbose);

    let location = config.log.as_ref().and_then(|log| log.location.as_ref().map(|loc| (log, loc)));
    let Some((log, location)) = location else {
        spdlog::default_logger().set_level_filter(LevelFilter::MoreSevereEqual(level));
        return Ok(());
    };

    let file_sink = Arc::new(FileSink::builder()
        .path(location.clone())
        .truncate(true)
        .build()?);

    let mut builder = Logger::builder();
    builder.sink(file_sink);
    if log.log_to_console {
        add_console_sinks(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(level));

    spdlog::set_default_logger(logger);

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::{parse_config, Log};

    use super::*;

    #[test]
    fn test_log_level() {
        let mut config = Config::default();
        assert_eq!(log_level(&config, false), Level::Info);
        assert_eq!(log_level(&config, true), Level::Debug);

        config.log = Some(Log { level: LogLevel::Warn, log_to_console: true, location: None });
        assert_eq!(log_level(&config, false), Level::Warn);
        assert_eq!(log_level(&config, true), Level::Debug);
    }

    #[test]
    fn test_level_from_config() {
        let config = parse_config("[log]\nlevel = \"Trace\"\n").unwrap();
        assert_eq!(log_level(&config, false), Level::Trace);
    }
}
