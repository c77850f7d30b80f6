//! File logging via log4rs.
//!
//! The terminal UI owns stdout, so log records go to ~/.simon/simon.log.

use crate::utils::persistence::data_path;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use std::io;
use std::path::PathBuf;

pub const LOG_FILE: &str = "simon.log";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// Install the global logger. Returns the log file path.
pub fn init_logging(level: LevelFilter) -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE)?;
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    log4rs::init_config(config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(path)
}
