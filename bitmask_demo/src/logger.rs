//! Module provides initialization of global application logger

use std::io;

use chrono::{Local, SecondsFormat};
use log::SetLoggerError;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LoggerConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use thiserror::Error;

use crate::config::Config;

/// Error that can happen on logger initialization.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to create log file: {0}")]
    File(#[from] io::Error),

    #[error("wrong logger configuration: {0}")]
    Config(String),

    #[error("logger was already initialized: {0}")]
    Initialized(#[from] SetLoggerError),
}

/// Initializes the global logger for an application.
///
/// Messages go to the console and, if configured, to a new timestamped file.
///
pub fn init(config: &Config) -> Result<Handle, LoggerError> {
    let pattern = "{d:<35} [thread \"{T}\" id {({I}]):<6} {l:<5} {t} >> {m}{n}";
    let encoder = Box::new(PatternEncoder::new(pattern));

    let stdout = ConsoleAppender::builder().encoder(encoder.clone()).build();
    let mut builder =
        LoggerConfig::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root = Root::builder().appender("stdout");

    if let Some(directory) = config.log_directory() {
        let file_name = format!(
            "logfile_{}.log",
            Local::now()
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
                .replace(':', "-"),
        );
        let file = FileAppender::builder()
            .encoder(encoder)
            .build(directory.join(file_name))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let logger_config = builder
        .build(root.build(config.log_level()))
        .map_err(|errors| LoggerError::Config(errors.to_string()))?;
    Ok(log4rs::init_config(logger_config)?)
}
