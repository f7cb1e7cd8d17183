use std::error::Error;
use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::model::config::LogConfig;

fn builder(config: &LogConfig) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.level.as_str()));
    builder.format_timestamp_millis();
    builder
}

/// Log to the configured file. Used while the TUI owns the terminal.
pub fn init_file(config: &LogConfig) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| format!("cannot open log file {}: {}", config.file.display(), e))?;
    builder(config)
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// Log to stderr. Used by one-shot CLI commands.
pub fn init_stderr(config: &LogConfig) -> Result<(), Box<dyn Error>> {
    builder(config).target(Target::Stderr).try_init()?;
    Ok(())
}
