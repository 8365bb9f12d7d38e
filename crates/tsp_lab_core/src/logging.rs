use std::{
    fmt::Arguments,
    fs::File,
    io::{self, Write},
};

use env_logger::{Builder, Target, fmt::Formatter};
use log::Level;

use crate::{AnalysisOptions, Error, LogFormat, Result};

pub fn init_logger(options: &AnalysisOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }

            write_record(buf, log_format, record.level(), record.target(), record.args())
        });

    match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|e| {
                Error::other(format!(
                    "failed to create log output file {}: {e}",
                    log_path.display()
                ))
            })?;
            builder.target(Target::Pipe(Box::new(log_file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

/// Level tags are padded to one width in every format.
fn write_record(
    out: &mut impl Write,
    log_format: LogFormat,
    level: Level,
    target: &str,
    args: &Arguments<'_>,
) -> io::Result<()> {
    let tag = level_tag(level);
    match log_format {
        LogFormat::Compact => writeln!(out, "{tag:<5} {args}"),
        LogFormat::Pretty => writeln!(out, "{tag:<5} [{target}] {args}"),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
