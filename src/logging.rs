//! Logging setup
//!
//! Logs go to an append-mode file when one is configured, otherwise to
//! stderr with colored levels. The stderr writer turns `\n` into `\r\n` so
//! lines stay aligned while the terminal is in raw mode.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "KEYPROMPT_LOG";

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let log_file = config.log_file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(|| RawModeWriter::new(io::stderr()))
            .with_ansi(true)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

/// Writer that ends every line with `\r\n`
pub struct RawModeWriter<W: Write> {
    inner: W,
}

impl<W: Write> RawModeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for RawModeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for chunk in buf.split_inclusive(|&b| b == b'\n') {
            match chunk.strip_suffix(b"\n") {
                Some(line) => {
                    self.inner.write_all(line)?;
                    self.inner.write_all(b"\r\n")?;
                }
                None => self.inner.write_all(chunk)?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
