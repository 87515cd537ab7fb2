use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{Local, NaiveDate};
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, EnvFilter};

use crate::{errors::Error, Result};

/// Initialize logging for the bot: console plus a daily log file in `log_dir`.
///
/// Default filter is `info` for everything with HTTP internals at `warn`.
/// Can be overridden with `RUST_LOG`.
pub fn init(service_name: &str, log_dir: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("info,hyper=warn,reqwest=warn,{service_name}=info"))
    });

    let file = DailyLogFile::new(log_dir, "bot")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_ansi(false).with_writer(file))
        .try_init()
        .map_err(|e| Error::External(format!("logging init failed: {e}")))?;

    Ok(())
}

/// Append-only log file that switches to `{prefix}_YYYYMMDD.log` whenever the
/// local date changes.
#[derive(Debug)]
pub struct DailyLogFile {
    dir: PathBuf,
    prefix: String,
    current: Mutex<Option<(NaiveDate, File)>>,
}

impl DailyLogFile {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let log = Self {
            dir,
            prefix: prefix.into(),
            current: Mutex::new(None),
        };
        // Open today's file eagerly so an unwritable directory fails at startup.
        let today = Local::now().date_naive();
        let file = log.open_for(today)?;
        if let Ok(mut guard) = log.current.lock() {
            *guard = Some((today, file));
        }
        Ok(log)
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}_{}.log", self.prefix, date.format("%Y%m%d")))
    }

    fn open_for(&self, date: NaiveDate) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(date))
    }

    fn write_on(&self, date: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .current
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;

        let stale = !matches!(guard.as_ref(), Some((d, _)) if *d == date);
        if stale {
            *guard = Some((date, self.open_for(date)?));
        }

        match guard.as_mut() {
            Some((_, file)) => file.write(buf),
            None => Ok(0),
        }
    }

    fn flush_current(&self) -> io::Result<()> {
        let mut guard = self
            .current
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        match guard.as_mut() {
            Some((_, file)) => file.flush(),
            None => Ok(()),
        }
    }
}

pub struct DailyLogWriter<'a> {
    log: &'a DailyLogFile,
}

impl Write for DailyLogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log.write_on(Local::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.log.flush_current()
    }
}

impl<'a> MakeWriter<'a> for DailyLogFile {
    type Writer = DailyLogWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        DailyLogWriter { log: self }
    }
}
