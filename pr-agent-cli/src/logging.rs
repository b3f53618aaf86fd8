//! Logging setup
//!
//! In MCP mode stdout carries the protocol, so logs go to a file under
//! `~/.pr-agent` instead. Every other command logs to stderr.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Level;

/// Directory under the home directory that holds the MCP log
pub const LOG_DIR_NAME: &str = ".pr-agent";

/// Default MCP log file name
pub const DEFAULT_LOG_FILE: &str = "mcp.log";

/// Writer that flushes and syncs the shared log file after every write
///
/// A client that kills the server mid-session still leaves a complete log.
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Wrap a shared log file
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file mutex poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Location of the MCP log: `~/.pr-agent/<PR_AGENT_LOG_FILE or mcp.log>`
pub fn mcp_log_path() -> PathBuf {
    let log_dir = dirs::home_dir()
        .map(|home| home.join(LOG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_DIR_NAME));
    let file_name = std::env::var("PR_AGENT_LOG_FILE")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    log_dir.join(file_name)
}

/// Pick the log level from the verbosity flags
pub fn level_for(mcp_mode: bool, quiet: bool, debug: bool, verbose: bool) -> Level {
    if mcp_mode || debug {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

fn open_log_file(path: &PathBuf) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global tracing subscriber
pub fn init(level: Level, mcp_mode: bool) {
    if mcp_mode {
        let path = mcp_log_path();
        match open_log_file(&path) {
            Ok(file) => {
                let shared = Arc::new(Mutex::new(file));
                tracing_subscriber::fmt()
                    .with_writer(move || FileWriterGuard::new(shared.clone()))
                    .with_max_level(level)
                    .with_ansi(false)
                    .init();
                return;
            }
            Err(e) => {
                // stdout belongs to the protocol
                eprintln!("Failed to open log file {}: {}", path.display(), e);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}
