//! Size-capped rolling file plus an in-memory ring of recent lines.
//!
//! Files: `{app}.log` is current, `{app}.1.log` the previous one, up to
//! `{app}.{max_files - 1}.log`; older files are deleted on rotation.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_RING_LINES: usize = 500;

#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<State>>,
}

struct State {
    dir: PathBuf,
    app_name: String,
    file: File,
    written: u64,
    max_bytes: u64,
    max_files: usize,
    ring: VecDeque<String>,
    ring_capacity: usize,
    partial: String,
}

impl RollingWriter {
    pub fn new(
        dir: &Path,
        app_name: &str,
        max_bytes: u64,
        max_files: usize,
        ring_capacity: usize,
    ) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = current_path(dir, app_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            inner: Arc::new(Mutex::new(State {
                dir: dir.to_path_buf(),
                app_name: app_name.to_string(),
                file,
                written,
                max_bytes: max_bytes.max(1),
                max_files: max_files.max(1),
                ring: VecDeque::with_capacity(ring_capacity),
                ring_capacity,
                partial: String::new(),
            })),
        })
    }

    pub fn current_file(&self) -> PathBuf {
        let state = self.lock();
        current_path(&state.dir, &state.app_name)
    }

    /// Newest `n` complete lines, oldest first
    pub fn recent(&self, n: usize) -> Vec<String> {
        let state = self.lock();
        let skip = state.ring.len().saturating_sub(n);
        state.ring.iter().skip(skip).cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic mid-write leaves the state usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        if state.written > 0 && state.written + buf.len() as u64 > state.max_bytes {
            state.rotate()?;
        }
        state.file.write_all(buf)?;
        state.written += buf.len() as u64;
        state.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl State {
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let oldest = numbered_path(&self.dir, &self.app_name, self.max_files - 1);
        if self.max_files > 1 && oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.max_files.saturating_sub(1)).rev() {
            let from = numbered_path(&self.dir, &self.app_name, n);
            if from.exists() {
                fs::rename(&from, numbered_path(&self.dir, &self.app_name, n + 1))?;
            }
        }
        let current = current_path(&self.dir, &self.app_name);
        if self.max_files > 1 {
            fs::rename(&current, numbered_path(&self.dir, &self.app_name, 1))?;
        }
        self.file = OpenOptions::new().create(true).write(true).truncate(true).open(&current)?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.ring_capacity == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(end) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=end).collect();
            if self.ring.len() == self.ring_capacity {
                self.ring.pop_front();
            }
            self.ring.push_back(line.trim_end().to_string());
        }
    }
}

fn current_path(dir: &Path, app_name: &str) -> PathBuf {
    dir.join(format!("{}.log", app_name))
}

fn numbered_path(dir: &Path, app_name: &str, n: usize) -> PathBuf {
    dir.join(format!("{}.{}.log", app_name, n))
}
