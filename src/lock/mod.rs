//! Cross-process advisory locks for parallel test workers
//!
//! A lock is a marker file created with exclusive-create semantics in a shared
//! directory. The creator (owner) may run a one-time setup whose result is
//! persisted next to the lock; workers that find the lock taken poll until it
//! disappears or the setup data shows up, then adopt that data. An optional
//! count file turns the lock into a first/last pattern: the first worker sets the
//! stand up, the last one to leave tears it down.
//!
//! There is no fairness and no deadlock detection. Mutual exclusion relies only
//! on the filesystem's atomic `create_new`.

pub mod count;
mod guard;

pub use guard::LockGuard;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const LOCK_EXTENSION: &str = "lock";
const DATA_SUFFIX: &str = ".data.json";
const COUNT_EXTENSION: &str = "count";

/// Lock errors
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock data error: {0}")]
    Data(#[from] serde_json::Error),

    #[error("Corrupt count file {path:?}: {content:?}")]
    CorruptCount { path: PathBuf, content: String },

    #[error("Timeout waiting for lock '{name}' (exceeded {} seconds)", .waited.as_secs())]
    Timeout { name: String, waited: Duration },
}

impl LockError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        LockError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Lock manager settings
#[derive(Debug, Clone)]
pub struct LockSettings {
    /// Directory shared by every worker
    pub dir: PathBuf,

    /// Delay between attempts while the lock is taken
    pub poll_interval: Duration,

    /// Give up waiting after this long; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("lock"),
            poll_interval: Duration::from_millis(500),
            timeout: Some(Duration::from_secs(300)),
        }
    }
}

/// Which files make up a named lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSpec {
    name: String,
    with_data: bool,
    shared: bool,
}

impl LockSpec {
    /// Plain mutual exclusion: `<name>.lock`
    pub fn exclusive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            with_data: false,
            shared: false,
        }
    }

    /// Persist setup output to `<name>.data.json` so waiters can adopt it
    pub fn with_data(mut self) -> Self {
        self.with_data = true;
        self
    }

    /// Reference-count holders in `<name>.count`
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn paths(&self, dir: &Path) -> LockPaths {
        LockPaths {
            lock: dir.join(format!("{}.{}", self.name, LOCK_EXTENSION)),
            data: self
                .with_data
                .then(|| dir.join(format!("{}{}", self.name, DATA_SUFFIX))),
            count: self
                .shared
                .then(|| dir.join(format!("{}.{}", self.name, COUNT_EXTENSION))),
        }
    }
}

/// Resolved file paths of one lock
#[derive(Debug, Clone)]
pub(crate) struct LockPaths {
    pub(crate) lock: PathBuf,
    pub(crate) data: Option<PathBuf>,
    pub(crate) count: Option<PathBuf>,
}

impl LockPaths {
    /// Remove every file of the lock, logging (not failing) on errors.
    ///
    /// The lock file goes last: once it is gone a new owner may start the next
    /// generation, and its count and data files must not be swept up here.
    pub(crate) fn remove_all(&self) {
        for path in self
            .data
            .iter()
            .chain(self.count.iter())
            .chain(std::iter::once(&self.lock))
        {
            match std::fs::remove_file(path) {
                Ok(()) => debug!("Removed {:?}", path),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove {:?}: {}", path, e),
            }
        }
    }
}

/// State of a lock found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockStatus {
    pub name: String,
    pub holder: String,
    pub has_data: bool,
    pub count: Option<u64>,
}

/// File-based lock manager
#[derive(Debug, Clone)]
pub struct LockManager {
    settings: LockSettings,
}

impl LockManager {
    /// Create a manager, creating the lock directory if needed
    pub fn new(settings: LockSettings) -> Result<Self, LockError> {
        std::fs::create_dir_all(&settings.dir).map_err(|e| LockError::io(&settings.dir, e))?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &LockSettings {
        &self.settings
    }

    /// Acquire a lock without setup
    pub async fn acquire(&self, spec: &LockSpec) -> Result<LockGuard<()>, LockError> {
        self.acquire_inner(spec, None::<fn() -> std::future::Ready<Result<(), LockError>>>)
            .await
    }

    /// Acquire a lock; if this worker becomes the owner it runs `setup` once and
    /// shares the result with everyone who joins later.
    ///
    /// When setup fails the lock file is removed again so other workers are not
    /// left waiting on a lock nobody will release.
    pub async fn acquire_with<T, F, Fut, E>(
        &self,
        spec: &LockSpec,
        setup: F,
    ) -> Result<LockGuard<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        self.acquire_inner(spec, Some(setup)).await
    }

    async fn acquire_inner<T, F, Fut, E>(
        &self,
        spec: &LockSpec,
        mut setup: Option<F>,
    ) -> Result<LockGuard<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        let paths = spec.paths(&self.settings.dir);
        let holder = holder_id();
        let started = Instant::now();

        let (data, owner) = loop {
            if try_create(&paths.lock, &holder)? {
                info!(lock = spec.name(), %holder, "Lock acquired");

                let data = match setup.take() {
                    Some(setup) => match setup().await {
                        Ok(value) => Some(value),
                        Err(e) => {
                            warn!(lock = spec.name(), "Setup failed, giving the lock back");
                            paths.remove_all();
                            return Err(e);
                        }
                    },
                    None => None,
                };

                // Counter before data: waiters only adopt data they can join
                if let Some(count_path) = &paths.count {
                    match count::increment(count_path) {
                        Ok(count) => {
                            info!(lock = spec.name(), "Lock count incremented to {}", count)
                        }
                        Err(e) => {
                            paths.remove_all();
                            return Err(e.into());
                        }
                    }
                }

                if let (Some(data_path), Some(value)) = (&paths.data, &data) {
                    if let Err(e) = write_data(data_path, value) {
                        paths.remove_all();
                        return Err(e.into());
                    }
                }

                break (data, true);
            }

            let waited = started.elapsed();
            if let Some(timeout) = self.settings.timeout {
                if waited >= timeout {
                    warn!(
                        lock = spec.name(),
                        "Lock timeout exceeded after {} seconds",
                        timeout.as_secs()
                    );
                    return Err(LockError::Timeout {
                        name: spec.name().to_string(),
                        waited,
                    }
                    .into());
                }
            }

            tokio::time::sleep(self.settings.poll_interval).await;

            match (&paths.data, &paths.count) {
                (Some(data_path), count_path) if data_path.exists() => {
                    if let Some(count_path) = count_path {
                        // Zero means the last holder is tearing this generation down
                        let Some(count) = count::join(count_path)? else {
                            continue;
                        };
                        info!(lock = spec.name(), "Lock count incremented to {}", count);
                    }

                    match read_data(data_path)? {
                        Some(value) => {
                            debug!(lock = spec.name(), "Adopted data from lock owner");
                            break (Some(value), false);
                        }
                        None => {
                            if let Some(count_path) = count_path {
                                count::decrement(count_path)?;
                            }
                        }
                    }
                }
                (None, Some(count_path)) => {
                    if let Some(count) = count::join(count_path)? {
                        info!(lock = spec.name(), "Joined shared lock, count {}", count);
                        break (None, false);
                    }
                }
                _ => {}
            }
        };

        Ok(LockGuard::new(spec.name().to_string(), paths, data, owner))
    }

    /// Locks currently present in the lock directory, sorted by name
    pub fn list(&self) -> Result<Vec<LockStatus>, LockError> {
        let dir = &self.settings.dir;
        let entries = std::fs::read_dir(dir).map_err(|e| LockError::io(dir, e))?;

        let mut locks = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| LockError::io(dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(LOCK_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let holder = match std::fs::read_to_string(&path) {
                Ok(holder) => holder.trim().to_string(),
                // Released between read_dir and now
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(LockError::io(&path, e)),
            };
            let paths = LockSpec::exclusive(name)
                .with_data()
                .shared()
                .paths(dir);

            locks.push(LockStatus {
                name: name.to_string(),
                holder,
                has_data: paths.data.as_deref().is_some_and(Path::exists),
                count: match &paths.count {
                    Some(count_path) => count::read(count_path)?,
                    None => None,
                },
            });
        }

        locks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locks)
    }

    /// Force-remove the files of one lock, e.g. after a worker crashed.
    /// Returns whether a lock file was present.
    pub fn clear(&self, name: &str) -> bool {
        let paths = LockSpec::exclusive(name)
            .with_data()
            .shared()
            .paths(&self.settings.dir);
        let existed = paths.lock.exists();
        paths.remove_all();
        if existed {
            info!(lock = name, "Lock cleared");
        }
        existed
    }

    /// Force-remove every lock artefact in the directory; returns how many
    /// files were removed
    pub fn clear_all(&self) -> Result<usize, LockError> {
        let dir = &self.settings.dir;
        let entries = std::fs::read_dir(dir).map_err(|e| LockError::io(dir, e))?;

        let mut removed = 0;
        for entry in entries {
            let path = entry.map_err(|e| LockError::io(dir, e))?.path();
            let is_artefact = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| {
                    n.ends_with(".lock") || n.ends_with(".count") || n.ends_with(DATA_SUFFIX)
                });
            if !is_artefact {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(LockError::io(&path, e)),
            }
        }

        info!("Cleared {} lock files from {:?}", removed, dir);
        Ok(removed)
    }
}

/// One id per acquisition; tokio tasks hop threads, so the thread says nothing
fn holder_id() -> String {
    format!(
        "locked_by_{}_{}",
        std::process::id(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Exclusively create the lock file; false when someone else holds it
fn try_create(path: &Path, holder: &str) -> Result<bool, LockError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(holder.as_bytes())
                .map_err(|e| LockError::io(path, e))?;
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(LockError::io(path, e)),
    }
}

/// Write through a temp file and rename so waiters never read half a document
fn write_data<T: Serialize>(path: &Path, value: &T) -> Result<(), LockError> {
    let content = serde_json::to_string_pretty(value)?;
    let temp_path = path.with_extension("tmp");

    std::fs::write(&temp_path, content).map_err(|e| LockError::io(&temp_path, e))?;
    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        LockError::io(path, e)
    })
}

/// `None` when the owner released between our existence check and the read
fn read_data<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, LockError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LockError::io(path, e)),
    }
}
