use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::storage::metrics::{STORE_LOADS_TOTAL, STORE_SAVES_TOTAL};

/// How a [`JsonListStore::load`] obtained its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The backing file was read and parsed.
    Loaded,
    /// No backing file yet (first run); seed returned.
    Missing,
    /// The file exists but could not be read; seed returned.
    Unreadable,
    /// The file was read but is not a valid collection; seed returned.
    Corrupt,
}

impl LoadOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadOutcome::Loaded => "loaded",
            LoadOutcome::Missing => "missing",
            LoadOutcome::Unreadable => "unreadable",
            LoadOutcome::Corrupt => "corrupt",
        }
    }
}

/// Generic JSON file-backed list container.
///
/// Persists a `Vec<T>` as one pretty-printed JSON array. Reads never fail:
/// a missing, unreadable or corrupt file yields the seed collection. Writes
/// replace the whole file and surface I/O failures as [`ServiceError::Storage`].
///
/// Mutations go through [`JsonListStore::update`], which holds the container's
/// writer lock across load, mutate and save, so concurrent mutations of the
/// same container are applied one after another.
pub struct JsonListStore<T> {
    container: &'static str,
    file_path: PathBuf,
    seed: Vec<T>,
    write_lock: Mutex<()>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Create a container backed by `path`. No I/O happens until the first load or save.
    pub fn new<P: Into<PathBuf>>(container: &'static str, path: P, seed: Vec<T>) -> Self {
        Self { container, file_path: path.into(), seed, write_lock: Mutex::new(()) }
    }

    /// Current persisted collection, or the seed when nothing valid is stored.
    pub async fn load(&self) -> Vec<T> {
        self.load_with_outcome().await.0
    }

    pub async fn load_with_outcome(&self) -> (Vec<T>, LoadOutcome) {
        let (records, outcome) = match fs::read(&self.file_path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<T>>(&bytes) {
                Ok(records) => (records, LoadOutcome::Loaded),
                Err(e) => {
                    warn!(
                        container = self.container,
                        path = %self.file_path.display(),
                        error = %e,
                        "container file is corrupt; serving seed data"
                    );
                    (self.seed.clone(), LoadOutcome::Corrupt)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    container = self.container,
                    path = %self.file_path.display(),
                    "container file not found (first run); serving seed data"
                );
                (self.seed.clone(), LoadOutcome::Missing)
            }
            Err(e) => {
                warn!(
                    container = self.container,
                    path = %self.file_path.display(),
                    error = %e,
                    "container file unreadable; serving seed data"
                );
                (self.seed.clone(), LoadOutcome::Unreadable)
            }
        };
        STORE_LOADS_TOTAL.with_label_values(&[self.container, outcome.as_str()]).inc();
        (records, outcome)
    }

    /// Replace the persisted collection with `records`.
    pub async fn save(&self, records: &[T]) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.write_all(records).await
    }

    /// Load, apply `f`, and save, all under the container's writer lock.
    ///
    /// If `f` fails nothing is written and its error is returned.
    pub async fn update<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await;
        let out = f(&mut records)?;
        self.write_all(&records).await?;
        Ok(out)
    }

    async fn write_all(&self, records: &[T]) -> Result<(), ServiceError> {
        let result = self.write_file(records).await;
        let label = if result.is_ok() { "ok" } else { "error" };
        STORE_SAVES_TOTAL.with_label_values(&[self.container, label]).inc();
        match &result {
            Ok(()) => debug!(container = self.container, records = records.len(), "container saved"),
            Err(e) => warn!(container = self.container, error = %e, "container save failed"),
        }
        result
    }

    async fn write_file(&self, records: &[T]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }
        let data = serde_json::to_vec_pretty(records).map_err(ServiceError::storage)?;

        // Write beside the target, then rename over it.
        let mut tmp_name = self.file_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, data).await.map_err(ServiceError::storage)?;
        if let Err(e) = fs::rename(&tmp_path, &self.file_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(ServiceError::storage(e));
        }
        Ok(())
    }
}
