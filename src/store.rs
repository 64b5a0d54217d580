use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{
    fs,
    io::AsyncWriteExt,
    sync::{Mutex, MutexGuard},
};

use crate::{config::AppConfig, error::StoreError};

/// short_code -> original_url. The whole persisted state of the service.
pub type LinkMap = BTreeMap<String, String>;

/// File-backed link store.
///
/// Every read goes to disk; nothing is cached between requests. Writers that
/// need a read-check-write sequence take `lock_writes` first so that two
/// shorten requests in this process cannot overwrite each other's entry.
#[derive(Debug)]
pub struct LinkStore {
    dir: PathBuf,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LinkStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl AsRef<Path>) -> Self {
        let dir = dir.into();
        let path = dir.join(file_name);
        Self {
            dir,
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.storage_dir, &config.storage_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize load -> check -> save sequences within this process.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    // ── Initialisation ─────────────────────────────────────────────────────

    /// Create the storage directory and an empty `{}` links file if they are
    /// missing. An existing file is never touched.
    pub async fn ensure_storage_exists(&self) -> Result<(), StoreError> {
        if !fs::try_exists(&self.dir).await.map_err(|e| self.io(&self.dir, e))? {
            fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| self.io(&self.dir, e))?;
            tracing::info!("Storage directory created: {}", self.dir.display());
        }

        let created = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;

        match created {
            Ok(mut file) => {
                file.write_all(b"{}")
                    .await
                    .map_err(|e| self.io(&self.path, e))?;
                file.flush().await.map_err(|e| self.io(&self.path, e))?;
                tracing::info!("Links file created: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(self.io(&self.path, e)),
        }
    }

    // ── Load / save ────────────────────────────────────────────────────────

    /// Read the links file. A missing file is created empty and an empty map
    /// returned; unparseable content is an error.
    pub async fn load_links(&self) -> Result<LinkMap, StoreError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.ensure_storage_exists().await?;
                return Ok(LinkMap::new());
            }
            Err(e) => return Err(self.io(&self.path, e)),
        };

        serde_json::from_slice(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the links file with `links`. The write is not atomic: a crash
    /// half-way can leave a truncated file behind.
    pub async fn save_links(&self, links: &LinkMap) -> Result<(), StoreError> {
        let result = self.write_links(links).await;
        match &result {
            Ok(()) => tracing::info!(
                "Links saved successfully ({} entries) to {}",
                links.len(),
                self.path.display()
            ),
            Err(e) => tracing::error!("Error saving links: {}", e),
        }
        result
    }

    async fn write_links(&self, links: &LinkMap) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(links)?;
        fs::write(&self.path, body)
            .await
            .map_err(|e| self.io(&self.path, e))
    }

    fn io(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
