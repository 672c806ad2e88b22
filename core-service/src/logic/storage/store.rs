use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Named JSON documents kept in the data directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Patient,
    Readings,
    Attacks,
    Alerts,
}

impl Document {
    pub fn file_name(&self) -> &'static str {
        match self {
            Document::Patient => "patient.json",
            Document::Readings => "readings.json",
            Document::Attacks => "attacks.json",
            Document::Alerts => "alerts.json",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The log exists but is not a JSON array; appending would destroy it
    #[error("{0} is not a JSON array, refusing to overwrite it")]
    Corrupt(PathBuf),
}

/// Flat-file JSON document store
///
/// `load` never fails: a missing or unreadable document yields the default.
/// Appends are serialized so concurrent writers cannot drop records.
#[derive(Debug)]
pub struct JsonStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self, doc: Document) -> PathBuf {
        self.root.join(doc.file_name())
    }

    /// Load a document, falling back to `default` when missing or invalid
    pub fn load<T: DeserializeOwned>(&self, doc: Document, default: T) -> T {
        let path = self.path(doc);
        if !path.exists() {
            return default;
        }

        let parsed = fs::read(&path)
            .map_err(|e| e.to_string())
            .and_then(|data| serde_json::from_slice(&data).map_err(|e| e.to_string()));

        match parsed {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not load {}, using default: {}", path.display(), e);
                default
            }
        }
    }

    pub fn load_or_default<T: DeserializeOwned + Default>(&self, doc: Document) -> T {
        self.load(doc, T::default())
    }

    /// Load a log document record by record, skipping entries that do not
    /// match `T` instead of discarding the whole log.
    pub fn load_records<T: DeserializeOwned>(&self, doc: Document) -> Vec<T> {
        let raw: Vec<Value> = self.load(doc, Vec::new());
        let total = raw.len();

        let records: Vec<T> = raw.into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();

        if records.len() != total {
            log::debug!(
                "Skipped {} malformed record(s) in {}",
                total - records.len(),
                doc.file_name()
            );
        }
        records
    }

    /// Save a document (pretty-printed, directory created on demand)
    pub fn save<T: Serialize>(&self, doc: Document, value: &T) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        self.write(doc, value)
    }

    /// Read-modify-write a document under the write lock, returning the
    /// saved value
    pub fn update<T, F>(&self, doc: Document, default: T, apply: F) -> Result<T, StorageError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let _guard = self.write_lock.lock();
        let mut value = self.load(doc, default);
        apply(&mut value);
        self.write(doc, &value)?;
        Ok(value)
    }

    /// Append one record to a log document, returning the new length
    pub fn append<T: Serialize>(&self, doc: Document, record: &T) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock();
        let path = self.path(doc);

        let mut records: Vec<Value> = if path.exists() {
            let data = fs::read(&path).map_err(|source| StorageError::Io { path: path.clone(), source })?;
            if data.iter().all(u8::is_ascii_whitespace) {
                Vec::new()
            } else {
                serde_json::from_slice(&data).map_err(|_| StorageError::Corrupt(path.clone()))?
            }
        } else {
            Vec::new()
        };

        records.push(serde_json::to_value(record)?);
        self.write(doc, &records)?;

        Ok(records.len())
    }

    fn write<T: Serialize>(&self, doc: Document, value: &T) -> Result<(), StorageError> {
        let path = self.path(doc);

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }

        let json = serde_json::to_vec_pretty(value)?;
        fs::write(&path, json).map_err(|source| StorageError::Io { path, source })?;
        Ok(())
    }
}
