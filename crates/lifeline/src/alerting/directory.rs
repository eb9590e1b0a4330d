use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use super::domain::{UserId, UserRecord};

/// Storage abstraction so the service can run against process memory or a
/// flat file. A lookup miss is `Ok(None)`, never an error.
pub trait ContactDirectory: Send + Sync {
    /// Store a record, replacing any existing record for the same user id.
    fn register(&self, record: UserRecord) -> Result<(), DirectoryError>;
    fn lookup(&self, user_id: &UserId) -> Result<Option<UserRecord>, DirectoryError>;
    /// Ids of every registered user, for diagnostics.
    fn user_ids(&self) -> Result<Vec<UserId>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory storage unavailable: {0}")]
    Storage(String),
}

/// Default directory: a process-memory map shared across requests.
#[derive(Default)]
pub struct InMemoryContactDirectory {
    records: Mutex<HashMap<UserId, UserRecord>>,
}

impl ContactDirectory for InMemoryContactDirectory {
    fn register(&self, record: UserRecord) -> Result<(), DirectoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }

    fn lookup(&self, user_id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn user_ids(&self) -> Result<Vec<UserId>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }
}

/// Flat-file directory: a single JSON document mapping user id to record,
/// rewritten in full on every registration. The mutex serializes the
/// read-modify-write cycle and the rewrite goes through a sibling temp file
/// and rename, so a crash mid-write cannot truncate the store.
pub struct JsonFileContactDirectory {
    path: PathBuf,
    io_guard: Mutex<()>,
}

impl JsonFileContactDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_guard: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<HashMap<UserId, UserRecord>, DirectoryError> {
        match fs::read_to_string(&self.path) {
            // An unreadable document degrades to the empty map.
            Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(DirectoryError::Storage(err.to_string())),
        }
    }

    fn store(&self, records: &HashMap<UserId, UserRecord>) -> Result<(), DirectoryError> {
        let serialized = serde_json::to_string_pretty(records)
            .map_err(|err| DirectoryError::Storage(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| DirectoryError::Storage(err.to_string()))?;
            }
        }

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serialized).map_err(|err| DirectoryError::Storage(err.to_string()))?;
        fs::rename(&staging, &self.path).map_err(|err| DirectoryError::Storage(err.to_string()))
    }
}

impl ContactDirectory for JsonFileContactDirectory {
    fn register(&self, record: UserRecord) -> Result<(), DirectoryError> {
        let _guard = self.io_guard.lock().expect("directory mutex poisoned");
        let mut records = self.load()?;
        records.insert(record.user_id.clone(), record);
        self.store(&records)
    }

    fn lookup(&self, user_id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        let _guard = self.io_guard.lock().expect("directory mutex poisoned");
        Ok(self.load()?.remove(user_id))
    }

    fn user_ids(&self) -> Result<Vec<UserId>, DirectoryError> {
        let _guard = self.io_guard.lock().expect("directory mutex poisoned");
        Ok(self.load()?.into_keys().collect())
    }
}
