use std::{
    fs,
    path::{Path, PathBuf},
    sync::{mpsc, Mutex},
};

use crate::prelude::Result;

pub const JOB_DRAFTS_KEY: &str = "jobDrafts";
pub const JOB_CANDIDATES_KEY: &str = "jobCandidates";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
}

/// String key-value store backed by one file per key, values JSON text.
/// Every write is broadcast to watchers so mounted views can refresh.
pub struct LocalStore {
    dir: PathBuf,
    watchers: Mutex<Vec<mpsc::Sender<StorageEvent>>>,
}

impl LocalStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(LocalStore {
            dir,
            watchers: Mutex::new(Vec::new()),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)?;
        self.notify(key);
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
            self.notify(key);
        }
        Ok(())
    }

    pub fn watch(&self) -> mpsc::Receiver<StorageEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut watchers) = self.watchers.lock() {
            watchers.push(tx);
        }
        rx
    }

    fn notify(&self, key: &str) {
        let Ok(mut watchers) = self.watchers.lock() else {
            return;
        };
        watchers.retain(|tx| tx.send(StorageEvent { key: key.into() }).is_ok());
    }
}
