use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::{DirectoryDocument, EmployeeRecord};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use super::EmployeeStore;
use crate::errors::ServiceError;

/// Employee directory loaded from a JSON file and held in memory.
///
/// The file is read once by [`EmployeeDirectory::load`]. Writes only touch the in-memory
/// map unless `persist_writes` is set, in which case every `put` rewrites the file.
/// A single lock guards the map: the last completed write wins.
#[derive(Clone)]
pub struct EmployeeDirectory {
    inner: Arc<RwLock<HashMap<String, EmployeeRecord>>>,
    file_path: Option<PathBuf>,
}

impl EmployeeDirectory {
    /// Read and parse the data file. A missing or malformed file is an error; nothing is created.
    pub async fn load<P: Into<PathBuf>>(path: P, persist_writes: bool) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let bytes = fs::read(&file_path)
            .await
            .map_err(|e| ServiceError::io(&file_path, e))?;
        let doc: DirectoryDocument = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Parse(format!("{}: {}", file_path.display(), e)))?;
        info!(path = %file_path.display(), records = doc.employees.len(), persist_writes, "employee directory loaded");

        Ok(Arc::new(Self {
            inner: Arc::new(RwLock::new(doc.employees)),
            file_path: persist_writes.then_some(file_path),
        }))
    }

    /// Build an in-memory directory from an already parsed document.
    pub fn from_document(doc: DirectoryDocument) -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(doc.employees)), file_path: None })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// All records, order unspecified.
    pub async fn list(&self) -> Vec<EmployeeRecord> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Record stored under `id`.
    pub async fn get(&self, id: &str) -> Option<EmployeeRecord> {
        let map = self.inner.read().await;
        map.get(id).cloned()
    }

    /// Insert or overwrite `id` unconditionally; the record's shape and `employeeId` are not checked.
    ///
    /// With write-through on, the file is written first and the map only changes once that
    /// succeeded, so a failed write leaves both copies as they were.
    pub async fn put(&self, id: String, record: EmployeeRecord) -> Result<EmployeeRecord, ServiceError> {
        let mut map = self.inner.write().await;
        if let Some(path) = &self.file_path {
            // lock held so file writes land in the same order as map writes
            let mut employees = map.clone();
            employees.insert(id.clone(), record.clone());
            let doc = DirectoryDocument { employees };
            let data = serde_json::to_vec_pretty(&doc).map_err(|e| ServiceError::Parse(e.to_string()))?;
            fs::write(path, data).await.map_err(|e| ServiceError::io(path, e))?;
        }
        let replaced = map.insert(id.clone(), record.clone()).is_some();
        debug!(%id, replaced, "employee stored");
        Ok(record)
    }
}

#[async_trait]
impl EmployeeStore for EmployeeDirectory {
    async fn list(&self) -> Vec<EmployeeRecord> { self.list().await }
    async fn get(&self, id: &str) -> Option<EmployeeRecord> { self.get(id).await }
    async fn put(&self, id: String, record: EmployeeRecord) -> Result<EmployeeRecord, ServiceError> { self.put(id, record).await }
}
