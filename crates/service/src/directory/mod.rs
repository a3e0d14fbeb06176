pub mod file_store;

use async_trait::async_trait;
use models::EmployeeRecord;

use crate::errors::ServiceError;

/// Trait abstraction for the employee directory.
/// The file-backed `EmployeeDirectory` is the only implementation today.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All records, order unspecified.
    async fn list(&self) -> Vec<EmployeeRecord>;
    /// Record stored under `id`, or `None`.
    async fn get(&self, id: &str) -> Option<EmployeeRecord>;
    /// Insert or replace the record under `id` and return what was stored.
    async fn put(&self, id: String, record: EmployeeRecord) -> Result<EmployeeRecord, ServiceError>;
}
