use crate::domain::model::{LookupKey, Resolution};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Read-only lookup against the cached name/number index.
pub trait LocalIndex: Send + Sync {
    fn lookup(&self, key: &LookupKey) -> Option<Resolution>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Network-based name/number resolution.
#[async_trait]
pub trait RemoteResolver: Send + Sync {
    /// Resolve one standardized identifier. `Ok(None)` means the service
    /// answered but knows no matching body; `Err` means the query itself
    /// failed. The caller decides how failures surface.
    async fn resolve(&self, key: &LookupKey) -> Result<Option<Resolution>>;
}

pub trait ConfigProvider: Send + Sync {
    fn service_endpoint(&self) -> &str;
    fn index_url(&self) -> String;
    fn cache_dir(&self) -> &Path;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn try_local_first(&self) -> bool;
    fn show_progress(&self) -> bool;
    fn return_id(&self) -> bool;
}
