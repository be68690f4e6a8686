//! The locally persisted application collection

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Result, StorageError};
use crate::storage::KeyValueStore;
use crate::types::ApplicationRecord;

/// Storage key holding the JSON array of records
pub const APPLICATIONS_KEY: &str = "applications";

/// Append-only collection mirrored to durable storage
///
/// The in-memory sequence is always identical to the last successful write.
pub struct ApplicationStore {
    storage: Arc<dyn KeyValueStore>,
    applications: Vec<ApplicationRecord>,
}

impl ApplicationStore {
    /// Load the collection from `storage`
    ///
    /// Absent, unreadable, or malformed data yields an empty collection. The
    /// latter two are logged; neither is returned to the caller.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let applications = match storage.get_item(APPLICATIONS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ApplicationRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Stored applications are malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read stored applications, starting empty: {}", e);
                Vec::new()
            }
        };

        debug!("Loaded {} stored applications", applications.len());

        Self {
            storage,
            applications,
        }
    }

    /// Append `record` and re-persist the whole collection
    ///
    /// On a failed write the record is dropped again and the error returned.
    pub async fn append(&mut self, record: ApplicationRecord) -> Result<()> {
        self.applications.push(record);

        if let Err(e) = self.persist().await {
            self.applications.pop();
            return Err(e);
        }

        debug!("Stored application #{}", self.applications.len());
        Ok(())
    }

    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.applications).map_err(StorageError::Serialization)?;
        self.storage.set_item(APPLICATIONS_KEY, &json).await
    }

    pub fn applications(&self) -> &[ApplicationRecord] {
        &self.applications
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

impl std::fmt::Debug for ApplicationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationStore")
            .field("applications", &self.applications.len())
            .finish()
    }
}
