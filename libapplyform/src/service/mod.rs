//! Service layer for Applyform
//!
//! `ApplyformService` owns the single in-memory `ApplicationStore` and hands
//! it to the two flows that need it:
//!
//! - `SubmissionService`: validate, store, forward, reset
//! - `ExportService`: serialize the collection and offer `applications.csv`
//!
//! # Example
//!
//! ```no_run
//! use libapplyform::form::{ConsoleNotifier, MemoryForm};
//! use libapplyform::service::ApplyformService;
//! use libapplyform::types::FieldId;
//! use libapplyform::Config;
//!
//! # async fn example() -> libapplyform::Result<()> {
//! let service = ApplyformService::from_config(&Config::load()?).await?;
//!
//! let mut form = MemoryForm::new()
//!     .with(FieldId::WorkArea, "Bangkok")
//!     .with(FieldId::Role1, "Barista");
//! let outcome = service
//!     .submission()
//!     .submit(&mut form, &mut ConsoleNotifier::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod submission;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use self::export::ExportService;
use self::submission::SubmissionService;
use crate::forwarder::{Forwarder, HttpForwarder};
use crate::storage::{KeyValueStore, SqliteStore};
use crate::store::ApplicationStore;
use crate::{Config, Result};

pub struct ApplyformService {
    store: Arc<Mutex<ApplicationStore>>,
    submission: SubmissionService,
    export: ExportService,
}

impl ApplyformService {
    /// Open the configured storage and build the optional forwarder
    pub async fn from_config(config: &Config) -> Result<Self> {
        let storage = SqliteStore::open(&config.storage.path).await?;

        let forwarder = build_forwarder(config);

        Ok(Self::with_storage(Arc::new(storage), forwarder).await)
    }

    /// Build the service over any storage backend
    pub async fn with_storage(
        storage: Arc<dyn KeyValueStore>,
        forwarder: Option<Arc<dyn Forwarder>>,
    ) -> Self {
        let store = Arc::new(Mutex::new(ApplicationStore::load(storage).await));

        Self {
            submission: SubmissionService::new(Arc::clone(&store), forwarder),
            export: ExportService::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn submission(&self) -> &SubmissionService {
        &self.submission
    }

    pub fn export(&self) -> &ExportService {
        &self.export
    }

    /// Shared handle to the loaded collection
    pub fn store(&self) -> Arc<Mutex<ApplicationStore>> {
        Arc::clone(&self.store)
    }
}

/// HTTP forwarder for the configured endpoint, if any
///
/// A forwarder that cannot be built is logged and skipped; submissions are
/// still saved locally.
fn build_forwarder(config: &Config) -> Option<Arc<dyn Forwarder>> {
    let endpoint = config.endpoint()?;
    let timeout = Duration::from_secs(config.submission.timeout_secs);

    match HttpForwarder::new(endpoint, timeout) {
        Ok(forwarder) => {
            debug!("Forwarding submissions to {}", endpoint);
            Some(Arc::new(forwarder))
        }
        Err(e) => {
            warn!("Forwarding to {} disabled: {}", endpoint, e);
            None
        }
    }
}
