//! Applyform - job-application form handling
//!
//! Computes the applicant's age, validates required fields, keeps every
//! submission in local storage, optionally forwards each one to a remote
//! endpoint, and exports the collection as CSV.

pub mod age;
pub mod config;
pub mod csv_export;
pub mod error;
pub mod form;
pub mod forwarder;
pub mod logging;
pub mod service;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApplyformError, Result};
pub use store::ApplicationStore;
pub use types::{ApplicationRecord, FieldId, FlatRecord};
