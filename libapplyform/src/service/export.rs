//! CSV export of the stored collection

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::csv_export::applications_to_csv;
use crate::error::{ExportError, Result};
use crate::form::Notifier;
use crate::store::ApplicationStore;

pub const EXPORT_FILE_NAME: &str = "applications.csv";
pub const CSV_MEDIA_TYPE: &str = "text/csv;charset=utf-8";

/// Notice shown when there is nothing to export
pub const NO_DATA_MESSAGE: &str = "ยังไม่มีข้อมูลใบสมัครในเครื่องนี้";

/// A file offered to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub media_type: String,
    pub contents: String,
}

/// Receives finished downloads
pub trait DownloadSink {
    /// Deliver `download`, returning where it ended up
    fn offer(&mut self, download: &Download) -> Result<String>;
}

/// Saves downloads into a directory under their own file name
///
/// Contents are written to a temporary file in the same directory and then
/// renamed into place; the temporary never outlives the call.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        let expanded = shellexpand::tilde(&directory.as_ref().to_string_lossy()).to_string();
        Self {
            directory: PathBuf::from(expanded),
        }
    }
}

impl DownloadSink for DirectorySink {
    fn offer(&mut self, download: &Download) -> Result<String> {
        std::fs::create_dir_all(&self.directory).map_err(ExportError::Io)?;

        let mut temp = NamedTempFile::new_in(&self.directory).map_err(ExportError::Io)?;
        temp.write_all(download.contents.as_bytes())
            .map_err(ExportError::Io)?;
        temp.flush().map_err(ExportError::Io)?;

        let target = self.directory.join(&download.file_name);
        temp.persist(&target).map_err(ExportError::Persist)?;

        debug!(
            "Wrote {} ({}) to {}",
            download.file_name,
            download.media_type,
            target.display()
        );
        Ok(target.display().to_string())
    }
}

/// Streams downloads to a writer such as stdout
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DownloadSink for WriterSink<W> {
    fn offer(&mut self, download: &Download) -> Result<String> {
        self.writer
            .write_all(download.contents.as_bytes())
            .map_err(ExportError::Io)?;
        self.writer.flush().map_err(ExportError::Io)?;
        Ok(download.file_name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The collection was empty; no file was produced
    NoData,
    Exported { location: String, rows: usize },
}

#[derive(Clone)]
pub struct ExportService {
    store: Arc<Mutex<ApplicationStore>>,
}

impl ExportService {
    pub fn new(store: Arc<Mutex<ApplicationStore>>) -> Self {
        Self { store }
    }

    /// Export every stored record through `sink`
    pub async fn export<S, N>(&self, sink: &mut S, notifier: &mut N) -> Result<ExportOutcome>
    where
        S: DownloadSink + ?Sized,
        N: Notifier + ?Sized,
    {
        let (download, rows) = {
            let store = self.store.lock().await;
            if store.is_empty() {
                info!("No stored applications to export");
                notifier.alert(NO_DATA_MESSAGE);
                return Ok(ExportOutcome::NoData);
            }
            (download_for(&store)?, store.len())
        };

        let location = sink.offer(&download)?;
        info!("Exported {} applications to {}", rows, location);

        Ok(ExportOutcome::Exported { location, rows })
    }
}

fn download_for(store: &ApplicationStore) -> Result<Download> {
    Ok(Download {
        file_name: EXPORT_FILE_NAME.to_string(),
        media_type: CSV_MEDIA_TYPE.to_string(),
        contents: applications_to_csv(store.applications())?,
    })
}
