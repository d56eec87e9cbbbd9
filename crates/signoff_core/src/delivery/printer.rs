//! File-system print adapter that stores the rendered HTML document.
//!
//! # Invariants
//! - A report file is either fully written or absent; partial output is
//!   removed before an error is returned.

use super::{AdapterError, DeliveryChannel, PrintAdapter, PrintJob, ReportFile};
use log::{error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use uuid::Uuid;

const HTML_CONTENT_TYPE: &str = "text/html";
const REPORT_FILE_PREFIX: &str = "safety-meeting-report";

/// Writes each print job as an HTML file under one directory.
#[derive(Debug, Clone)]
pub struct HtmlFilePrinter {
    output_dir: PathBuf,
}

impl HtmlFilePrinter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_report(&self, job: &PrintJob) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let target = self
            .output_dir
            .join(format!("{REPORT_FILE_PREFIX}-{}.html", Uuid::new_v4()));

        // The temp file is deleted on drop unless persisted.
        let mut staged = NamedTempFile::new_in(&self.output_dir)?;
        staged.write_all(job.html.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}

impl PrintAdapter for HtmlFilePrinter {
    fn print_to_file(&self, job: &PrintJob) -> Result<ReportFile, AdapterError> {
        let started_at = Instant::now();
        match self.write_report(job) {
            Ok(path) => {
                info!(
                    "event=report_print module=delivery status=ok adapter=html_file bytes={} duration_ms={}",
                    job.html.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(ReportFile {
                    uri: path.display().to_string(),
                    content_type: HTML_CONTENT_TYPE.to_string(),
                })
            }
            Err(err) => {
                error!(
                    "event=report_print module=delivery status=error adapter=html_file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(AdapterError::new(
                    DeliveryChannel::Print,
                    format!("failed to write report file: {err}"),
                ))
            }
        }
    }
}
