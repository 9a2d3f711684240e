use crate::archive::{self, PackageOutcome};
use crate::cleanup::{self, CleanupOutcome};
use crate::config::OutputLayout;
use crate::error::AppError;
use crate::fetcher::Fetcher;
use crate::roster::Record;
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug)]
pub struct RunSummary {
    pub attempted: usize,
    pub saved: usize,
    pub archive: Option<PathBuf>,
    pub cleanup: CleanupOutcome,
}

impl RunSummary {
    /// True when an archive was produced.
    pub fn succeeded(&self) -> bool {
        self.archive.is_some()
    }

    pub fn ratio(&self) -> String {
        format!("{}/{}", self.saved, self.attempted)
    }
}

/// Fetch every record, package whatever arrived, then remove the scratch directory.
pub async fn run(fetcher: &Fetcher, records: &[Record], layout: &OutputLayout) -> Result<RunSummary, AppError> {
    println!("Downloading Sample Employee Images...\n");
    let report = fetcher.fetch_all(records, &layout.scratch_dir).await?;
    let downloads = report.downloads();
    for (record, reason) in report.failures() {
        log::debug!("{} excluded from archive: {}", record.identifier, reason);
    }

    let packaged = if downloads.is_empty() {
        println!("\nNo images downloaded. Cannot create ZIP file.");
        Ok(PackageOutcome::Skipped)
    } else {
        println!("\nCreating ZIP file: {}...", layout.archive_path.display());
        let archive_path = layout.archive_path.clone();
        let to_package = downloads.clone();
        tokio::task::spawn_blocking(move || archive::package(&to_package, &archive_path))
            .await
            .map_err(AppError::from)
            .and_then(|result| result)
    };

    println!("\nCleaning up temporary files...");
    let cleaned = cleanup::cleanup(&layout.scratch_dir);
    match &cleaned {
        CleanupOutcome::Warning(e) => println!("   Cleanup warning: {}", e),
        _ => println!("   Cleanup complete"),
    }

    let archive = match packaged? {
        PackageOutcome::Written { path, entries } => {
            println!("\nZIP file created successfully!");
            println!("Location: {}", absolute(&path).display());
            log::info!("Archive holds {} entries", entries.len());
            Some(path)
        }
        PackageOutcome::Skipped => None,
    };

    let summary = RunSummary {
        attempted: report.attempted(),
        saved: downloads.len(),
        archive,
        cleanup: cleaned,
    };
    println!("Total images: {}", summary.ratio());
    Ok(summary)
}

fn absolute(path: &std::path::Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// How a run ended, as seen by the calling shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Archived,
    NoArchive,
    Failed,
    Interrupted,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Archived => 0,
            RunStatus::NoArchive | RunStatus::Failed => 1,
            RunStatus::Interrupted => 130,
        }
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Prints the closing lines for a finished run.
pub fn report(result: &Result<RunSummary, AppError>) -> RunStatus {
    match result {
        Ok(summary) if summary.succeeded() => {
            print_next_steps(summary);
            RunStatus::Archived
        }
        Ok(_) => {
            println!("\nFailed to download any images.");
            RunStatus::NoArchive
        }
        Err(e) => {
            log::error!("Run failed: {}", e);
            println!("\nAn error occurred: {}", e);
            RunStatus::Failed
        }
    }
}

pub fn report_interrupted() -> RunStatus {
    println!("\n\nDownload cancelled by user.");
    RunStatus::Interrupted
}

/// Resolves once `signal` fires. If the listener could not be installed this
/// never resolves, so the run carries on instead of looking cancelled.
pub async fn interrupted<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        log::warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Instructions for feeding the archive into the ID-card generator.
pub fn print_next_steps(summary: &RunSummary) {
    let rule = "=".repeat(60);
    let archive_name = summary
        .archive
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    println!("\n{}", rule);
    println!("SUCCESS! Your sample photo ZIP is ready!");
    println!("{}", rule);
    println!("\nNext Steps:");
    println!("   1. Download the sample CSV from the app");
    println!("   2. Upload the CSV file");
    println!("   3. Upload the {} file", archive_name);
    println!("   4. Generate bulk ID cards!");
    println!("\nTip: The ZIP contains images named by Employee ID");
    println!("   (24EMP001.jpg, 24EMP002.jpg, etc.)");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(saved: usize, archive: Option<&str>) -> RunSummary {
        RunSummary {
            attempted: 10,
            saved,
            archive: archive.map(PathBuf::from),
            cleanup: CleanupOutcome::Removed,
        }
    }

    #[test]
    fn ratio_reports_saved_over_attempted() {
        let summary = summary(7, Some("employee_photos.zip"));
        assert_eq!(summary.ratio(), "7/10");
        assert!(summary.succeeded());
    }

    #[test]
    fn no_archive_means_not_succeeded() {
        let summary = summary(0, None);
        assert!(!summary.succeeded());
        assert_eq!(summary.ratio(), "0/10");
    }

    #[test]
    fn archive_produced_exits_zero() {
        let status = report(&Ok(summary(10, Some("employee_photos.zip"))));
        assert_eq!(status, RunStatus::Archived);
        assert_eq!(status.code(), 0);
    }

    #[test]
    fn no_archive_exits_one() {
        let status = report(&Ok(summary(0, None)));
        assert_eq!(status, RunStatus::NoArchive);
        assert_eq!(status.code(), 1);
    }

    #[test]
    fn error_exits_one() {
        let status = report(&Err(AppError::Generic("disk full".to_string())));
        assert_eq!(status, RunStatus::Failed);
        assert_eq!(status.code(), 1);
    }

    #[test]
    fn interruption_exits_130() {
        let status = report_interrupted();
        assert_eq!(status, RunStatus::Interrupted);
        assert_eq!(status.code(), 130);
    }

    #[tokio::test]
    async fn delivered_signal_resolves() {
        let fired = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            interrupted(async { Ok(()) }),
        )
        .await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn failed_signal_registration_never_resolves() {
        let fired = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            interrupted(async { Err(std::io::Error::other("no signal handler")) }),
        )
        .await;
        assert!(fired.is_err());
    }
}
