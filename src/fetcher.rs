use crate::config::AppConfig;
use crate::error::AppError;
use crate::roster::Record;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// A record whose photo landed in the scratch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub record: Record,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Saved(Download),
    Failed { record: Record, reason: AppError },
}

/// Every outcome of a fetch pass, in roster order.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn downloads(&self) -> Vec<Download> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                FetchOutcome::Saved(download) => Some(download.clone()),
                FetchOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Record, &AppError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FetchOutcome::Failed { record, reason } => Some((record, reason)),
            FetchOutcome::Saved(_) => None,
        })
    }
}

pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        log::debug!("Building HTTP client with user agent: {}", config.user_agent);
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_all(&self, records: &[Record], scratch_dir: &Path) -> Result<FetchReport, AppError> {
        log::info!("Starting download of {} photos into {:?}", records.len(), scratch_dir);
        tokio::fs::create_dir_all(scratch_dir).await?;

        let mut report = FetchReport::default();
        for record in records {
            println!("Downloading {} ({})...", record.display_name, record.identifier);
            match self.fetch_one(record, scratch_dir).await {
                Ok(download) => {
                    println!("   Saved as {}", record.file_name());
                    report.outcomes.push(FetchOutcome::Saved(download));
                }
                Err(e) => {
                    println!("   Error downloading {}: {}", record.display_name, e);
                    log::warn!("Failed to download {} from {}: {}", record.identifier, record.source_url, e);
                    report.outcomes.push(FetchOutcome::Failed {
                        record: record.clone(),
                        reason: e,
                    });
                }
            }
        }

        log::info!(
            "Download pass finished: {}/{} saved.",
            report.downloads().len(),
            report.attempted()
        );
        Ok(report)
    }

    /// Streams one photo to `<scratch_dir>/<identifier>.jpg`.
    ///
    /// The body is written to a `.part` sibling first and only renamed once
    /// complete, so a failed transfer never leaves a file that looks finished.
    pub async fn fetch_one(&self, record: &Record, scratch_dir: &Path) -> Result<Download, AppError> {
        let path = scratch_dir.join(record.file_name());
        let part_path = scratch_dir.join(format!("{}.part", record.file_name()));

        match self.stream_to(record, &part_path).await {
            Ok(bytes) => {
                tokio::fs::rename(&part_path, &path).await?;
                log::debug!("Wrote {} bytes to {:?}", bytes, path);
                Ok(Download {
                    record: record.clone(),
                    path,
                })
            }
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(&part_path).await {
                    log::trace!("No partial file to remove at {:?}: {}", part_path, remove_err);
                }
                Err(e)
            }
        }
    }

    async fn stream_to(&self, record: &Record, dest: &Path) -> Result<u64, AppError> {
        log::trace!("GET {}", record.source_url);
        let response = self.client.get(record.source_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                url: record.source_url.to_string(),
                status,
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
