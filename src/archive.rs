use crate::error::AppError;
use crate::fetcher::Download;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Written { path: PathBuf, entries: Vec<String> },
    /// Nothing was downloaded, so no archive was created.
    Skipped,
}

pub fn package(downloads: &[Download], archive_path: &Path) -> Result<PackageOutcome, AppError> {
    if downloads.is_empty() {
        log::info!("No downloads to package; skipping {:?}", archive_path);
        return Ok(PackageOutcome::Skipped);
    }

    log::info!("Packaging {} photos into {:?}", downloads.len(), archive_path);
    let part_path = part_path(archive_path);
    let written = write_archive(downloads, &part_path).and_then(|entries| {
        std::fs::rename(&part_path, archive_path)?;
        Ok(entries)
    });
    let entries = match written {
        Ok(entries) => entries,
        Err(e) => {
            if let Err(remove_err) = std::fs::remove_file(&part_path) {
                log::trace!("No partial archive to remove at {:?}: {}", part_path, remove_err);
            }
            return Err(e);
        }
    };
    log::debug!("Archive {:?} finished with {} entries", archive_path, entries.len());

    Ok(PackageOutcome::Written {
        path: archive_path.to_path_buf(),
        entries,
    })
}

fn write_archive(downloads: &[Download], dest: &Path) -> Result<Vec<String>, AppError> {
    let file = File::create(dest)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::with_capacity(downloads.len());
    for download in downloads {
        let name = entry_name(&download.path)?;
        log::trace!("Adding {:?} as {}", download.path, name);
        zip.start_file(name.as_str(), options)?;
        let mut reader = BufReader::new(File::open(&download.path)?);
        io::copy(&mut reader, &mut zip)?;
        println!("   Added {}", name);
        entries.push(name);
    }

    zip.finish()?;
    Ok(entries)
}

fn part_path(archive_path: &Path) -> PathBuf {
    let mut name = archive_path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

fn entry_name(path: &Path) -> Result<String, AppError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| AppError::Generic(format!("No usable file name in {:?}", path)))
}
