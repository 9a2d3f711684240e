use crate::error::AppError;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug)]
pub enum CleanupOutcome {
    Removed,
    /// The scratch directory was never created.
    Absent,
    Warning(AppError),
}

impl CleanupOutcome {
    pub fn is_clean(&self) -> bool {
        !matches!(self, CleanupOutcome::Warning(_))
    }
}

/// Deletes every file in the scratch directory and then the directory itself.
/// Failures are returned as a warning, never as an error.
pub fn cleanup(scratch_dir: &Path) -> CleanupOutcome {
    if !scratch_dir.exists() {
        log::debug!("Scratch directory {:?} does not exist; nothing to clean", scratch_dir);
        return CleanupOutcome::Absent;
    }

    match remove_scratch(scratch_dir) {
        Ok(removed) => {
            log::info!("Removed {} scratch files and {:?}", removed, scratch_dir);
            CleanupOutcome::Removed
        }
        Err(e) => {
            log::warn!("Cleanup of {:?} failed: {}", scratch_dir, e);
            CleanupOutcome::Warning(e)
        }
    }
}

fn remove_scratch(scratch_dir: &Path) -> Result<usize, AppError> {
    let mut removed = 0;
    for entry in WalkDir::new(scratch_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            log::trace!("Skipping nested directory: {:?}", entry.path());
            continue;
        }
        log::trace!("Removing scratch file: {:?}", entry.path());
        std::fs::remove_file(entry.path())?;
        removed += 1;
    }
    std::fs::remove_dir(scratch_dir)?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_files_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();
        std::fs::write(scratch.join("24EMP001.jpg"), b"a").unwrap();
        std::fs::write(scratch.join("24EMP002.jpg.part"), b"b").unwrap();

        let outcome = cleanup(&scratch);

        assert!(matches!(outcome, CleanupOutcome::Removed));
        assert!(!scratch.exists());
    }

    #[test]
    fn missing_directory_is_not_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = cleanup(&dir.path().join("never-created"));
        assert!(matches!(outcome, CleanupOutcome::Absent));
        assert!(outcome.is_clean());
    }

    #[test]
    fn leftover_subdirectory_is_reported_as_warning() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir_all(scratch.join("unexpected")).unwrap();
        std::fs::write(scratch.join("24EMP003.jpg"), b"c").unwrap();

        let outcome = cleanup(&scratch);

        assert!(!outcome.is_clean());
        assert!(!scratch.join("24EMP003.jpg").exists());
        assert!(scratch.exists());
    }
}
