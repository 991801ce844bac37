//! Locating the root folder of a data package.
//!
//! Discord delivers the package as a ZIP archive; users often extract it
//! first. Both shapes resolve to a [`DataRoot`] whose [`DataRoot::path`]
//! contains `messages/` and (usually) `servers/`.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::CounterError;

#[cfg(feature = "zip")]
use tempfile::TempDir;

/// The folder a scan reads from.
///
/// When the input was an archive, the value owns the temporary extraction
/// directory; dropping it removes the extracted files.
#[derive(Debug)]
pub struct DataRoot {
    path: PathBuf,
    #[cfg(feature = "zip")]
    extracted: Option<TempDir>,
}

impl DataRoot {
    /// Wraps an existing package folder without copying it.
    pub fn from_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            #[cfg(feature = "zip")]
            extracted: None,
        }
    }

    /// Root folder of the package.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `messages/` folder holding one directory per channel.
    pub fn messages_dir(&self) -> PathBuf {
        self.path.join("messages")
    }

    /// The `servers/` folder holding the guild index.
    pub fn servers_dir(&self) -> PathBuf {
        self.path.join("servers")
    }

    /// Returns `true` when the package was extracted from an archive.
    pub fn is_extracted(&self) -> bool {
        #[cfg(feature = "zip")]
        {
            self.extracted.is_some()
        }
        #[cfg(not(feature = "zip"))]
        {
            false
        }
    }
}

/// Resolves `input_path` to a package folder.
///
/// # Errors
///
/// - [`CounterError::InvalidInputPath`] if the path does not exist, or is a
///   file and the `zip` feature is disabled.
/// - [`CounterError::Zip`] / [`CounterError::Io`] if extraction fails.
#[instrument(level = "debug", skip(input_path), fields(input = %input_path.display()))]
pub fn prepare_data_root(input_path: &Path) -> Result<DataRoot, CounterError> {
    if input_path.is_dir() {
        debug!("using package folder in place");
        return Ok(DataRoot::from_dir(input_path));
    }

    #[cfg(feature = "zip")]
    {
        if input_path.is_file() {
            return extract_archive(input_path);
        }
    }

    Err(CounterError::InvalidInputPath(input_path.display().to_string()))
}

#[cfg(feature = "zip")]
fn extract_archive(archive_path: &Path) -> Result<DataRoot, CounterError> {
    let file = std::fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let temp_dir = TempDir::new()?;
    debug!(
        entries = archive.len(),
        target = %temp_dir.path().display(),
        "extracting package archive"
    );
    archive.extract(temp_dir.path())?;
    Ok(DataRoot {
        path: temp_dir.path().to_path_buf(),
        extracted: Some(temp_dir),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_used_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let root = prepare_data_root(dir.path()).unwrap();
        assert_eq!(root.path(), dir.path());
        assert_eq!(root.messages_dir(), dir.path().join("messages"));
        assert_eq!(root.servers_dir(), dir.path().join("servers"));
        assert!(!root.is_extracted());
    }

    #[test]
    fn missing_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = prepare_data_root(&missing).unwrap_err();
        assert!(matches!(err, CounterError::InvalidInputPath(p) if p.ends_with("nope")));
    }

    #[cfg(not(feature = "zip"))]
    #[test]
    fn files_are_rejected_without_zip_support() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("package.zip");
        std::fs::write(&file, b"not really a zip").unwrap();
        let err = prepare_data_root(&file).unwrap_err();
        assert!(matches!(err, CounterError::InvalidInputPath(_)));
    }

    #[cfg(feature = "zip")]
    mod archives {
        use std::io::Write;

        use zip::write::SimpleFileOptions;

        use super::*;

        #[test]
        fn archive_is_extracted_and_removed_on_drop() {
            let dir = tempfile::tempdir().unwrap();
            let archive_path = dir.path().join("package.zip");
            let mut writer = zip::ZipWriter::new(std::fs::File::create(&archive_path).unwrap());
            writer
                .start_file("messages/c1/messages.json", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"[]").unwrap();
            writer.finish().unwrap();

            let root = prepare_data_root(&archive_path).unwrap();
            let extracted = root.path().to_path_buf();
            assert!(root.is_extracted());
            assert!(root.messages_dir().join("c1/messages.json").is_file());

            drop(root);
            assert!(!extracted.exists());
        }

        #[test]
        fn corrupt_archive_is_a_zip_error() {
            let dir = tempfile::tempdir().unwrap();
            let archive_path = dir.path().join("package.zip");
            std::fs::write(&archive_path, b"definitely not a zip").unwrap();
            let err = prepare_data_root(&archive_path).unwrap_err();
            assert!(matches!(err, CounterError::Zip(_)));
        }
    }
}
