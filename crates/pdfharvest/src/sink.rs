//! Destinations for extracted files.
//!
//! The extractor and harvester never touch the file system directly; every
//! image and page text file goes through an [`ImageSink`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A destination for extracted files.
pub trait ImageSink {
    /// Store `bytes` under `file_name` and return the path it is known by.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be stored.
    fn write(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Writes files into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink for `dir`, creating the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageSink for DirectorySink {
    fn write(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Keeps written files in memory.
///
/// Returned paths are the bare file names.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored files, in write order.
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files
            .lock()
            .map(|files| files.clone())
            .unwrap_or_default()
    }

    /// Contents of the file stored under `file_name`, if any.
    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files().into_iter().find_map(|(name, bytes)| (name == file_name).then_some(bytes))
    }
}

impl ImageSink for MemorySink {
    fn write(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| io::Error::other("memory sink lock poisoned"))?;
        files.retain(|(name, _)| name != file_name);
        files.push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
