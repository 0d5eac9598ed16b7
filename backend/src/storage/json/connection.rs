use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DATA_FILE_NAME: &str = "prode.json";

/// JsonConnection owns the data directory holding `prode.json`
#[derive(Clone, Debug)]
pub struct JsonConnection {
    data_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at `data_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let connection = Self {
            data_directory: data_directory.as_ref().to_path_buf(),
        };
        connection.ensure_data_directory()?;
        info!("Using prediction data directory: {}", connection.data_directory.display());
        Ok(connection)
    }

    /// Create the data directory if it has gone missing (ephemeral temp dirs
    /// can be wiped between requests)
    pub fn ensure_data_directory(&self) -> Result<()> {
        if !self.data_directory.exists() {
            fs::create_dir_all(&self.data_directory).with_context(|| {
                format!("Could not create data directory {}", self.data_directory.display())
            })?;
            debug!("Created data directory: {}", self.data_directory.display());
        }
        Ok(())
    }

    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    /// Path of the JSON document holding every prediction
    pub fn data_file_path(&self) -> PathBuf {
        self.data_directory.join(DATA_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_nested_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("deploy").join("prode-data");

        let connection = JsonConnection::new(&nested).expect("Failed to create connection");

        assert!(nested.is_dir());
        assert_eq!(connection.data_directory(), nested.as_path());
        assert_eq!(connection.data_file_path(), nested.join("prode.json"));
    }

    #[test]
    fn test_ensure_data_directory_recreates_removed_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path().join("data");
        let connection = JsonConnection::new(&dir).expect("Failed to create connection");

        fs::remove_dir_all(&dir).unwrap();
        connection.ensure_data_directory().unwrap();

        assert!(dir.is_dir());
    }
}
