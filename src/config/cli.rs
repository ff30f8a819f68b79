use crate::core::Storage;
use crate::utils::error::{ConvertError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Storage rooted at the current working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn resolve(&self, path: &str) -> PathBuf {
        // 絕對路徑時 join 會直接取代 base_path
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|source| ConvertError::InputError {
            path: full_path.display().to_string(),
            source,
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let output_error = |source: std::io::Error| ConvertError::OutputError {
            path: full_path.display().to_string(),
            source,
        };

        // File 離開作用域時自動關閉，錯誤路徑亦同
        let mut file = File::create(&full_path).map_err(output_error)?;
        file.write_all(data).map_err(output_error)?;
        file.sync_all().map_err(output_error)?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}
