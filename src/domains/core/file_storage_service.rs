use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs; // Use tokio::fs for async file operations
use uuid::Uuid;
use std::io;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Invalid path component: {0}")]
    InvalidPathComponent(String),
}

pub type FileStorageResult<T> = Result<T, FileStorageError>;

/// Service trait for abstracting file storage operations
#[async_trait]
pub trait FileStorageService: Send + Sync {
    /// Save uploaded bytes, returning the relative path and size.
    /// `filename` must already be sanitized.
    async fn save_upload(
        &self,
        data: Vec<u8>,
        file_id: Uuid,
        filename: &str,
    ) -> FileStorageResult<(String, u64)>; // Returns (relative_path, size_bytes)

    /// Relative path where the compressed output for a file is written.
    fn compressed_path_for(&self, file_id: Uuid, filename: &str) -> FileStorageResult<String>;

    /// Read a whole file into memory.
    async fn get_file_data(&self, relative_path: &str) -> FileStorageResult<Vec<u8>>;

    /// Get the full absolute path for a given relative path
    fn get_absolute_path(&self, relative_path: &str) -> PathBuf;

    /// Get the size of a file on disk without reading it into memory.
    async fn get_file_size(&self, relative_path: &str) -> FileStorageResult<u64>;
}

/// Reduce a client-supplied filename to a safe ASCII name.
///
/// Path separators become spaces, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are stripped.
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let separated: String = filename
        .chars()
        .filter(|c| c.is_ascii())
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = separated.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// --- Local File Storage Implementation ---

pub struct LocalFileStorageService {
    base_path: PathBuf,
    upload_subdir: String,
    compressed_subdir: String,
}

impl LocalFileStorageService {
    /// Creates a new LocalFileStorageService.
    /// Ensures the base directory and subdirectories exist.
    pub fn new(base_path: impl AsRef<Path>) -> io::Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        let upload_subdir = "uploads".to_string();
        let compressed_subdir = "compressed".to_string();

        // Create directories synchronously during setup
        std::fs::create_dir_all(base_path.join(&upload_subdir))?;
        std::fs::create_dir_all(base_path.join(&compressed_subdir))?;

        log::info!("File storage ready at {}", base_path.display());

        Ok(Self {
            base_path,
            upload_subdir,
            compressed_subdir,
        })
    }

    /// Sanitizes a path component to prevent directory traversal issues.
    fn sanitize_component(component: &str) -> Result<String, FileStorageError> {
        if component.is_empty() || component.contains('/') || component.contains('\\') || component == "." || component == ".." {
            Err(FileStorageError::InvalidPathComponent(component.to_string()))
        } else {
            Ok(component.to_string())
        }
    }

    fn join_relative(subdir: &str, file_name: &str) -> String {
        format!("{}/{}", subdir, file_name)
    }
}

#[async_trait]
impl FileStorageService for LocalFileStorageService {
    async fn save_upload(
        &self,
        data: Vec<u8>,
        file_id: Uuid,
        filename: &str,
    ) -> FileStorageResult<(String, u64)> {
        let sanitized = Self::sanitize_component(filename)?;

        // uploads/<file_id>_<filename>
        let relative_path = Self::join_relative(&self.upload_subdir, &format!("{}_{}", file_id, sanitized));
        let absolute_path = self.get_absolute_path(&relative_path);

        let file_size = data.len() as u64;
        fs::write(&absolute_path, data).await?;

        log::debug!("Stored upload {} ({} bytes) at {}", file_id, file_size, absolute_path.display());

        Ok((relative_path, file_size))
    }

    fn compressed_path_for(&self, file_id: Uuid, filename: &str) -> FileStorageResult<String> {
        let sanitized = Self::sanitize_component(filename)?;
        // compressed/<file_id>_compressed_<filename>
        Ok(Self::join_relative(
            &self.compressed_subdir,
            &format!("{}_compressed_{}", file_id, sanitized),
        ))
    }

    async fn get_file_data(&self, relative_path: &str) -> FileStorageResult<Vec<u8>> {
        let absolute_path = self.get_absolute_path(relative_path);

        match fs::read(&absolute_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                 Err(FileStorageError::NotFound(relative_path.to_string()))
            }
            Err(e) => Err(FileStorageError::Io(e)),
        }
    }

    fn get_absolute_path(&self, relative_path: &str) -> PathBuf {
        // Only normal components are kept; "..", roots and "." are dropped.
        let mut abs_path = self.base_path.clone();
        for component in Path::new(relative_path).components() {
            if let std::path::Component::Normal(comp_str) = component {
                if let Some(s) = comp_str.to_str() {
                    if s.is_empty() || s.contains('/') || s.contains('\\') {
                        continue;
                    }
                    abs_path.push(comp_str);
                }
            }
        }
        abs_path
    }

    async fn get_file_size(&self, relative_path: &str) -> FileStorageResult<u64> {
        let absolute_path = self.get_absolute_path(relative_path);

        match fs::metadata(&absolute_path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FileStorageError::NotFound(relative_path.to_string())),
            Err(e) => Err(FileStorageError::Io(e)),
        }
    }
}
