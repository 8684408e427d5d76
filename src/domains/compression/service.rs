use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::domains::core::file_storage_service::{sanitize_filename, FileStorageService};
use crate::domains::registry::{FileRecord, FileRegistry};
use crate::errors::{CompressionError, DomainError, DomainResult};
use super::compressors::{compress_file, guess_mime_type};
use super::types::{
    reduction_percentage, CompressionConfig, CompressionResult, DownloadedFile, UploadResult,
};

#[async_trait]
pub trait CompressionService: Send + Sync {
    /// Store uploaded bytes and register them under a new identifier
    async fn upload_file(&self, data: Vec<u8>, filename: &str) -> DomainResult<UploadResult>;

    /// Compress a registered file, replacing any earlier output
    async fn compress_file(
        &self,
        file_id: Uuid,
        config: Option<CompressionConfig>,
    ) -> DomainResult<CompressionResult>;

    /// Fetch the compressed output of a file
    async fn download_file(&self, file_id: Uuid) -> DomainResult<DownloadedFile>;
}

pub struct CompressionServiceImpl {
    registry: Arc<dyn FileRegistry>,
    file_storage_service: Arc<dyn FileStorageService>,
    public_base_url: String,
}

impl CompressionServiceImpl {
    pub fn new(
        registry: Arc<dyn FileRegistry>,
        file_storage_service: Arc<dyn FileStorageService>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            file_storage_service,
            public_base_url: public_base_url.into(),
        }
    }

    fn download_url(&self, file_id: Uuid) -> String {
        format!("{}/api/download/{}", self.public_base_url.trim_end_matches('/'), file_id)
    }
}

#[async_trait]
impl CompressionService for CompressionServiceImpl {
    async fn upload_file(&self, data: Vec<u8>, filename: &str) -> DomainResult<UploadResult> {
        if filename.is_empty() {
            return Err(DomainError::InvalidInput("No selected file".to_string()));
        }
        let filename = sanitize_filename(filename).ok_or_else(|| {
            DomainError::InvalidInput(format!("Filename '{}' has no usable characters", filename))
        })?;

        let file_id = Uuid::new_v4();
        let (relative_path, size) = self
            .file_storage_service
            .save_upload(data, file_id, &filename)
            .await?;

        let record = FileRecord::new(file_id, filename.clone(), relative_path, size);
        self.registry.put(file_id, record).await?;

        log::info!("Uploaded {} as {} ({} bytes)", filename, file_id, size);

        Ok(UploadResult {
            file_id,
            filename,
            size,
        })
    }

    async fn compress_file(
        &self,
        file_id: Uuid,
        config: Option<CompressionConfig>,
    ) -> DomainResult<CompressionResult> {
        let start_time = Instant::now();
        let config = config.unwrap_or_default();

        // 1. Look up the upload
        let record = self.registry.get(file_id).await?;

        // 2. Resolve input and output locations
        let compressed_path = self
            .file_storage_service
            .compressed_path_for(file_id, &record.original_filename)?;
        let source = self.file_storage_service.get_absolute_path(&record.original_path);
        let destination = self.file_storage_service.get_absolute_path(&compressed_path);

        log::info!(
            "Starting compression for {} ({}, uploaded {}, quality {})",
            file_id,
            record.original_filename,
            record.uploaded_at.to_rfc3339(),
            config.quality_level
        );

        // 3. Run the blocking codec work off the async runtime
        let extension = record.extension.clone();
        let quality = config.quality_level;
        tokio::task::spawn_blocking(move || compress_file(&source, &destination, quality, &extension))
            .await
            .map_err(|e| CompressionError::Join(e.to_string()))?
            .map_err(|e| {
                log::error!("Compression failed for {}: {}", file_id, e);
                DomainError::CompressionFailed(e)
            })?;

        // 4. Measure the output and record it
        let compressed_size = self
            .file_storage_service
            .get_file_size(&compressed_path)
            .await?;
        let updated = self
            .registry
            .update(file_id, compressed_path, compressed_size)
            .await?;

        let reduction = reduction_percentage(updated.original_size, compressed_size);
        log::info!(
            "Compression successful: {} bytes -> {} bytes ({:.2}%) for {} in {} ms",
            updated.original_size,
            compressed_size,
            reduction,
            file_id,
            start_time.elapsed().as_millis()
        );

        Ok(CompressionResult {
            file_id,
            original_size: updated.original_size,
            compressed_size,
            reduction_percentage: reduction,
            download_url: self.download_url(file_id),
        })
    }

    async fn download_file(&self, file_id: Uuid) -> DomainResult<DownloadedFile> {
        let record = self.registry.get(file_id).await?;
        let compressed_path = record.compressed_path.as_deref().ok_or_else(|| {
            log::debug!("Download requested for {} before compression", file_id);
            DomainError::NotFound(format!("Compressed file for {}", file_id))
        })?;

        let data = self.file_storage_service.get_file_data(compressed_path).await?;

        Ok(DownloadedFile {
            content_type: guess_mime_type(&record.original_filename),
            filename: record.original_filename,
            data,
        })
    }
}
