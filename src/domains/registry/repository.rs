//! In-memory registry of uploaded files

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use super::types::FileRecord;

#[async_trait]
pub trait FileRegistry: Send + Sync {
    /// Store metadata for a new file
    async fn put(&self, id: Uuid, record: FileRecord) -> DomainResult<()>;

    /// Get a copy of the record for a file
    async fn get(&self, id: Uuid) -> DomainResult<FileRecord>;

    /// Record the compressed output, replacing any previous one
    async fn update(
        &self,
        id: Uuid,
        compressed_path: String,
        compressed_size: u64,
    ) -> DomainResult<FileRecord>;
}

/// Process-lifetime registry; entries are never evicted.
#[derive(Default)]
pub struct InMemoryFileRegistry {
    records: RwLock<HashMap<Uuid, FileRecord>>,
}

impl InMemoryFileRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRegistry for InMemoryFileRegistry {
    async fn put(&self, id: Uuid, record: FileRecord) -> DomainResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&id) {
            return Err(DomainError::DuplicateId(id));
        }
        records.insert(id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<FileRecord> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    async fn update(
        &self,
        id: Uuid,
        compressed_path: String,
        compressed_size: u64,
    ) -> DomainResult<FileRecord> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;

        record.compressed_path = Some(compressed_path);
        record.compressed_size = Some(compressed_size);
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Uuid) -> FileRecord {
        FileRecord::new(id, "photo.jpg".to_string(), format!("uploads/{}_photo.jpg", id), 1024)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let registry = InMemoryFileRegistry::new();
        let id = Uuid::new_v4();

        registry.put(id, record(id)).await.unwrap();

        let stored = registry.get(id).await.unwrap();
        assert_eq!(stored.original_filename, "photo.jpg");
        assert_eq!(stored.extension, "jpg");
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let registry = InMemoryFileRegistry::new();
        let id = Uuid::new_v4();

        registry.put(id, record(id)).await.unwrap();
        let err = registry.put(id, record(id)).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateId(dup) if dup == id));
    }

    #[tokio::test]
    async fn test_unknown_id_not_found() {
        let registry = InMemoryFileRegistry::new();
        let id = Uuid::new_v4();

        assert!(matches!(registry.get(id).await, Err(DomainError::NotFound(_))));
        assert!(matches!(
            registry.update(id, "compressed/x".to_string(), 1).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_overwrites_previous_result() {
        let registry = InMemoryFileRegistry::new();
        let id = Uuid::new_v4();
        registry.put(id, record(id)).await.unwrap();

        registry.update(id, "compressed/first".to_string(), 900).await.unwrap();
        let updated = registry.update(id, "compressed/second".to_string(), 800).await.unwrap();

        assert_eq!(updated.compressed_path.as_deref(), Some("compressed/second"));
        assert_eq!(updated.compressed_size, Some(800));
        assert_eq!(registry.get(id).await.unwrap(), updated);
    }
}
