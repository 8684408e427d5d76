pub mod compression;
pub mod core;
pub mod registry;

pub use compression::{CompressionService, CompressionServiceImpl};
pub use registry::{FileRecord, FileRegistry, InMemoryFileRegistry};
