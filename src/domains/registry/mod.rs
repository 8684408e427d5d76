pub mod types;
pub mod repository;

pub use types::FileRecord;
pub use repository::{FileRegistry, InMemoryFileRegistry};
