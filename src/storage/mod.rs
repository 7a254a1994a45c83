pub mod disk;

pub use disk::DiskStorage;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationError(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        StorageError::OperationError(error.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::SerializationError(error.to_string())
    }
}
