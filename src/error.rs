use thiserror::Error;
use uuid::Uuid;

/// Failures of the persistent key-value area.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to serialize post list: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage quota exceeded: {size} bytes needed, {limit} allowed")]
    QuotaExceeded { size: usize, limit: usize },
}

/// Everything a single board action can fail with. None of these leave
/// the in-memory post list half-modified.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Please select a category!")]
    MissingCategory,

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Post {0} not found")]
    NotFound(Uuid),

    #[error("Could not read the image: {0}")]
    ImageDecode(String),

    #[error("Image is too large ({size} bytes, limit is {limit} bytes)")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("Could not save posts: {0}")]
    Storage(#[from] StoreError),
}
