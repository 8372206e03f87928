/// Storage-layer errors for repository backends.
///
/// Not-found conditions are never errors: finders return empty collections
/// and `delete` returns `false` for missing ids.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("backend error: {message}")]
    Backend { message: String },
}
