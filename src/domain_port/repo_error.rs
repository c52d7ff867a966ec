#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A uniqueness constraint rejected the write.
    #[error("row already exists")]
    AlreadyExists,
    #[error("store error: {0}")]
    Store(String),
}
