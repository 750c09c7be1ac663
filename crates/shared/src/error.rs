use std::path::PathBuf;

/// Failure to load one of the JSON documents the engines consume
/// (a week plan, the product catalog, the lookup tables or the stock list).
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            DocumentError::Io { path, .. } | DocumentError::Malformed { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;
