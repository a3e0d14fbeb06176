use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl ServiceError {
    pub fn io(path: &std::path::Path, e: std::io::Error) -> Self {
        Self::Io(format!("{}: {}", path.display(), e))
    }
}
