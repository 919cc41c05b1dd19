use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid tle format for {0}")]
    InvalidTleFormat(String),
    #[error("invalid tle for {id}: {message}")]
    InvalidTle { id: String, message: String },
    #[error("duplicate object id: {0}")]
    DuplicateId(String),
    #[error("unknown object: {0}")]
    UnknownObject(String),
}
