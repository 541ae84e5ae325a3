use thiserror::Error;

/// Characters of an offending record quoted in a layout error.
const EXCERPT_LEN: usize = 100;

#[derive(Error, Debug)]
pub enum RemessaError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error(
        "Layout consistency error: record type '{kind}' is {length} characters ({detail}): {excerpt:?}"
    )]
    LayoutConsistencyError {
        kind: char,
        length: usize,
        detail: String,
        excerpt: String,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RemessaError {
    pub fn missing_field(entity: &str, field: &str) -> Self {
        Self::ValidationError(format!("{entity} is missing required field '{field}'"))
    }

    pub fn layout(kind: char, line: &str, detail: impl Into<String>) -> Self {
        Self::LayoutConsistencyError {
            kind,
            length: line.chars().count(),
            detail: detail.into(),
            excerpt: line.chars().take(EXCERPT_LEN).collect(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RemessaError>;
