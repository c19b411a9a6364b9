use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("title not found in catalog: {0}")]
    NotFound(String),

    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("similarity matrix has {rows} rows, expected {expected}")]
    MatrixSize { rows: usize, expected: usize },

    #[error("non-finite similarity score at row {row}, column {column}")]
    NonFiniteScore { row: usize, column: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_title() {
        let err = RecommendError::NotFound("Unknown Title".to_string());
        assert_eq!(err.to_string(), "title not found in catalog: Unknown Title");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecommendError>();
    }
}
