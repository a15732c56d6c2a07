use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: String,
        expected: String,
        actual: String,
    },

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Unsupported metric: {0}")]
    UnsupportedMetric(String),

    #[error("Unsupported weighting: {0}")]
    UnsupportedWeighting(String),
}

impl Error {
    /// Build a [`Error::ShapeMismatch`] from anything printable
    pub fn shape_mismatch(
        what: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Error::ShapeMismatch {
            what: what.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
