use thiserror::Error;

/// Errors that can occur while producing crop advice.
///
/// Unknown crops, varieties, regions and soil types are not errors: every
/// lookup in the calculators resolves through an explicit fallback.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid area: {0} hectares (area must be greater than zero)")]
    InvalidArea(f64),

    #[error("Not found: {0}")]
    NotFound(String),
}
