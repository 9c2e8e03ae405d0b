use thiserror::Error;

/// Errors that can occur while matching, looking up or persisting recipes
#[derive(Error, Debug)]
pub enum MatchError {
    /// Ingredient input contained a period
    #[error("Invalid input format. Ingredients have to be separated by a comma.")]
    InvalidFormat,

    /// Name lookup found no recipe
    #[error("Recipe '{name}' not found in the database.")]
    NotFound { name: String },

    /// Failed to compile an ingredient pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Failed to read or write a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize JSON data
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}

impl MatchError {
    pub fn not_found(name: impl Into<String>) -> Self {
        MatchError::NotFound { name: name.into() }
    }
}
