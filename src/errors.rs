//! # Error types
//!
//! One `thiserror` enum per concern. Per-query failures ([`InputError`],
//! [`EstimationError`]) are turned into user-visible text at the query boundary,
//! while [`DataUnavailable`] is fatal at startup.
use thiserror::Error;

/// Low level cause of an element data load failure
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed element data: {0}")]
    Json(#[from] serde_json::Error),
}

/// The element data library could not be loaded. The session must not continue.
#[derive(Debug, Error)]
#[error("element data '{path}' is unavailable: {source}")]
pub struct DataUnavailable {
    pub path: String,
    #[source]
    pub source: DataError,
}

/// Problems with what the user typed in, detected before any computation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a formula!")]
    EmptyFormula,
}

/// Problems found while scanning element tokens out of a formula
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    #[error("element '{symbol}' has a zero count")]
    ZeroCount { symbol: String },
    #[error("count '{digits}' of element '{symbol}' is too large")]
    CountOverflow { symbol: String, digits: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimationError {
    #[error("no element symbols found in the formula")]
    EmptyFormula,
    #[error(transparent)]
    Formula(#[from] FormulaError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unknown estimator policy: {0}")]
    UnknownPolicy(String),
    #[error("file '{0}' does not exist")]
    MissingFile(String),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Everything that can go wrong in a session
#[derive(Debug, Error)]
pub enum OxiError {
    #[error(transparent)]
    DataUnavailable(#[from] DataUnavailable),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Estimation(#[from] EstimationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<FormulaError> for OxiError {
    fn from(err: FormulaError) -> Self {
        OxiError::Estimation(EstimationError::Formula(err))
    }
}
