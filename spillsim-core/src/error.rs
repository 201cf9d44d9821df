use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpillSimError {
    #[error("Spill parameters are missing")]
    SpillNotDefined,

    #[error("Oil properties are missing")]
    OilNotDefined,

    #[error("Spill volume must be a positive number of barrels, got {0}")]
    InvalidVolume(f64),

    #[error("Elapsed time must be a non-negative number of hours, got {0}")]
    InvalidElapsedTime(f64),

    #[error("Invalid coordinates: {lat}, {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Environmental condition '{0}' is not a finite value")]
    InvalidEnvironment(&'static str),

    #[error("Unknown oil type: '{name}'. Available types: {available:?}")]
    UnknownOilType { name: String, available: Vec<String> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred during logging: {0}")]
    LoggingError(#[from] anyhow::Error),
}
