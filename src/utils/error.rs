use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration parsing error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown graph node: '{node}'")]
    UnknownNode { node: String },

    #[error("Missing field in mapping: '{field}'")]
    MissingField { field: String },

    #[error("Field '{field}' has unexpected type, expected {expected}")]
    FieldType { field: String, expected: String },

    #[error("Invalid array literal: {message}")]
    InvalidLiteral { message: String },

    #[error("Ragged array at depth {depth}: expected shape {expected:?}, found {found:?}")]
    RaggedArray {
        depth: usize,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Grid must have at least one day and one hour (got {days}x{hours})")]
    EmptyGrid { days: usize, hours: usize },

    #[error("Arithmetic overflow while updating '{field}'")]
    Overflow { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
    Exercise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定 CLI 退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl LabError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LabError::IoError(_) | LabError::SerializationError(_) | LabError::CsvError(_) => {
                ErrorCategory::Io
            }
            LabError::ConfigParseError { .. }
            | LabError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LabError::InvalidLiteral { .. } | LabError::RaggedArray { .. } => ErrorCategory::Input,
            LabError::UnknownNode { .. }
            | LabError::MissingField { .. }
            | LabError::FieldType { .. }
            | LabError::EmptyGrid { .. }
            | LabError::Overflow { .. } => ErrorCategory::Exercise,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Exercise => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LabError::IoError(e) => format!("File system operation failed: {}", e),
            LabError::SerializationError(_) => "Could not encode the report as JSON".to_string(),
            LabError::CsvError(_) => "Could not write the temperature grid as CSV".to_string(),
            LabError::ConfigParseError { .. } => "The configuration file is not valid TOML".to_string(),
            LabError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            LabError::UnknownNode { node } => format!("Node '{}' is not part of the graph", node),
            LabError::MissingField { field } => format!("The mapping has no '{}' entry", field),
            LabError::FieldType { field, expected } => {
                format!("The '{}' entry should be {}", field, expected)
            }
            LabError::InvalidLiteral { .. } | LabError::RaggedArray { .. } => {
                "The array literal could not be interpreted".to_string()
            }
            LabError::EmptyGrid { .. } => "The temperature grid has no cells".to_string(),
            LabError::Overflow { field } => format!("The value of '{}' is too large", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LabError::IoError(_) | LabError::CsvError(_) => {
                "Check that the output directory exists and is writable"
            }
            LabError::SerializationError(_) => "Retry with --format text",
            LabError::ConfigParseError { .. } => "Fix the TOML syntax in the configuration file",
            LabError::InvalidConfigValueError { .. } => {
                "Review the configuration file or command line flags"
            }
            LabError::UnknownNode { .. } => {
                "Make sure the start node and every neighbour appear as keys of the adjacency mapping"
            }
            LabError::MissingField { .. } | LabError::FieldType { .. } => {
                "Populate the mapping with year, color, Crashed? and Kilometers"
            }
            LabError::InvalidLiteral { .. } => "Pass a JSON number or a JSON array, e.g. [[1,2],[3,4]]",
            LabError::RaggedArray { .. } => "Every sub-array at the same depth must have the same length",
            LabError::EmptyGrid { .. } => "Use at least one day and one hour",
            LabError::Overflow { .. } => "Use a smaller distance",
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let err = LabError::UnknownNode {
            node: "Z".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Exercise);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = LabError::InvalidLiteral {
            message: "bad".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = LabError::IoError(std::io::Error::other("disk"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_exit_code_per_severity() {
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_for_each_category() {
        let ragged = LabError::RaggedArray {
            depth: 1,
            expected: vec![2],
            found: vec![1],
        };
        assert_eq!(ragged.category(), ErrorCategory::Input);
        assert_eq!(ragged.severity().exit_code(), 2);

        let config = LabError::InvalidConfigValueError {
            field: "temperature.days".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.severity().exit_code(), 1);

        let exercise = LabError::UnknownNode {
            node: "Z".to_string(),
        };
        assert_eq!(exercise.category(), ErrorCategory::Exercise);
        assert_eq!(exercise.severity().exit_code(), 1);

        let io = LabError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.category(), ErrorCategory::Io);
        assert_eq!(io.severity().exit_code(), 3);
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = LabError::MissingField {
            field: "Kilometers".to_string(),
        };
        assert!(err.to_string().contains("Kilometers"));
        assert!(err.user_friendly_message().contains("Kilometers"));
    }
}
