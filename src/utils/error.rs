use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid hexadecimal value found in string: '{token}' at position {position}")]
    InvalidTokenError { token: String, position: usize },

    #[error("Hexadecimal value '{token}' at position {position} is outside the byte range 00-ff")]
    OutOfRangeError { token: String, position: usize },

    #[error("Error writing to file '{path}': {source}")]
    OutputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading input '{path}': {source}")]
    InputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Verification of '{path}' failed: expected {expected} bytes, found {actual} (first difference at offset {offset})")]
    VerificationError {
        path: String,
        expected: usize,
        actual: usize,
        offset: usize,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Io,
    Config,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定行程退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 僅回報，視為成功
            ErrorSeverity::Medium => 2,   // 配置錯誤
            ErrorSeverity::High => 1,     // 解析錯誤
            ErrorSeverity::Critical => 3, // 系統 / IO 錯誤
        }
    }
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::InvalidTokenError { .. } | ConvertError::OutOfRangeError { .. } => {
                ErrorCategory::Parse
            }
            ConvertError::OutputError { .. }
            | ConvertError::InputError { .. }
            | ConvertError::VerificationError { .. } => ErrorCategory::Io,
            ConvertError::SerializationError(_) => ErrorCategory::Serialization,
            ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Parse => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Serialization => ErrorSeverity::Critical,
        }
    }

    /// Errors raised while producing the output file. These are the ones the
    /// write-error policy may downgrade.
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            ConvertError::OutputError { .. } | ConvertError::VerificationError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::InvalidTokenError { .. } => {
                "Each token must be base-16 text such as '3b', '0x3b' or '+3b'"
            }
            ConvertError::OutOfRangeError { .. } => {
                "Each token must encode a single byte (00-ff); split wider values into bytes"
            }
            ConvertError::OutputError { .. } => {
                "Check that the output directory exists and is writable, and that the disk is not full"
            }
            ConvertError::InputError { .. } => "Check that the input file exists and is readable",
            ConvertError::VerificationError { .. } => {
                "Another process may have modified the file; re-run the conversion"
            }
            ConvertError::SerializationError(_) => "Re-run without --json",
            ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and try again (see --help)"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Parse => format!("Error: {}", self),
            ErrorCategory::Io => format!("Error: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Serialization => format!("Could not render summary: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
