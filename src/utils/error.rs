use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseStudyError {
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("Index {index} out of bounds for '{path}' (length {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("Type mismatch at '{path}': expected {expected}")]
    TypeMismatch { path: String, expected: String },

    #[error("Unknown section key: {key}")]
    UnknownSection { key: String },

    #[error("Image upload failed: {message}")]
    UploadFailure { message: String },

    #[error("Validation failed for '{field}': {reason}")]
    ValidationFailure { field: String, reason: String },

    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("Project not found: {id}")]
    NotFound { id: String },

    #[error("Project already exists: {id}")]
    AlreadyExists { id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 錯誤嚴重程度，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼叫端錯誤：路徑、索引、型別
    Structural,
    /// 外部協作者：上傳、儲存
    Transport,
    /// 使用者可修正的資料問題
    Validation,
    Configuration,
    System,
}

impl CaseStudyError {
    pub fn malformed_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn upload_failure(message: impl Into<String>) -> Self {
        Self::UploadFailure {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailure {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedPath { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::TypeMismatch { .. }
            | Self::UnknownSection { .. } => ErrorCategory::Structural,
            Self::UploadFailure { .. } | Self::NotFound { .. } => ErrorCategory::Transport,
            Self::ValidationFailure { .. }
            | Self::InvalidDocument { .. }
            | Self::AlreadyExists { .. } => ErrorCategory::Validation,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownSection { .. } => ErrorSeverity::Low,
            Self::UploadFailure { .. }
            | Self::ValidationFailure { .. }
            | Self::NotFound { .. }
            | Self::AlreadyExists { .. } => ErrorSeverity::Medium,
            Self::MalformedPath { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::TypeMismatch { .. }
            | Self::InvalidDocument { .. }
            | Self::ConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 上傳、驗證等執行期錯誤可在邊界轉為使用者可見狀態
    /// 結構性錯誤代表呼叫端的 bug
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Transport | ErrorCategory::Validation
        ) || matches!(self, Self::UnknownSection { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MalformedPath { path, .. } => {
                format!("The field path '{}' does not exist in this project", path)
            }
            Self::IndexOutOfBounds { path, index, len } => format!(
                "Item {} does not exist in '{}' (it has {} items)",
                index, path, len
            ),
            Self::TypeMismatch { path, expected } => {
                format!("'{}' needs {}", path, expected)
            }
            Self::UnknownSection { key } => format!("'{}' is not a known section", key),
            Self::UploadFailure { .. } => {
                "The image could not be uploaded; the project was not changed".to_string()
            }
            Self::ValidationFailure { field, reason } => format!("{}: {}", field, reason),
            Self::InvalidDocument { .. } => "The stored project could not be read".to_string(),
            Self::NotFound { id } => format!("No project with id '{}'", id),
            Self::AlreadyExists { id } => format!("A project with id '{}' already exists", id),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::IoError(_) => "A file could not be read or written".to_string(),
            Self::SerializationError(_) => "Project data is not valid JSON".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedPath { .. } => {
                "Check the path against the section catalog, e.g. sections.hero.title"
            }
            Self::IndexOutOfBounds { .. } => "Use an index smaller than the list length",
            Self::TypeMismatch { .. } => "Pass a value with the shape the field expects",
            Self::UnknownSection { .. } => "Use one of the catalog section keys",
            Self::UploadFailure { .. } => "Retry the upload or choose a different file",
            Self::ValidationFailure { .. } => "Fill in the field and save again",
            Self::InvalidDocument { .. } => "Inspect the stored JSON file for a non-object root",
            Self::NotFound { .. } => "Create the project first with `casefolio new`",
            Self::AlreadyExists { .. } => "Pick another id, or pass --force to start over",
            Self::ConfigError { .. } => "Fix casefolio.toml or remove it to use defaults",
            Self::IoError(_) => "Check directory permissions and free disk space",
            Self::SerializationError(_) => "Check the JSON syntax of the input",
        }
    }
}

pub type Result<T> = std::result::Result<T, CaseStudyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_errors_are_not_recoverable() {
        let err = CaseStudyError::malformed_path("sections.nope", "unknown section");
        assert_eq!(err.category(), ErrorCategory::Structural);
        assert!(!err.is_recoverable());

        let err = CaseStudyError::IndexOutOfBounds {
            path: "sections.overview.keyFeatures".to_string(),
            index: 4,
            len: 2,
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_transport_and_validation_errors_are_recoverable() {
        assert!(CaseStudyError::upload_failure("timeout").is_recoverable());
        assert!(CaseStudyError::validation("title", "required").is_recoverable());
        assert!(CaseStudyError::AlreadyExists {
            id: "atlas".to_string()
        }
        .is_recoverable());
        assert!(CaseStudyError::UnknownSection {
            key: "gallery".to_string()
        }
        .is_recoverable());
    }
}
