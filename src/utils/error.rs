use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot aggregate an empty table")]
    EmptyTable,

    #[error("Rendering error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    Rendering,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DashboardError::EmptyTable
            | DashboardError::CsvError(_)
            | DashboardError::SerializationError(_) => ErrorCategory::Data,
            DashboardError::RenderError { .. } | DashboardError::ImageError(_) => {
                ErrorCategory::Rendering
            }
            DashboardError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            DashboardError::EmptyTable => ErrorSeverity::High,
            DashboardError::CsvError(_) | DashboardError::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            DashboardError::RenderError { .. } | DashboardError::ImageError(_) => {
                ErrorSeverity::High
            }
            DashboardError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashboardError::ConfigValidationError { .. } => {
                "Check the TOML syntax of the configuration file"
            }
            DashboardError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the configuration file or command line"
            }
            DashboardError::EmptyTable => "Configure at least one year in [synthesis]",
            DashboardError::RenderError { .. } => {
                "Make sure a system font is installed and the canvas size is reasonable"
            }
            DashboardError::ImageError(_) => {
                "Replace or remove the background image, or check the output file extension"
            }
            DashboardError::CsvError(_) | DashboardError::SerializationError(_) => {
                "Check the export paths in [export]"
            }
            DashboardError::IoError(_) => "Check that the output directory exists and is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::ConfigValidationError { field, message } => {
                format!("設定檔錯誤 ({}): {}", field, message)
            }
            DashboardError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值無效 ({}): {}", field, reason)
            }
            DashboardError::EmptyTable => "沒有可分析的資料".to_string(),
            DashboardError::RenderError { message } => format!("圖表繪製失敗: {}", message),
            other => format!("執行失敗: {}", other),
        }
    }
}

// plotters 的錯誤型別依後端而異，統一轉成 RenderError
impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for DashboardError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        DashboardError::RenderError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_drives_exit_codes() {
        let io = DashboardError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.category(), ErrorCategory::System);
        assert!(DashboardError::EmptyTable.severity() > ErrorSeverity::Medium);
    }

    #[test]
    fn test_invalid_value_message_names_field() {
        let err = DashboardError::InvalidConfigValueError {
            field: "synthesis.years".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("synthesis.years"));
        assert!(err.user_friendly_message().contains("synthesis.years"));
    }
}
