use crate::utils::error::{DashboardError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 半開區間 [low, high) 必須非空
pub fn validate_bounds(field_name: &str, low: u32, high: u32) -> Result<()> {
    if low >= high {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("[{}, {})", low, high),
            reason: "Lower bound must be strictly below the upper bound".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds("synthesis.bounds.deaths", 100, 500).is_ok());
        assert!(validate_bounds("synthesis.bounds.deaths", 500, 500).is_err());
        assert!(validate_bounds("synthesis.bounds.deaths", 600, 500).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("synthesis.years", 10, 1).is_ok());
        assert!(validate_positive_number("synthesis.years", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("export.image", "dashboard.png", &["png"]).is_ok());
        assert!(validate_file_extension("export.image", "dashboard.PNG", &["png"]).is_ok());
        assert!(validate_file_extension("export.image", "dashboard.svg", &["png"]).is_err());
        assert!(validate_file_extension("export.image", "dashboard", &["png"]).is_err());
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("export.output_dir", ".").is_ok());
        assert!(validate_path("export.output_dir", "").is_err());
        assert!(validate_path("export.output_dir", "a\0b").is_err());
        assert!(validate_non_empty_string("render.author", "  ").is_err());
        assert!(validate_range("render.width", 1400u32, 320, 8000).is_ok());
        assert!(validate_range("render.width", 100u32, 320, 8000).is_err());
    }
}
