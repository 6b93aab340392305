use crate::utils::error::{CaseStudyError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CaseStudyError::validation(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CaseStudyError::validation(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(CaseStudyError::validation(
            field_name,
            format!("Invalid URL format '{}': {}", url_str, e),
        )),
    }
}

/// 頁面上的連結：除了 http(s) 之外也允許 mailto
pub fn validate_link(field_name: &str, url_str: &str) -> Result<()> {
    match Url::parse(url_str) {
        Ok(url) if url.scheme() == "mailto" => Ok(()),
        _ => validate_url(field_name, url_str),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CaseStudyError::validation(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(CaseStudyError::validation(
            field_name,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CaseStudyError::validation(
            field_name,
            format!("Value {} must be at least {}", value, min_value),
        ));
    }
    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[String],
) -> Result<()> {
    let extension = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext)
            if allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext)) =>
        {
            Ok(())
        }
        Some(ext) => Err(CaseStudyError::validation(
            field_name,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(CaseStudyError::validation(
            field_name,
            format!("'{}' has no extension or an invalid filename", file),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CaseStudyError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}
