use crate::config::toml_config::UploadsConfig;
use crate::domain::model::UploadedImage;
use crate::domain::ports::ImageUploader;
use crate::utils::error::{CaseStudyError, Result};
use crate::utils::validation::validate_file_extension;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Writes uploads into a local assets directory and serves them from
/// `public_base_url`.
#[derive(Debug)]
pub struct LocalImageUploader {
    assets_dir: PathBuf,
    public_base_url: String,
    max_bytes: usize,
    allowed_extensions: Vec<String>,
    counter: AtomicU64,
}

impl LocalImageUploader {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            assets_dir: PathBuf::from(&config.assets_dir),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_bytes: config.max_upload_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
            counter: AtomicU64::new(0),
        }
    }

    fn stored_name(&self, filename: &str) -> String {
        let path = std::path::Path::new(filename);
        let stem = slugify(path.file_stem().and_then(|s| s.to_str()).unwrap_or("image"));
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_ascii_lowercase();
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}-{}-{}.{}",
            chrono::Utc::now().format("%Y%m%d%H%M%S"),
            seq,
            stem,
            ext
        )
    }
}

#[async_trait]
impl ImageUploader for LocalImageUploader {
    async fn upload(&self, content: &[u8], filename: &str) -> Result<UploadedImage> {
        if content.is_empty() {
            return Err(CaseStudyError::upload_failure("file is empty"));
        }
        if content.len() > self.max_bytes {
            return Err(CaseStudyError::upload_failure(format!(
                "file is {} bytes; the limit is {}",
                content.len(),
                self.max_bytes
            )));
        }
        validate_file_extension("upload", filename, &self.allowed_extensions)
            .map_err(|e| CaseStudyError::upload_failure(e.to_string()))?;

        let name = self.stored_name(filename);
        tokio::fs::create_dir_all(&self.assets_dir)
            .await
            .map_err(|e| CaseStudyError::upload_failure(e.to_string()))?;
        tokio::fs::write(self.assets_dir.join(&name), content)
            .await
            .map_err(|e| CaseStudyError::upload_failure(e.to_string()))?;

        tracing::debug!("Stored {} bytes as {}", content.len(), name);
        Ok(UploadedImage {
            url: format!("{}/{}", self.public_base_url, name),
            suggested_alt: suggested_alt(filename),
        })
    }
}

fn slugify(raw: &str) -> String {
    let slug: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "image".to_string()
    } else {
        slug
    }
}

/// `checkout-flow_v2.png` -> `Checkout flow v2`
pub fn suggested_alt(filename: &str) -> String {
    let stem = std::path::Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let words: Vec<&str> = stem
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    let sentence = words.join(" ");
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
