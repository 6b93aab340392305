use crate::core::catalog::{self, SECTIONS};
use crate::utils::error::{CaseStudyError, Result};
use crate::utils::validation::{validate_link, validate_non_empty_string, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Default for ImageRef {
    fn default() -> Self {
        Self {
            url: String::new(),
            alt: String::new(),
            caption: Some(String::new()),
        }
    }
}

impl ImageRef {
    pub fn is_empty(&self) -> bool {
        self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Published,
}

/// 整份案例研究文件；sections 保持 JSON 形式，由 catalog 決定形狀
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub thumbnail: ImageRef,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub sections: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectDocument {
    /// New project: every catalog section present and disabled.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            short_description: String::new(),
            thumbnail: ImageRef::default(),
            technologies: Vec::new(),
            status: ProjectStatus::Draft,
            featured: false,
            order: 0,
            sections: SECTIONS
                .iter()
                .map(|spec| (spec.key.to_string(), spec.default_value()))
                .collect(),
            updated_at: None,
        }
    }

    pub fn section(&self, key: &str) -> Option<&Value> {
        self.sections.get(key)
    }

    pub fn is_section_enabled(&self, key: &str) -> bool {
        self.section(key)
            .and_then(|section| section.get(catalog::ENABLED))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// 連結欄位：啟用中的 section 若有填寫，必須是合法網址
const LINK_FIELDS: &[(&str, &str)] = &[
    ("websitePreview", "liveUrl"),
    ("websitePreview", "repositoryUrl"),
    ("callToAction", "buttonUrl"),
];

impl Validate for ProjectDocument {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title)?;
        validate_non_empty_string("shortDescription", &self.short_description)?;

        for (section_key, field) in LINK_FIELDS {
            if !self.is_section_enabled(section_key) {
                continue;
            }
            let link = self
                .section(section_key)
                .and_then(|section| section.get(*field))
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim();
            if !link.is_empty() {
                validate_link(&format!("sections.{}.{}", section_key, field), link)?;
            }
        }

        // 目錄外的舊 section 原樣保留，不在此檢查
        for spec in SECTIONS {
            if !self.section(spec.key).is_some_and(Value::is_object) {
                return Err(CaseStudyError::validation(
                    format!("sections.{}", spec.key),
                    "catalog sections must be objects",
                ));
            }
        }
        Ok(())
    }
}

/// Reference handed back by an upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub suggested_alt: String,
}

impl From<UploadedImage> for ImageRef {
    fn from(upload: UploadedImage) -> Self {
        ImageRef {
            url: upload.url,
            alt: upload.suggested_alt,
            caption: Some(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_has_all_sections_disabled() {
        let doc = ProjectDocument::empty("atlas");
        assert_eq!(doc.sections.len(), SECTIONS.len());
        assert!(SECTIONS.iter().all(|spec| !doc.is_section_enabled(spec.key)));
        assert_eq!(doc.status, ProjectStatus::Draft);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut doc = ProjectDocument::empty("atlas");
        doc.short_description = "Booking app".to_string();
        let value = doc.to_value().unwrap();
        assert_eq!(value["shortDescription"], json!("Booking app"));
        assert_eq!(value["status"], json!("draft"));
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn test_validate_requires_title_and_short_description() {
        let mut doc = ProjectDocument::empty("atlas");
        let err = doc.validate().unwrap_err();
        assert!(matches!(
            err,
            CaseStudyError::ValidationFailure { ref field, .. } if field == "title"
        ));

        doc.title = "Atlas".to_string();
        let err = doc.validate().unwrap_err();
        assert!(matches!(
            err,
            CaseStudyError::ValidationFailure { ref field, .. } if field == "shortDescription"
        ));

        doc.short_description = "Booking app".to_string();
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_links_only_in_enabled_sections() {
        let mut doc = ProjectDocument::empty("atlas");
        doc.title = "Atlas".to_string();
        doc.short_description = "Booking app".to_string();
        doc.sections.insert(
            "callToAction".to_string(),
            json!({
                "enabled": false,
                "title": "",
                "description": "",
                "buttonText": "",
                "buttonUrl": "not a url"
            }),
        );
        assert!(doc.validate().is_ok());

        doc.sections["callToAction"]["enabled"] = json!(true);
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_sections_outside_the_catalog() {
        let mut doc = ProjectDocument::empty("atlas");
        doc.title = "Atlas".to_string();
        doc.short_description = "Booking app".to_string();
        doc.sections.insert("legacyNotes".to_string(), json!("old"));
        assert!(doc.validate().is_ok());

        doc.sections.insert("hero".to_string(), json!("broken"));
        let err = doc.validate().unwrap_err();
        assert!(matches!(
            err,
            CaseStudyError::ValidationFailure { ref field, .. } if field == "sections.hero"
        ));
    }
}
