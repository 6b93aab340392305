//! Legacy shape normalizer
//!
//! Runs once when a stored project is loaded. Each rule is independent and
//! idempotent; adding a migration means pushing another rule onto the table.

use crate::core::catalog::{self, FieldKind, COLOR_PALETTE, DOCUMENT_FIELDS, SECTIONS};
use crate::domain::model::ProjectDocument;
use crate::utils::error::{CaseStudyError, Result};
use chrono::DateTime;
use serde_json::{Map, Value};

pub trait NormalizationRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rewrite `root` in place. Returns whether anything changed.
    fn apply(&self, root: &mut Map<String, Value>) -> bool;
}

/// A single section field that older documents stored in the wrong shape or
/// not at all.
pub struct LegacyFieldRule {
    pub name: &'static str,
    pub section: &'static str,
    pub field: &'static str,
    pub needs_migration: fn(Option<&Value>) -> bool,
    pub replacement: fn() -> Value,
}

impl NormalizationRule for LegacyFieldRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, root: &mut Map<String, Value>) -> bool {
        let Some(Value::Object(section)) = root
            .get_mut("sections")
            .and_then(|sections| sections.get_mut(self.section))
        else {
            return false;
        };
        if !(self.needs_migration)(section.get(self.field)) {
            return false;
        }
        section.insert(self.field.to_string(), (self.replacement)());
        true
    }
}

/// `technologies` used to be stored as one comma separated string.
pub struct TechnologiesListRule;

impl NormalizationRule for TechnologiesListRule {
    fn name(&self) -> &'static str {
        "technologies-from-string"
    }

    fn apply(&self, root: &mut Map<String, Value>) -> bool {
        let Some(Value::String(joined)) = root.get("technologies") else {
            return false;
        };
        let list: Vec<Value> = joined
            .split(',')
            .map(str::trim)
            .filter(|tech| !tech.is_empty())
            .map(|tech| Value::String(tech.to_string()))
            .collect();
        root.insert("technologies".to_string(), Value::Array(list));
        true
    }
}

/// Top-level scalars conformed to their catalog kinds.
pub struct DocumentFieldsRule;

impl NormalizationRule for DocumentFieldsRule {
    fn name(&self) -> &'static str {
        "document-fields"
    }

    fn apply(&self, root: &mut Map<String, Value>) -> bool {
        let mut changed = false;

        let id = root.remove("id").unwrap_or(Value::Null);
        let conformed = FieldKind::Text.conform(id.clone());
        changed |= conformed != id;
        root.insert("id".to_string(), conformed);

        for spec in DOCUMENT_FIELDS {
            let current = root.remove(spec.name);
            let conformed = spec.kind.conform(current.clone().unwrap_or(Value::Null));
            changed |= current.as_ref() != Some(&conformed);
            root.insert(spec.name.to_string(), conformed);
        }

        let stale_timestamp = match root.get("updatedAt") {
            Some(Value::String(raw)) => DateTime::parse_from_rfc3339(raw).is_err(),
            Some(_) => true,
            None => false,
        };
        if stale_timestamp {
            root.remove("updatedAt");
            changed = true;
        }
        changed
    }
}

/// Every catalog section present and in canonical shape. Sections outside the
/// catalog are left alone.
pub struct CatalogShapeRule;

impl NormalizationRule for CatalogShapeRule {
    fn name(&self) -> &'static str {
        "catalog-shape"
    }

    fn apply(&self, root: &mut Map<String, Value>) -> bool {
        let mut changed = false;
        let sections = root
            .entry("sections")
            .or_insert_with(|| Value::Object(Map::new()));
        if !sections.is_object() {
            *sections = Value::Object(Map::new());
            changed = true;
        }
        let Value::Object(sections) = sections else {
            return changed;
        };

        for spec in SECTIONS {
            let current = sections.remove(spec.key);
            let conformed = match &current {
                Some(value) => spec.conform(value.clone()),
                None => spec.default_value(),
            };
            changed |= current.as_ref() != Some(&conformed);
            sections.insert(spec.key.to_string(), conformed);
        }
        changed
    }
}

fn palette_needs_migration(value: Option<&Value>) -> bool {
    !matches!(value, Some(Value::Object(_)))
}

fn is_absent(value: Option<&Value>) -> bool {
    value.is_none()
}

fn empty_palette() -> Value {
    FieldKind::Record(COLOR_PALETTE).default_value()
}

pub struct Normalizer {
    rules: Vec<Box<dyn NormalizationRule>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
            .with_rule(LegacyFieldRule {
                name: "branding-color-palette",
                section: "branding",
                field: "colorPalette",
                needs_migration: palette_needs_migration,
                replacement: empty_palette,
            })
            .with_rule(LegacyFieldRule {
                name: "hero-image",
                section: "hero",
                field: "heroImage",
                needs_migration: is_absent,
                replacement: catalog::empty_image,
            })
            .with_rule(LegacyFieldRule {
                name: "branding-logo",
                section: "branding",
                field: "logo",
                needs_migration: is_absent,
                replacement: catalog::empty_image,
            })
            .with_rule(TechnologiesListRule)
            .with_rule(DocumentFieldsRule)
            .with_rule(CatalogShapeRule)
    }
}

impl Normalizer {
    /// A normalizer with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: impl NormalizationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Normalize raw stored JSON without typing it.
    pub fn normalize_value(&self, raw: Value) -> Result<Value> {
        let Value::Object(mut root) = raw else {
            return Err(CaseStudyError::InvalidDocument {
                message: "document root must be a JSON object".to_string(),
            });
        };

        let mut applied = 0;
        for rule in &self.rules {
            if rule.apply(&mut root) {
                tracing::debug!("🧹 normalization rule '{}' rewrote the document", rule.name());
                applied += 1;
            }
        }
        if applied > 0 {
            tracing::info!("🧹 Normalized legacy document ({} rules applied)", applied);
        }
        Ok(Value::Object(root))
    }

    pub fn normalize(&self, raw: Value) -> Result<ProjectDocument> {
        let value = self.normalize_value(raw)?;
        serde_json::from_value(value).map_err(|e| CaseStudyError::InvalidDocument {
            message: e.to_string(),
        })
    }

    pub fn normalize_document(&self, document: &ProjectDocument) -> Result<ProjectDocument> {
        self.normalize(document.to_value()?)
    }
}

pub fn normalize(raw: Value) -> Result<ProjectDocument> {
    Normalizer::default().normalize(raw)
}
