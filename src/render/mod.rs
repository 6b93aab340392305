//! Section dispatch and rendering
//!
//! The registry maps each catalog key to its handler once, at construction.
//! Rendering applies a single `enabled` gate before any dispatch, and keys
//! outside the catalog render nothing.

pub mod blocks;
pub mod handlers;
pub mod markdown;
pub mod view;

pub use blocks::{Card, ContentBlock, Fact, Metric, RenderedSection, Swatch};
pub use handlers::SectionHandler;
pub use view::SectionView;

use crate::core::catalog::{self, SectionSpec, ENABLED, SECTIONS};
use crate::domain::model::ProjectDocument;
use serde_json::Value;
use std::collections::HashMap;

pub struct SectionRegistry {
    entries: HashMap<&'static str, (&'static SectionSpec, SectionHandler)>,
}

impl SectionRegistry {
    /// Registry covering exactly the catalog's keys.
    pub fn from_catalog() -> Self {
        let mut entries = HashMap::with_capacity(SECTIONS.len());
        for spec in SECTIONS {
            match handlers::HANDLERS.iter().find(|(key, _)| *key == spec.key) {
                Some((_, handler)) => {
                    entries.insert(spec.key, (spec, *handler));
                }
                None => tracing::warn!("⚠️ No renderer registered for section '{}'", spec.key),
            }
        }
        Self { entries }
    }

    /// Replace the handler for a catalog key. Keys outside the catalog are refused.
    pub fn register(&mut self, key: &str, handler: SectionHandler) -> bool {
        match catalog::section_spec(key) {
            Some(spec) => {
                self.entries.insert(spec.key, (spec, handler));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<(&'static SectionSpec, SectionHandler)> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::from_catalog()
    }
}

#[derive(Default)]
pub struct Renderer {
    registry: SectionRegistry,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: SectionRegistry) -> Self {
        Self { registry }
    }

    /// Content for one section, or `None` when it is disabled or its key is unknown.
    pub fn render(
        &self,
        section_key: &str,
        section_data: &Value,
        parent: &ProjectDocument,
    ) -> Option<RenderedSection> {
        let enabled = section_data
            .get(ENABLED)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !enabled {
            return None;
        }

        let Some((spec, handler)) = self.registry.get(section_key) else {
            tracing::debug!("Skipping unknown section key '{}'", section_key);
            return None;
        };

        let blocks = handler(&SectionView::new(section_data), parent);
        tracing::debug!("🖼️ Rendered '{}' into {} blocks", section_key, blocks.len());
        Some(RenderedSection {
            key: spec.key.to_string(),
            title: spec.title.to_string(),
            blocks,
        })
    }

    /// Enabled sections of `document` in catalog order.
    pub fn render_document(&self, document: &ProjectDocument) -> Vec<RenderedSection> {
        SECTIONS
            .iter()
            .filter_map(|spec| {
                let data = document.section(spec.key)?;
                self.render(spec.key, data, document)
            })
            .collect()
    }
}
