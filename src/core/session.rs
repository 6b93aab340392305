//! Edit session
//!
//! Owns the current snapshot of one project. Every edit produces a new
//! snapshot through the mutation engine and replaces the old one only when it
//! succeeds, so a failed edit leaves the session exactly as it was.

use crate::core::catalog::FieldKind;
use crate::core::list_ops;
use crate::core::mutation::{self, SchemaNode};
use crate::core::normalizer::Normalizer;
use crate::core::path::DocPath;
use crate::domain::model::{ImageRef, ProjectDocument};
use crate::domain::ports::{DocumentStore, ImageUploader};
use crate::render::{RenderedSection, Renderer};
use crate::utils::error::{CaseStudyError, Result};
use crate::utils::validation::Validate;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One document edit, serializable so batches can come from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Edit {
    Set { path: DocPath, value: Value },
    Append { path: DocPath, item: Value },
    ReplaceAt { path: DocPath, index: usize, item: Value },
    RemoveAt { path: DocPath, index: usize },
    Move { path: DocPath, from: usize, to: usize },
}

impl Edit {
    pub fn path(&self) -> &DocPath {
        match self {
            Edit::Set { path, .. }
            | Edit::Append { path, .. }
            | Edit::ReplaceAt { path, .. }
            | Edit::RemoveAt { path, .. }
            | Edit::Move { path, .. } => path,
        }
    }

    /// Apply to a snapshot, returning the next one.
    pub fn apply_to(&self, document: &ProjectDocument) -> Result<ProjectDocument> {
        match self {
            Edit::Set { path, value } => mutation::set(document, path, value.clone()),
            Edit::Append { path, item } => list_ops::append(document, path, item.clone()),
            Edit::ReplaceAt { path, index, item } => {
                list_ops::replace_at(document, path, *index, item.clone())
            }
            Edit::RemoveAt { path, index } => list_ops::remove_at(document, path, *index),
            Edit::Move { path, from, to } => list_ops::move_item(document, path, *from, *to),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    document: ProjectDocument,
    dirty: bool,
}

impl EditSession {
    /// Start authoring a new project with every section disabled.
    pub fn create(id: impl Into<String>) -> Self {
        Self {
            document: ProjectDocument::empty(id),
            dirty: true,
        }
    }

    /// Like [`EditSession::create`], but refuses an id the store already holds.
    pub async fn create_new<S: DocumentStore>(store: &S, id: &str) -> Result<Self> {
        if store.load(id).await?.is_some() {
            tracing::warn!("Project '{}' already exists; not starting over", id);
            return Err(CaseStudyError::AlreadyExists { id: id.to_string() });
        }
        Ok(Self::create(id))
    }

    /// Wrap an existing document, normalizing it first.
    pub fn from_document(document: ProjectDocument) -> Result<Self> {
        Ok(Self {
            document: Normalizer::default().normalize_document(&document)?,
            dirty: false,
        })
    }

    /// Load from the store and normalize before any editing happens.
    pub async fn open<S: DocumentStore>(store: &S, id: &str) -> Result<Self> {
        let raw = store
            .load(id)
            .await?
            .ok_or_else(|| CaseStudyError::NotFound { id: id.to_string() })?;

        let mut document = Normalizer::default().normalize(raw)?;
        if document.id.is_empty() {
            tracing::warn!("Stored project has no id; using '{}'", id);
            document.id = id.to_string();
        }
        tracing::info!("📂 Opened project '{}'", document.id);
        Ok(Self {
            document,
            dirty: false,
        })
    }

    pub fn document(&self) -> &ProjectDocument {
        &self.document
    }

    pub fn into_document(self) -> ProjectDocument {
        self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        let next = edit.apply_to(&self.document)?;
        self.commit(next);
        Ok(())
    }

    /// Apply a batch all-or-nothing. Returns the number of edits applied.
    pub fn apply_all(&mut self, edits: &[Edit]) -> Result<usize> {
        let mut next = self.document.clone();
        for (position, edit) in edits.iter().enumerate() {
            next = edit.apply_to(&next).map_err(|e| {
                tracing::warn!("Edit #{} on '{}' rejected: {}", position, edit.path(), e);
                e
            })?;
        }
        self.commit(next);
        Ok(edits.len())
    }

    pub fn set_section_enabled(&mut self, section_key: &str, enabled: bool) -> Result<()> {
        let path = DocPath::parse(&format!("sections.{}.enabled", section_key))?;
        self.apply(&Edit::Set {
            path,
            value: Value::Bool(enabled),
        })
    }

    /// Upload `content` and store the returned reference at `path`, which must be
    /// an image field (replaced) or an image list (appended to). Nothing is
    /// written until the upload resolves; a failed or dropped upload leaves the
    /// document untouched.
    pub async fn attach_image<U: ImageUploader + ?Sized>(
        &mut self,
        uploader: &U,
        path: &DocPath,
        content: &[u8],
        filename: &str,
    ) -> Result<ImageRef> {
        let appends = match mutation::resolve_schema(path)? {
            SchemaNode::Field(FieldKind::Image) => false,
            node if node.list_item() == Some(FieldKind::Image) => true,
            node => {
                return Err(CaseStudyError::TypeMismatch {
                    path: path.to_string(),
                    expected: format!("an image field, found {}", node.describe()),
                })
            }
        };
        // 先確認路徑在目前文件中存在，避免上傳後才發現寫不進去
        mutation::get(&self.document, path)?;

        let uploaded = uploader.upload(content, filename).await.map_err(|e| match e {
            CaseStudyError::UploadFailure { .. } => e,
            other => CaseStudyError::upload_failure(other.to_string()),
        })?;
        tracing::info!("📤 Uploaded '{}' -> {}", filename, uploaded.url);

        let image = ImageRef::from(uploaded);
        let value = serde_json::to_value(&image)?;
        let edit = if appends {
            Edit::Append {
                path: path.clone(),
                item: value,
            }
        } else {
            Edit::Set {
                path: path.clone(),
                value,
            }
        };
        self.apply(&edit)?;
        Ok(image)
    }

    /// Validate and persist the whole document.
    pub async fn save<S: DocumentStore>(&mut self, store: &S) -> Result<()> {
        self.document.validate()?;

        let mut document = self.document.clone();
        document.updated_at = Some(Utc::now());
        store.save(&document).await?;

        tracing::info!("💾 Saved project '{}'", document.id);
        self.document = document;
        self.dirty = false;
        Ok(())
    }

    pub fn render(&self, renderer: &Renderer) -> Vec<RenderedSection> {
        renderer.render_document(&self.document)
    }

    fn commit(&mut self, next: ProjectDocument) {
        if next != self.document {
            self.document = next;
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_edit_deserializes_from_json() {
        let edits: Vec<Edit> = serde_json::from_value(json!([
            {"op": "set", "path": "sections.hero.enabled", "value": true},
            {"op": "append", "path": "sections.overview.keyFeatures", "item": "Offline mode"},
            {"op": "removeAt", "path": "sections.overview.keyFeatures", "index": 0},
            {"op": "replaceAt", "path": "technologies", "index": 0, "item": "Rust"},
            {"op": "move", "path": "technologies", "from": 0, "to": 1}
        ]))
        .unwrap();
        assert_eq!(edits.len(), 5);
        assert_eq!(edits[1].path().to_string(), "sections.overview.keyFeatures");
    }

    #[test]
    fn test_failed_batch_leaves_session_unchanged() {
        let mut session = EditSession::create("atlas");
        let before = session.document().clone();
        let edits = vec![
            Edit::Set {
                path: DocPath::parse("title").unwrap(),
                value: json!("Atlas"),
            },
            Edit::RemoveAt {
                path: DocPath::parse("sections.overview.keyFeatures").unwrap(),
                index: 0,
            },
        ];
        let err = session.apply_all(&edits).unwrap_err();
        assert!(matches!(err, CaseStudyError::IndexOutOfBounds { .. }));
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn test_toggle_section() {
        let mut session = EditSession::from_document(ProjectDocument::empty("atlas")).unwrap();
        assert!(!session.is_dirty());
        session.set_section_enabled("wireframes", true).unwrap();
        assert!(session.document().is_section_enabled("wireframes"));
        assert!(session.is_dirty());
        assert!(session.set_section_enabled("gallery", true).is_err());
    }
}
