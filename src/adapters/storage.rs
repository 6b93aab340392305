use crate::domain::model::ProjectDocument;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{CaseStudyError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// 以 `<base>/<id>.json` 存放整份文件
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CaseStudyError::validation(
                "id",
                format!("'{}' may only contain letters, digits, '-' and '_'", id),
            ));
        }
        Ok(self.base_path.join(format!("{}.json", id)))
    }

    /// Ids of every stored project, sorted.
    pub async fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl DocumentStore for LocalDocumentStore {
    async fn load(&self, id: &str) -> Result<Option<Value>> {
        let full_path = self.document_path(id)?;
        let data = match tokio::fs::read(&full_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No stored document at {}", full_path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    async fn save(&self, document: &ProjectDocument) -> Result<()> {
        let full_path = self.document_path(&document.id)?;
        tokio::fs::create_dir_all(&self.base_path).await?;

        let json_data = serde_json::to_vec_pretty(document)?;

        // 先寫暫存檔再 rename，整份取代
        let tmp_path = full_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json_data).await?;
        tokio::fs::rename(&tmp_path, &full_path).await?;

        tracing::debug!(
            "Wrote {} bytes to {}",
            json_data.len(),
            full_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalDocumentStore::new(temp_dir.path());

        let mut doc = ProjectDocument::empty("atlas");
        doc.title = "Atlas".to_string();
        store.save(&doc).await.unwrap();

        let raw = store.load("atlas").await.unwrap().unwrap();
        assert_eq!(raw["title"], "Atlas");
        assert!(!temp_dir.path().join("atlas.json.tmp").exists());
        assert_eq!(store.list_ids().await.unwrap(), vec!["atlas"]);
    }

    #[tokio::test]
    async fn test_missing_document_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalDocumentStore::new(temp_dir.path().join("nothing-yet"));
        assert!(store.load("atlas").await.unwrap().is_none());
        assert!(store.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_cannot_escape_the_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalDocumentStore::new(temp_dir.path());
        assert!(store.load("../secrets").await.is_err());
        assert!(store.save(&ProjectDocument::empty("a/b")).await.is_err());
    }
}
