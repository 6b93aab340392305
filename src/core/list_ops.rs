//! Ordered list editing built on [`mutation::set`].
//!
//! Each operation reads the current list, computes the new one and writes it
//! back as a whole, so untouched elements keep their relative order.

use crate::core::mutation::{self, SchemaNode};
use crate::core::path::DocPath;
use crate::domain::model::ProjectDocument;
use crate::utils::error::{CaseStudyError, Result};
use serde_json::Value;

pub fn append(document: &ProjectDocument, path: &DocPath, item: Value) -> Result<ProjectDocument> {
    let mut items = read_list(document, path, &item)?;
    items.push(item);
    tracing::debug!("➕ append to {} (now {} items)", path, items.len());
    mutation::set(document, path, Value::Array(items))
}

pub fn replace_at(
    document: &ProjectDocument,
    path: &DocPath,
    index: usize,
    item: Value,
) -> Result<ProjectDocument> {
    let mut items = read_list(document, path, &item)?;
    let len = items.len();
    let slot = items
        .get_mut(index)
        .ok_or_else(|| out_of_bounds(path, index, len))?;
    *slot = item;
    tracing::debug!("🔁 replace {}[{}]", path, index);
    mutation::set(document, path, Value::Array(items))
}

pub fn remove_at(
    document: &ProjectDocument,
    path: &DocPath,
    index: usize,
) -> Result<ProjectDocument> {
    let node = list_node(path)?;
    let mut items = current_items(document, path, &node)?;
    if index >= items.len() {
        return Err(out_of_bounds(path, index, items.len()));
    }
    items.remove(index);
    tracing::debug!("➖ remove {}[{}] ({} left)", path, index, items.len());
    mutation::set(document, path, Value::Array(items))
}

/// Move an element, shifting the ones in between. Other elements keep their order.
pub fn move_item(
    document: &ProjectDocument,
    path: &DocPath,
    from: usize,
    to: usize,
) -> Result<ProjectDocument> {
    let node = list_node(path)?;
    let mut items = current_items(document, path, &node)?;
    let len = items.len();
    if from >= len {
        return Err(out_of_bounds(path, from, len));
    }
    if to >= len {
        return Err(out_of_bounds(path, to, len));
    }
    let item = items.remove(from);
    items.insert(to, item);
    mutation::set(document, path, Value::Array(items))
}

fn read_list(document: &ProjectDocument, path: &DocPath, item: &Value) -> Result<Vec<Value>> {
    let node = list_node(path)?;
    if let Some(kind) = node.list_item() {
        if !kind.accepts(item) {
            return Err(CaseStudyError::TypeMismatch {
                path: path.index(0).to_string(),
                expected: kind.describe(),
            });
        }
    }
    current_items(document, path, &node)
}

fn list_node(path: &DocPath) -> Result<SchemaNode> {
    let node = mutation::resolve_schema(path)?;
    if node.list_item().is_none() {
        return Err(CaseStudyError::malformed_path(
            path.to_string(),
            format!("expected a list field, found {}", node.describe()),
        ));
    }
    Ok(node)
}

fn current_items(
    document: &ProjectDocument,
    path: &DocPath,
    node: &SchemaNode,
) -> Result<Vec<Value>> {
    match mutation::get(document, path)? {
        Value::Array(items) => Ok(items),
        _ => Err(CaseStudyError::malformed_path(
            path.to_string(),
            format!("stored value is not {}", node.describe()),
        )),
    }
}

fn out_of_bounds(path: &DocPath, index: usize, len: usize) -> CaseStudyError {
    CaseStudyError::IndexOutOfBounds {
        path: path.to_string(),
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> DocPath {
        DocPath::parse(raw).unwrap()
    }

    fn image(n: usize) -> Value {
        json!({
            "url": format!("/uploads/wf{}.png", n),
            "alt": format!("Wireframe {}", n),
            "caption": ""
        })
    }

    fn with(raw: &str, value: Value) -> ProjectDocument {
        mutation::set(&ProjectDocument::empty("atlas"), &path(raw), value).unwrap()
    }

    #[test]
    fn test_append_adds_last() {
        let features = path("sections.overview.keyFeatures");
        let doc = with("sections.overview.keyFeatures", json!(["A", "B"]));
        let doc = append(&doc, &features, json!("D")).unwrap();
        assert_eq!(mutation::get(&doc, &features).unwrap(), json!(["A", "B", "D"]));
    }

    #[test]
    fn test_remove_keeps_survivor_order() {
        let wireframes = path("sections.wireframes.wireframes");
        let doc = with(
            "sections.wireframes.wireframes",
            json!([image(0), image(1), image(2)]),
        );
        let doc = remove_at(&doc, &wireframes, 1).unwrap();
        assert_eq!(
            mutation::get(&doc, &wireframes).unwrap(),
            json!([image(0), image(2)])
        );
    }

    #[test]
    fn test_remove_every_index_preserves_order() {
        let features = path("sections.overview.keyFeatures");
        let original = vec!["a", "b", "c", "d", "e"];
        let doc = with("sections.overview.keyFeatures", json!(original));
        for index in 0..original.len() {
            let updated = remove_at(&doc, &features, index).unwrap();
            let mut expected = original.clone();
            expected.remove(index);
            assert_eq!(mutation::get(&updated, &features).unwrap(), json!(expected));
        }
    }

    #[test]
    fn test_remove_sole_element_leaves_empty_list() {
        let features = path("sections.overview.keyFeatures");
        let doc = with("sections.overview.keyFeatures", json!(["only"]));
        let doc = remove_at(&doc, &features, 0).unwrap();
        assert_eq!(mutation::get(&doc, &features).unwrap(), json!([]));
    }

    #[test]
    fn test_append_then_remove_last_round_trips() {
        let metrics = path("sections.resultsImpact.metrics");
        let doc = with(
            "sections.resultsImpact.metrics",
            json!([{"value": "40%", "label": "Faster checkout"}]),
        );
        let appended = append(&doc, &metrics, json!({"value": "2x", "label": "Signups"})).unwrap();
        let restored = remove_at(&appended, &metrics, 1).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_out_of_bounds_is_fatal() {
        let features = path("sections.overview.keyFeatures");
        let doc = with("sections.overview.keyFeatures", json!(["A", "B"]));
        assert!(matches!(
            replace_at(&doc, &features, 2, json!("C")),
            Err(CaseStudyError::IndexOutOfBounds { index: 2, len: 2, .. })
        ));
        assert!(matches!(
            remove_at(&doc, &features, 5),
            Err(CaseStudyError::IndexOutOfBounds { index: 5, len: 2, .. })
        ));
    }

    #[test]
    fn test_replace_at_checks_item_kind() {
        let steps = path("sections.developmentProcess.steps");
        let doc = with(
            "sections.developmentProcess.steps",
            json!([{"title": "Discovery", "description": "Interviews"}]),
        );
        let doc = replace_at(
            &doc,
            &steps,
            0,
            json!({"title": "Research", "description": "Interviews and audits"}),
        )
        .unwrap();
        let first_title = steps
            .index(0)
            .child(crate::core::path::Segment::Key("title".into()));
        assert_eq!(mutation::get(&doc, &first_title).unwrap(), json!("Research"));

        let err = replace_at(&doc, &steps, 0, json!("Research")).unwrap_err();
        assert!(matches!(err, CaseStudyError::TypeMismatch { .. }));
    }

    #[test]
    fn test_non_list_target_is_malformed() {
        let doc = ProjectDocument::empty("atlas");
        let err = append(&doc, &path("sections.hero.title"), json!("x")).unwrap_err();
        assert!(matches!(err, CaseStudyError::MalformedPath { .. }));
    }

    #[test]
    fn test_move_item() {
        let features = path("sections.overview.keyFeatures");
        let doc = with("sections.overview.keyFeatures", json!(["A", "B", "C", "D"]));
        let doc = move_item(&doc, &features, 3, 1).unwrap();
        assert_eq!(mutation::get(&doc, &features).unwrap(), json!(["A", "D", "B", "C"]));
    }
}
