//! Path addressing and copy-on-write mutation
//!
//! Every write validates the path against the section catalog first, then walks
//! a deep clone of the document. Containers are never created on the way: each
//! segment but the last has to land on an existing object (named keys) or list
//! (numeric indices).

use crate::core::catalog::{self, FieldKind, SectionSpec, IMAGE_FIELDS};
use crate::core::path::{DocPath, Segment};
use crate::domain::model::ProjectDocument;
use crate::utils::error::{CaseStudyError, Result};
use serde_json::Value;

/// Top-level keys that exist on the document but are not addressable for writes.
const READ_ONLY_FIELDS: &[&str] = &["id", "updatedAt"];

/// What the catalog says lives at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaNode {
    Root,
    Sections,
    Section(&'static SectionSpec),
    Field(FieldKind),
}

impl SchemaNode {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            SchemaNode::Root | SchemaNode::Sections => false,
            SchemaNode::Section(spec) => spec.accepts(value),
            SchemaNode::Field(kind) => kind.accepts(value),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SchemaNode::Root => "the whole document".to_string(),
            SchemaNode::Sections => "the section map".to_string(),
            SchemaNode::Section(spec) => format!("a canonical '{}' section", spec.key),
            SchemaNode::Field(kind) => kind.describe(),
        }
    }

    /// Kind of the elements when this node is a list field.
    pub fn list_item(&self) -> Option<FieldKind> {
        match self {
            SchemaNode::Field(FieldKind::List(item)) => Some(**item),
            _ => None,
        }
    }
}

/// Walk the catalog along `path`. Unknown keys, indices into non-lists and
/// paths running past a scalar are malformed.
pub fn resolve_schema(path: &DocPath) -> Result<SchemaNode> {
    let raw = path.to_string();
    let mut node = SchemaNode::Root;

    for (depth, segment) in path.segments().iter().enumerate() {
        let located = || path.prefix(depth + 1);
        node = match (node, segment) {
            (SchemaNode::Root, Segment::Key(key)) if key == "sections" => SchemaNode::Sections,
            (SchemaNode::Root, Segment::Key(key)) if READ_ONLY_FIELDS.contains(&key.as_str()) => {
                return Err(CaseStudyError::malformed_path(
                    raw,
                    format!("'{}' is read-only", key),
                ));
            }
            (SchemaNode::Root, Segment::Key(key)) => match catalog::document_field(key) {
                Some(spec) => SchemaNode::Field(spec.kind),
                None => {
                    return Err(CaseStudyError::malformed_path(
                        raw,
                        format!("unknown document field '{}'", key),
                    ))
                }
            },
            (SchemaNode::Sections, Segment::Key(key)) => match catalog::section_spec(key) {
                Some(spec) => SchemaNode::Section(spec),
                None => {
                    return Err(CaseStudyError::malformed_path(
                        raw,
                        format!("unknown section '{}'", key),
                    ))
                }
            },
            (SchemaNode::Section(spec), Segment::Key(key)) => match spec.field_kind(key) {
                Some(kind) => SchemaNode::Field(kind),
                None => {
                    return Err(CaseStudyError::malformed_path(
                        raw,
                        format!("section '{}' has no field '{}'", spec.key, key),
                    ))
                }
            },
            (SchemaNode::Field(FieldKind::Image), Segment::Key(key))
                if IMAGE_FIELDS.contains(&key.as_str()) =>
            {
                SchemaNode::Field(FieldKind::Text)
            }
            (SchemaNode::Field(FieldKind::Record(fields)), Segment::Key(key))
                if fields.contains(&key.as_str()) =>
            {
                SchemaNode::Field(FieldKind::Text)
            }
            (SchemaNode::Field(FieldKind::List(item)), Segment::Index(_)) => {
                SchemaNode::Field(*item)
            }
            (SchemaNode::Field(FieldKind::List(_)), Segment::Key(key)) => {
                return Err(CaseStudyError::malformed_path(
                    raw,
                    format!("'{}' is a list; '{}' is not an index", path.prefix(depth), key),
                ))
            }
            (_, Segment::Index(index)) => {
                return Err(CaseStudyError::malformed_path(
                    raw,
                    format!("'{}' is not a list; cannot index {}", path.prefix(depth), index),
                ))
            }
            (_, Segment::Key(key)) => {
                return Err(CaseStudyError::malformed_path(
                    raw,
                    format!("no field '{}' at '{}'", key, located()),
                ))
            }
        };
    }

    Ok(node)
}

/// Read the value stored at `path`.
pub fn get(document: &ProjectDocument, path: &DocPath) -> Result<Value> {
    let root = document.to_value()?;
    lookup(&root, path).cloned()
}

/// Structural lookup on raw JSON; no catalog involved.
pub fn lookup<'a>(root: &'a Value, path: &DocPath) -> Result<&'a Value> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        current = step(current, segment).ok_or_else(|| unresolved(path, depth, current))?;
    }
    Ok(current)
}

/// Return a new document equal to `document` except at `path`, which holds `value`.
pub fn set(document: &ProjectDocument, path: &DocPath, value: Value) -> Result<ProjectDocument> {
    let node = resolve_schema(path)?;
    if matches!(node, SchemaNode::Root | SchemaNode::Sections) {
        return Err(CaseStudyError::malformed_path(
            path.to_string(),
            format!("{} cannot be replaced through a path", node.describe()),
        ));
    }
    if !node.accepts(&value) {
        return Err(CaseStudyError::TypeMismatch {
            path: path.to_string(),
            expected: node.describe(),
        });
    }

    let mut root = document.to_value()?;
    write_at(&mut root, path, value)?;

    tracing::debug!("✏️ set {}", path);
    ProjectDocument::from_value(root)
}

fn write_at(root: &mut Value, path: &DocPath, value: Value) -> Result<()> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(CaseStudyError::malformed_path("", "path is empty"));
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        if step(current, segment).is_none() {
            return Err(unresolved(path, depth, current));
        }
        current = match (current, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get_mut(key),
            (Value::Array(items), Segment::Index(index)) => items.get_mut(*index),
            _ => None,
        }
        .ok_or_else(|| CaseStudyError::malformed_path(path.to_string(), "container vanished"))?;
    }

    match (current, last) {
        (Value::Object(map), Segment::Key(key)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (Value::Array(items), Segment::Index(index)) => {
            let len = items.len();
            match items.get_mut(*index) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(CaseStudyError::IndexOutOfBounds {
                    path: path.prefix(path.len() - 1),
                    index: *index,
                    len,
                }),
            }
        }
        (other, segment) => Err(CaseStudyError::malformed_path(
            path.to_string(),
            format!(
                "'{}' is {}, cannot address '{}'",
                path.prefix(path.len() - 1),
                shape_name(other),
                segment
            ),
        )),
    }
}

fn step<'a>(current: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (current, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        _ => None,
    }
}

fn unresolved(path: &DocPath, depth: usize, container: &Value) -> CaseStudyError {
    let segment = &path.segments()[depth];
    let reason = match (container, segment) {
        (Value::Object(_), Segment::Key(key)) => format!("'{}' does not exist", key),
        (Value::Array(items), Segment::Index(index)) => {
            format!("index {} is past the end of a list of {}", index, items.len())
        }
        (other, _) => format!(
            "'{}' is {}, cannot address '{}'",
            path.prefix(depth),
            shape_name(other),
            segment
        ),
    };
    CaseStudyError::malformed_path(path.to_string(), reason)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
