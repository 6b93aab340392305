use anyhow::Result;
use casefolio::core::catalog::{FieldKind, DOCUMENT_FIELDS, IMAGE_FIELDS, SECTIONS};
use casefolio::core::{list_ops, mutation};
use casefolio::{DocPath, Normalizer, ProjectDocument, Renderer};
use serde_json::{json, Map, Value};

fn path(raw: &str) -> DocPath {
    DocPath::parse(raw).unwrap()
}

fn sample(kind: FieldKind, n: usize) -> Value {
    match kind {
        FieldKind::Text => json!(format!("sample {}", n)),
        FieldKind::Flag => json!(true),
        FieldKind::Integer => json!(n as i64 + 7),
        FieldKind::Choice(options) => json!(options.last().copied().unwrap_or("")),
        FieldKind::Image => json!({
            "url": format!("/img/{}.png", n),
            "alt": format!("Image {}", n),
            "caption": format!("Caption {}", n)
        }),
        FieldKind::Record(fields) => Value::Object(
            fields
                .iter()
                .map(|name| (name.to_string(), json!(format!("{} {}", name, n))))
                .collect::<Map<_, _>>(),
        ),
        FieldKind::List(item) => {
            json!([sample(*item, n), sample(*item, n + 1), sample(*item, n + 2)])
        }
    }
}

/// Every writable field of the catalog, top level first.
fn top_level_fields() -> Vec<(String, FieldKind)> {
    let mut fields: Vec<(String, FieldKind)> = DOCUMENT_FIELDS
        .iter()
        .map(|spec| (spec.name.to_string(), spec.kind))
        .collect();
    for section in SECTIONS {
        fields.push((format!("sections.{}.enabled", section.key), FieldKind::Flag));
        for spec in section.fields {
            fields.push((format!("sections.{}.{}", section.key, spec.name), spec.kind));
        }
    }
    fields
}

/// The field itself plus everything addressable below it.
fn expand(prefix: &str, kind: FieldKind, out: &mut Vec<(String, FieldKind)>) {
    out.push((prefix.to_string(), kind));
    match kind {
        FieldKind::Image => {
            for name in IMAGE_FIELDS {
                out.push((format!("{}.{}", prefix, name), FieldKind::Text));
            }
        }
        FieldKind::Record(fields) => {
            for name in fields {
                out.push((format!("{}.{}", prefix, name), FieldKind::Text));
            }
        }
        FieldKind::List(item) => {
            for index in [0, 2] {
                expand(&format!("{}.{}", prefix, index), *item, out);
            }
        }
        _ => {}
    }
}

fn populated_document() -> Result<ProjectDocument> {
    let mut doc = ProjectDocument::empty("atlas");
    for (raw, kind) in top_level_fields() {
        doc = mutation::set(&doc, &path(&raw), sample(kind, 0))?;
    }
    Ok(doc)
}

#[test]
fn test_set_then_get_on_every_catalog_path() -> Result<()> {
    let doc = populated_document()?;

    let mut leaves = Vec::new();
    for (raw, kind) in top_level_fields() {
        expand(&raw, kind, &mut leaves);
    }
    assert!(leaves.iter().any(|(raw, _)| raw == "thumbnail.caption"));

    for (raw, kind) in &leaves {
        let target = path(raw);
        let value = sample(*kind, 9);
        let original = mutation::get(&doc, &target)?;

        let updated = mutation::set(&doc, &target, value.clone())?;
        assert_eq!(mutation::get(&updated, &target)?, value, "read back {}", raw);

        // 寫回原值必須還原整份文件，代表其他路徑都沒有被動到
        let restored = mutation::set(&updated, &target, original)?;
        assert_eq!(restored, doc, "set on {} touched other paths", raw);
    }
    Ok(())
}

#[test]
fn test_list_properties_on_every_list_field() -> Result<()> {
    let doc = populated_document()?;

    for (raw, kind) in top_level_fields() {
        let FieldKind::List(item) = kind else {
            continue;
        };
        let target = path(&raw);
        let original = mutation::get(&doc, &target)?;
        let items = original.as_array().unwrap().clone();

        let appended = list_ops::append(&doc, &target, sample(*item, 20))?;
        let restored = list_ops::remove_at(&appended, &target, items.len())?;
        assert_eq!(restored, doc, "append/remove round trip on {}", raw);

        for removed in 0..items.len() {
            let next = list_ops::remove_at(&doc, &target, removed)?;
            let expected: Vec<Value> = items
                .iter()
                .enumerate()
                .filter(|(position, _)| *position != removed)
                .map(|(_, value)| value.clone())
                .collect();
            assert_eq!(mutation::get(&next, &target)?, Value::Array(expected), "{}", raw);
        }
    }
    Ok(())
}

#[test]
fn test_enabled_flag_gates_every_section() -> Result<()> {
    let doc = populated_document()?;
    let renderer = Renderer::new();

    for spec in SECTIONS {
        let mut data = doc.section(spec.key).unwrap().clone();
        assert!(renderer.render(spec.key, &data, &doc).is_some(), "{}", spec.key);

        data["enabled"] = json!(false);
        assert!(renderer.render(spec.key, &data, &doc).is_none(), "{}", spec.key);

        data["enabled"] = json!(true);
        let unknown = format!("{}Legacy", spec.key);
        assert!(renderer.render(&unknown, &data, &doc).is_none(), "{}", unknown);
    }
    Ok(())
}

#[test]
fn test_normalize_is_idempotent_for_every_section_shape() -> Result<()> {
    let normalizer = Normalizer::default();
    let odd_values = [
        json!(null),
        json!(42),
        json!("flat string"),
        json!(["#111", "#222"]),
        json!({"enabled": "yes", "stray": 1}),
    ];

    let mut documents = vec![populated_document()?.to_value()?];
    for spec in SECTIONS {
        for odd in &odd_values {
            let mut sections = Map::new();
            sections.insert(spec.key.to_string(), odd.clone());
            let mut fields = Map::new();
            for field in spec.fields {
                fields.insert(field.name.to_string(), odd.clone());
            }
            sections.insert(format!("{}Copy", spec.key), Value::Object(fields.clone()));
            documents.push(json!({"id": spec.key, "sections": sections}));

            let mut only_fields = Map::new();
            only_fields.insert(spec.key.to_string(), Value::Object(fields));
            documents.push(json!({"id": spec.key, "sections": only_fields}));
        }
    }

    for raw in documents {
        let once = normalizer.normalize_value(raw)?;
        let twice = normalizer.normalize_value(once.clone())?;
        assert_eq!(once, twice);
    }
    Ok(())
}
