//! Section catalog
//!
//! Static description of every section a case study can carry: its key, display
//! title, and the kind of each field. The normalizer, the path validator and the
//! renderer registry all read from this table, so adding a field only means
//! touching the entries below.

use serde_json::{json, Map, Value};

/// Key of the flag every section carries.
pub const ENABLED: &str = "enabled";

pub const IMAGE_FIELDS: &[&str] = &["url", "alt", "caption"];
pub const TITLED_ITEM: &[&str] = &["title", "description"];
pub const METRIC: &[&str] = &["value", "label"];
pub const COLOR_PALETTE: &[&str] = &["primary", "secondary"];
pub const TYPOGRAPHY: &[&str] = &["headingFont", "bodyFont"];
pub const PROJECT_STATUSES: &[&str] = &["draft", "published"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    Integer,
    Choice(&'static [&'static str]),
    Image,
    /// 固定欄位的字串記錄，例如 colorPalette
    Record(&'static [&'static str]),
    List(&'static FieldKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SectionSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

const TEXT_LIST: FieldKind = FieldKind::List(&FieldKind::Text);
const IMAGE_LIST: FieldKind = FieldKind::List(&FieldKind::Image);
const TITLED_LIST: FieldKind = FieldKind::List(&FieldKind::Record(TITLED_ITEM));
const METRIC_LIST: FieldKind = FieldKind::List(&FieldKind::Record(METRIC));

/// Editable top-level fields of a project. `id`, `updatedAt` and `sections` are
/// handled separately.
pub static DOCUMENT_FIELDS: &[FieldSpec] = &[
    field("title", FieldKind::Text),
    field("shortDescription", FieldKind::Text),
    field("thumbnail", FieldKind::Image),
    field("technologies", TEXT_LIST),
    field("status", FieldKind::Choice(PROJECT_STATUSES)),
    field("featured", FieldKind::Flag),
    field("order", FieldKind::Integer),
];

pub static SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        key: "hero",
        title: "Hero",
        fields: &[
            field("title", FieldKind::Text),
            field("subtitle", FieldKind::Text),
            field("heroImage", FieldKind::Image),
        ],
    },
    SectionSpec {
        key: "overview",
        title: "Overview",
        fields: &[
            field("description", FieldKind::Text),
            field("client", FieldKind::Text),
            field("role", FieldKind::Text),
            field("timeline", FieldKind::Text),
            field("keyFeatures", TEXT_LIST),
        ],
    },
    SectionSpec {
        key: "problemStatement",
        title: "The Problem",
        fields: &[
            field("title", FieldKind::Text),
            field("description", FieldKind::Text),
            field("painPoints", TEXT_LIST),
            field("targetAudience", FieldKind::Text),
        ],
    },
    SectionSpec {
        key: "solutions",
        title: "Solutions",
        fields: &[
            field("title", FieldKind::Text),
            field("description", FieldKind::Text),
            field("items", TITLED_LIST),
        ],
    },
    SectionSpec {
        key: "branding",
        title: "Branding",
        fields: &[
            field("description", FieldKind::Text),
            field("logo", FieldKind::Image),
            field("colorPalette", FieldKind::Record(COLOR_PALETTE)),
            field("typography", FieldKind::Record(TYPOGRAPHY)),
            field("brandImages", IMAGE_LIST),
        ],
    },
    SectionSpec {
        key: "wireframes",
        title: "Wireframes",
        fields: &[
            field("description", FieldKind::Text),
            field("wireframes", IMAGE_LIST),
        ],
    },
    SectionSpec {
        key: "uiUxDesign",
        title: "UI/UX Design",
        fields: &[
            field("description", FieldKind::Text),
            field("principles", TITLED_LIST),
            field("designImages", IMAGE_LIST),
        ],
    },
    SectionSpec {
        key: "developmentProcess",
        title: "Development Process",
        fields: &[
            field("description", FieldKind::Text),
            field("steps", TITLED_LIST),
            field("technologies", TEXT_LIST),
        ],
    },
    SectionSpec {
        key: "websitePreview",
        title: "Website Preview",
        fields: &[
            field("liveUrl", FieldKind::Text),
            field("repositoryUrl", FieldKind::Text),
            field("previewImages", IMAGE_LIST),
        ],
    },
    SectionSpec {
        key: "resultsImpact",
        title: "Results & Impact",
        fields: &[
            field("description", FieldKind::Text),
            field("metrics", METRIC_LIST),
        ],
    },
    SectionSpec {
        key: "conclusion",
        title: "Conclusion",
        fields: &[
            field("summary", FieldKind::Text),
            field("lessonsLearned", TEXT_LIST),
        ],
    },
    SectionSpec {
        key: "callToAction",
        title: "Let's Work Together",
        fields: &[
            field("title", FieldKind::Text),
            field("description", FieldKind::Text),
            field("buttonText", FieldKind::Text),
            field("buttonUrl", FieldKind::Text),
        ],
    },
];

pub fn section_spec(key: &str) -> Option<&'static SectionSpec> {
    SECTIONS.iter().find(|spec| spec.key == key)
}

pub fn document_field(name: &str) -> Option<&'static FieldSpec> {
    DOCUMENT_FIELDS.iter().find(|spec| spec.name == name)
}

pub fn section_keys() -> impl Iterator<Item = &'static str> {
    SECTIONS.iter().map(|spec| spec.key)
}

/// 空白圖片參照；catalog 預設一律帶 caption
pub fn empty_image() -> Value {
    json!({ "url": "", "alt": "", "caption": "" })
}

impl SectionSpec {
    /// Kind of a field inside this section, `enabled` included.
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        if name == ENABLED {
            return Some(FieldKind::Flag);
        }
        self.fields
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
    }

    /// A disabled section with every field at its default.
    pub fn default_value(&self) -> Value {
        let mut section = Map::new();
        section.insert(ENABLED.to_string(), Value::Bool(false));
        for spec in self.fields {
            section.insert(spec.name.to_string(), spec.kind.default_value());
        }
        Value::Object(section)
    }

    /// Accepts a whole section only when `enabled` and every catalog field are
    /// present with the right kind. Extra keys are tolerated.
    pub fn accepts(&self, value: &Value) -> bool {
        let Value::Object(section) = value else {
            return false;
        };
        section.get(ENABLED).is_some_and(Value::is_boolean)
            && self.fields.iter().all(|spec| {
                section
                    .get(spec.name)
                    .is_some_and(|field| spec.kind.accepts(field))
            })
    }

    /// Coerce any stored value into this section's canonical shape.
    pub fn conform(&self, value: Value) -> Value {
        let Value::Object(mut section) = value else {
            return self.default_value();
        };

        let enabled = FieldKind::Flag.conform(section.remove(ENABLED).unwrap_or(Value::Null));
        section.insert(ENABLED.to_string(), enabled);

        for spec in self.fields {
            let current = section.remove(spec.name).unwrap_or(Value::Null);
            section.insert(spec.name.to_string(), spec.kind.conform(current));
        }
        Value::Object(section)
    }
}

impl FieldKind {
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Flag => Value::Bool(false),
            FieldKind::Integer => Value::from(0),
            FieldKind::Choice(options) => {
                Value::String(options.first().copied().unwrap_or("").to_string())
            }
            FieldKind::Image => empty_image(),
            FieldKind::Record(fields) => empty_record(fields),
            FieldKind::List(_) => Value::Array(Vec::new()),
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Flag => value.is_boolean(),
            FieldKind::Integer => value.is_i64(),
            FieldKind::Choice(options) => value
                .as_str()
                .is_some_and(|choice| options.contains(&choice)),
            // 只接受 url/alt/caption 三個鍵，caption 不可為 null
            FieldKind::Image => match value {
                Value::Object(image) => {
                    image.keys().all(|key| IMAGE_FIELDS.contains(&key.as_str()))
                        && image.get("url").is_some_and(Value::is_string)
                        && image.get("alt").is_some_and(Value::is_string)
                        && image.get("caption").map_or(true, Value::is_string)
                }
                _ => false,
            },
            FieldKind::Record(fields) => match value {
                Value::Object(record) => fields
                    .iter()
                    .all(|name| record.get(*name).is_some_and(Value::is_string)),
                _ => false,
            },
            FieldKind::List(item) => match value {
                Value::Array(items) => items.iter().all(|entry| item.accepts(entry)),
                _ => false,
            },
        }
    }

    /// Idempotent coercion used by the normalizer: `conform(conform(v)) == conform(v)`.
    pub fn conform(&self, value: Value) -> Value {
        let nested = matches!(
            self,
            FieldKind::Image | FieldKind::Record(_) | FieldKind::List(_)
        );
        if !nested && self.accepts(&value) {
            return value;
        }
        match self {
            FieldKind::Text => match value {
                Value::Number(n) => Value::String(n.to_string()),
                Value::Bool(b) => Value::String(b.to_string()),
                _ => Value::String(String::new()),
            },
            FieldKind::Flag => Value::Bool(false),
            FieldKind::Integer => match value {
                Value::Number(n) => Value::from(n.as_f64().map(|f| f as i64).unwrap_or(0)),
                Value::String(s) => Value::from(s.trim().parse::<i64>().unwrap_or(0)),
                _ => Value::from(0),
            },
            FieldKind::Choice(_) => self.default_value(),
            FieldKind::Image => conform_image(value),
            FieldKind::Record(fields) => match value {
                Value::Object(mut record) => {
                    for name in fields.iter() {
                        let current = record.remove(*name).unwrap_or(Value::Null);
                        record.insert(name.to_string(), FieldKind::Text.conform(current));
                    }
                    Value::Object(record)
                }
                _ => empty_record(fields),
            },
            FieldKind::List(item) => match value {
                Value::Array(items) => {
                    Value::Array(items.into_iter().map(|entry| item.conform(entry)).collect())
                }
                _ => Value::Array(Vec::new()),
            },
        }
    }

    /// 錯誤訊息用的描述
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Text => "a string".to_string(),
            FieldKind::Flag => "a boolean".to_string(),
            FieldKind::Integer => "an integer".to_string(),
            FieldKind::Choice(options) => format!("one of {}", options.join("|")),
            FieldKind::Image => "an image reference {url, alt, caption?}".to_string(),
            FieldKind::Record(fields) => format!("a record {{{}}}", fields.join(", ")),
            FieldKind::List(item) => format!("a list of {}", item.describe()),
        }
    }
}

fn empty_record(fields: &[&str]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|name| (name.to_string(), Value::String(String::new())))
            .collect(),
    )
}

fn conform_image(value: Value) -> Value {
    match value {
        // 舊資料可能只存了網址字串
        Value::String(url) => json!({ "url": url, "alt": "", "caption": "" }),
        Value::Object(mut image) => {
            let mut canonical = Map::new();
            for name in ["url", "alt"] {
                let current = image.remove(name).unwrap_or(Value::Null);
                canonical.insert(name.to_string(), FieldKind::Text.conform(current));
            }
            match image.remove("caption") {
                None | Some(Value::Null) => {}
                Some(caption) => {
                    canonical.insert("caption".to_string(), FieldKind::Text.conform(caption));
                }
            }
            if !image.is_empty() {
                let dropped: Vec<&String> = image.keys().collect();
                tracing::debug!("Dropping unknown image keys: {:?}", dropped);
            }
            Value::Object(canonical)
        }
        _ => empty_image(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys_are_unique() {
        let mut keys: Vec<&str> = section_keys().collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert_eq!(total, 12);
    }

    #[test]
    fn test_default_section_is_disabled_and_canonical() {
        for spec in SECTIONS {
            let section = spec.default_value();
            assert_eq!(section[ENABLED], Value::Bool(false), "{}", spec.key);
            assert!(spec.accepts(&section), "{} default not canonical", spec.key);
        }
    }

    #[test]
    fn test_field_kind_lookup_includes_enabled() {
        let branding = section_spec("branding").unwrap();
        assert_eq!(branding.field_kind("enabled"), Some(FieldKind::Flag));
        assert_eq!(
            branding.field_kind("colorPalette"),
            Some(FieldKind::Record(COLOR_PALETTE))
        );
        assert_eq!(branding.field_kind("palette"), None);
    }

    #[test]
    fn test_image_accepts_optional_caption() {
        assert!(FieldKind::Image.accepts(&json!({"url": "a.png", "alt": "A"})));
        assert!(FieldKind::Image.accepts(&json!({"url": "a.png", "alt": "A", "caption": "c"})));
        assert!(!FieldKind::Image.accepts(&json!({"url": "a.png"})));
        assert!(!FieldKind::Image.accepts(&json!("a.png")));
    }

    #[test]
    fn test_image_rejects_null_caption_and_unknown_keys() {
        let kind = FieldKind::Image;
        assert!(!kind.accepts(&json!({"url": "a.png", "alt": "A", "caption": null})));
        assert!(!kind.accepts(&json!({"url": "a.png", "alt": "A", "credit": "Jane"})));

        let conformed =
            kind.conform(json!({"url": "a.png", "alt": "A", "caption": null, "credit": "Jane"}));
        assert_eq!(conformed, json!({"url": "a.png", "alt": "A"}));
        assert!(kind.accepts(&conformed));
    }

    #[test]
    fn test_conform_is_idempotent_for_odd_inputs() {
        let inputs = [
            json!(null),
            json!(42),
            json!("plain"),
            json!(["#111", "#222"]),
            json!({"url": 3, "extra": true}),
            json!([{"title": "A"}, "stray"]),
        ];
        let kinds = [
            FieldKind::Text,
            FieldKind::Integer,
            FieldKind::Image,
            FieldKind::Record(COLOR_PALETTE),
            TITLED_LIST,
            IMAGE_LIST,
        ];
        for kind in kinds {
            for input in &inputs {
                let once = kind.conform(input.clone());
                assert!(kind.accepts(&once), "{:?} -> {}", kind, once);
                assert_eq!(kind.conform(once.clone()), once);
            }
        }
    }

    #[test]
    fn test_conform_section_keeps_unknown_keys() {
        let hero = section_spec("hero").unwrap();
        let conformed = hero.conform(json!({"title": "Atlas", "legacyBadge": "new"}));
        assert_eq!(conformed["enabled"], json!(false));
        assert_eq!(conformed["title"], json!("Atlas"));
        assert_eq!(conformed["legacyBadge"], json!("new"));
        assert_eq!(conformed["heroImage"], empty_image());
    }
}
