//! Read-only accessors over a section's JSON.
//!
//! Blank strings count as missing so handlers can skip empty fields without
//! checking each one by hand.

use crate::domain::model::ImageRef;
use crate::render::blocks::{Card, Metric};
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    data: &'a Value,
}

impl<'a> SectionView<'a> {
    pub fn new(data: &'a Value) -> Self {
        Self { data }
    }

    pub fn text(&self, field: &str) -> Option<&'a str> {
        non_blank(self.data.get(field))
    }

    pub fn texts(&self, field: &str) -> Vec<String> {
        self.array(field)
            .filter_map(|item| non_blank(Some(item)))
            .map(str::to_string)
            .collect()
    }

    pub fn image(&self, field: &str) -> Option<ImageRef> {
        self.data.get(field).and_then(image_from)
    }

    pub fn images(&self, field: &str) -> Vec<ImageRef> {
        self.array(field).filter_map(image_from).collect()
    }

    /// Sub-field of a fixed-shape record such as `colorPalette.primary`.
    pub fn record_text(&self, field: &str, key: &str) -> Option<&'a str> {
        non_blank(self.data.get(field).and_then(|record| record.get(key)))
    }

    pub fn cards(&self, field: &str) -> Vec<Card> {
        self.pairs(field, "title", "description")
            .into_iter()
            .map(|(title, description)| Card { title, description })
            .collect()
    }

    pub fn metrics(&self, field: &str) -> Vec<Metric> {
        self.pairs(field, "value", "label")
            .into_iter()
            .map(|(value, label)| Metric { value, label })
            .collect()
    }

    fn pairs(&self, field: &str, first: &str, second: &str) -> Vec<(String, String)> {
        self.array(field)
            .filter_map(|item| {
                let a = non_blank(item.get(first));
                let b = non_blank(item.get(second));
                if a.is_none() && b.is_none() {
                    return None;
                }
                Some((
                    a.unwrap_or_default().to_string(),
                    b.unwrap_or_default().to_string(),
                ))
            })
            .collect()
    }

    fn array(&self, field: &str) -> impl Iterator<Item = &'a Value> {
        self.data
            .get(field)
            .and_then(Value::as_array)
            .map(|items| items.iter())
            .into_iter()
            .flatten()
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn image_from(value: &Value) -> Option<ImageRef> {
    let url = non_blank(value.get("url"))?;
    Some(ImageRef {
        url: url.to_string(),
        alt: non_blank(value.get("alt")).unwrap_or_default().to_string(),
        caption: non_blank(value.get("caption")).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_text_is_missing() {
        let data = json!({"title": "  ", "subtitle": "Hi", "n": 3});
        let view = SectionView::new(&data);
        assert_eq!(view.text("title"), None);
        assert_eq!(view.text("subtitle"), Some("Hi"));
        assert_eq!(view.text("n"), None);
        assert_eq!(view.text("absent"), None);
    }

    #[test]
    fn test_images_skip_empty_urls() {
        let data = json!({"shots": [
            {"url": "/a.png", "alt": "A", "caption": ""},
            {"url": "", "alt": "ghost"},
            {"url": "/b.png", "alt": "B", "caption": "Checkout"}
        ]});
        let images = SectionView::new(&data).images("shots");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].caption, None);
        assert_eq!(images[1].caption.as_deref(), Some("Checkout"));
    }

    #[test]
    fn test_cards_drop_fully_blank_items() {
        let data = json!({"items": [
            {"title": "Sync", "description": ""},
            {"title": "", "description": ""}
        ]});
        let cards = SectionView::new(&data).cards("items");
        assert_eq!(cards, vec![Card { title: "Sync".into(), description: String::new() }]);
    }
}
