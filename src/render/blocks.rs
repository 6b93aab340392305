//! Layout-agnostic content blocks handed to the presentation layer.

use crate::domain::model::ImageRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    Text { text: String },
    Image { image: ImageRef },
    Gallery { images: Vec<ImageRef> },
    List { items: Vec<String> },
    Cards { cards: Vec<Card> },
    Metrics { metrics: Vec<Metric> },
    Facts { facts: Vec<Fact> },
    Palette { swatches: Vec<Swatch> },
    #[serde(rename_all = "camelCase")]
    Fonts { heading_font: String, body_font: String },
    Link { label: String, url: String },
    Tags { tags: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSection {
    pub key: String,
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

/// 依序收集 block，空內容直接略過
#[derive(Debug, Default)]
pub(crate) struct BlockList(Vec<ContentBlock>);

impl BlockList {
    pub fn heading(&mut self, level: u8, text: Option<&str>) -> &mut Self {
        if let Some(text) = text {
            self.0.push(ContentBlock::Heading {
                level,
                text: text.to_string(),
            });
        }
        self
    }

    pub fn text(&mut self, text: Option<&str>) -> &mut Self {
        if let Some(text) = text {
            self.0.push(ContentBlock::Text {
                text: text.to_string(),
            });
        }
        self
    }

    pub fn image(&mut self, image: Option<ImageRef>) -> &mut Self {
        if let Some(image) = image {
            self.0.push(ContentBlock::Image { image });
        }
        self
    }

    pub fn gallery(&mut self, images: Vec<ImageRef>) -> &mut Self {
        if !images.is_empty() {
            self.0.push(ContentBlock::Gallery { images });
        }
        self
    }

    pub fn list(&mut self, items: Vec<String>) -> &mut Self {
        if !items.is_empty() {
            self.0.push(ContentBlock::List { items });
        }
        self
    }

    pub fn cards(&mut self, cards: Vec<Card>) -> &mut Self {
        if !cards.is_empty() {
            self.0.push(ContentBlock::Cards { cards });
        }
        self
    }

    pub fn metrics(&mut self, metrics: Vec<Metric>) -> &mut Self {
        if !metrics.is_empty() {
            self.0.push(ContentBlock::Metrics { metrics });
        }
        self
    }

    pub fn facts(&mut self, facts: Vec<Fact>) -> &mut Self {
        if !facts.is_empty() {
            self.0.push(ContentBlock::Facts { facts });
        }
        self
    }

    pub fn palette(&mut self, swatches: Vec<Swatch>) -> &mut Self {
        if !swatches.is_empty() {
            self.0.push(ContentBlock::Palette { swatches });
        }
        self
    }

    pub fn fonts(&mut self, heading: Option<&str>, body: Option<&str>) -> &mut Self {
        if heading.is_some() || body.is_some() {
            self.0.push(ContentBlock::Fonts {
                heading_font: heading.unwrap_or_default().to_string(),
                body_font: body.unwrap_or_default().to_string(),
            });
        }
        self
    }

    pub fn link(&mut self, label: &str, url: Option<&str>) -> &mut Self {
        if let Some(url) = url {
            self.0.push(ContentBlock::Link {
                label: label.to_string(),
                url: url.to_string(),
            });
        }
        self
    }

    pub fn tags(&mut self, tags: Vec<String>) -> &mut Self {
        if !tags.is_empty() {
            self.0.push(ContentBlock::Tags { tags });
        }
        self
    }

    pub fn finish(&mut self) -> Vec<ContentBlock> {
        std::mem::take(&mut self.0)
    }
}
