//! Per-section content handlers.
//!
//! Each handler reads only its section's catalog fields (plus a few document
//! level fallbacks) and returns blocks in display order. Handlers never see a
//! disabled section; the renderer gates on `enabled` before dispatch.

use crate::domain::model::ProjectDocument;
use crate::render::blocks::{BlockList, ContentBlock, Fact, Swatch};
use crate::render::view::SectionView;

pub type SectionHandler = fn(&SectionView<'_>, &ProjectDocument) -> Vec<ContentBlock>;

/// Handler table keyed by catalog section key.
pub static HANDLERS: &[(&str, SectionHandler)] = &[
    ("hero", hero),
    ("overview", overview),
    ("problemStatement", problem_statement),
    ("solutions", solutions),
    ("branding", branding),
    ("wireframes", wireframes),
    ("uiUxDesign", ui_ux_design),
    ("developmentProcess", development_process),
    ("websitePreview", website_preview),
    ("resultsImpact", results_impact),
    ("conclusion", conclusion),
    ("callToAction", call_to_action),
];

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn hero(section: &SectionView<'_>, doc: &ProjectDocument) -> Vec<ContentBlock> {
    let image = section
        .image("heroImage")
        .or_else(|| (!doc.thumbnail.is_empty()).then(|| doc.thumbnail.clone()));

    BlockList::default()
        .heading(1, section.text("title").or_else(|| non_empty(&doc.title)))
        .text(
            section
                .text("subtitle")
                .or_else(|| non_empty(&doc.short_description)),
        )
        .image(image)
        .tags(doc.technologies.iter().filter(|t| !t.trim().is_empty()).cloned().collect())
        .finish()
}

fn overview(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    let facts = [("Client", "client"), ("Role", "role"), ("Timeline", "timeline")]
        .into_iter()
        .filter_map(|(label, field)| {
            section.text(field).map(|value| Fact {
                label: label.to_string(),
                value: value.to_string(),
            })
        })
        .collect();

    BlockList::default()
        .heading(2, Some("Overview"))
        .text(section.text("description"))
        .facts(facts)
        .heading(3, (!section.texts("keyFeatures").is_empty()).then_some("Key Features"))
        .list(section.texts("keyFeatures"))
        .finish()
}

fn problem_statement(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    let audience = section
        .text("targetAudience")
        .map(|value| Fact {
            label: "Target audience".to_string(),
            value: value.to_string(),
        })
        .into_iter()
        .collect();

    BlockList::default()
        .heading(2, section.text("title").or(Some("The Problem")))
        .text(section.text("description"))
        .list(section.texts("painPoints"))
        .facts(audience)
        .finish()
}

fn solutions(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    BlockList::default()
        .heading(2, section.text("title").or(Some("Solutions")))
        .text(section.text("description"))
        .cards(section.cards("items"))
        .finish()
}

fn branding(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    let swatches = ["primary", "secondary"]
        .into_iter()
        .filter_map(|name| {
            section.record_text("colorPalette", name).map(|color| Swatch {
                name: name.to_string(),
                color: color.to_string(),
            })
        })
        .collect();

    BlockList::default()
        .heading(2, Some("Branding"))
        .text(section.text("description"))
        .image(section.image("logo"))
        .palette(swatches)
        .fonts(
            section.record_text("typography", "headingFont"),
            section.record_text("typography", "bodyFont"),
        )
        .gallery(section.images("brandImages"))
        .finish()
}

fn wireframes(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    BlockList::default()
        .heading(2, Some("Wireframes"))
        .text(section.text("description"))
        .gallery(section.images("wireframes"))
        .finish()
}

fn ui_ux_design(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    BlockList::default()
        .heading(2, Some("UI/UX Design"))
        .text(section.text("description"))
        .cards(section.cards("principles"))
        .gallery(section.images("designImages"))
        .finish()
}

fn development_process(section: &SectionView<'_>, doc: &ProjectDocument) -> Vec<ContentBlock> {
    let mut technologies = section.texts("technologies");
    if technologies.is_empty() {
        technologies = doc
            .technologies
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect();
    }

    BlockList::default()
        .heading(2, Some("Development Process"))
        .text(section.text("description"))
        .cards(section.cards("steps"))
        .tags(technologies)
        .finish()
}

fn website_preview(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    BlockList::default()
        .heading(2, Some("Website Preview"))
        .gallery(section.images("previewImages"))
        .link("View live site", section.text("liveUrl"))
        .link("View source", section.text("repositoryUrl"))
        .finish()
}

fn results_impact(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    BlockList::default()
        .heading(2, Some("Results & Impact"))
        .text(section.text("description"))
        .metrics(section.metrics("metrics"))
        .finish()
}

fn conclusion(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    let lessons = section.texts("lessonsLearned");
    BlockList::default()
        .heading(2, Some("Conclusion"))
        .text(section.text("summary"))
        .heading(3, (!lessons.is_empty()).then_some("Lessons Learned"))
        .list(lessons)
        .finish()
}

fn call_to_action(section: &SectionView<'_>, _doc: &ProjectDocument) -> Vec<ContentBlock> {
    let label = section.text("buttonText").unwrap_or("Get in touch");
    BlockList::default()
        .heading(2, section.text("title").or(Some("Let's Work Together")))
        .text(section.text("description"))
        .link(label, section.text("buttonUrl"))
        .finish()
}
