//! Markdown output for rendered sections, used by `casefolio render --format markdown`.

use crate::domain::model::ImageRef;
use crate::render::blocks::{ContentBlock, RenderedSection};
use std::fmt::Write;

pub fn to_markdown(sections: &[RenderedSection]) -> String {
    let mut out = String::new();
    for section in sections {
        for block in &section.blocks {
            write_block(&mut out, block);
        }
    }
    out.trim_end().to_string() + "\n"
}

fn write_block(out: &mut String, block: &ContentBlock) {
    match block {
        ContentBlock::Heading { level, text } => {
            let hashes = "#".repeat((*level).clamp(1, 6) as usize);
            let _ = writeln!(out, "{} {}\n", hashes, text);
        }
        ContentBlock::Text { text } => {
            let _ = writeln!(out, "{}\n", text);
        }
        ContentBlock::Image { image } => write_image(out, image),
        ContentBlock::Gallery { images } => {
            for image in images {
                write_image(out, image);
            }
        }
        ContentBlock::List { items } => {
            for item in items {
                let _ = writeln!(out, "- {}", item);
            }
            out.push('\n');
        }
        ContentBlock::Cards { cards } => {
            for card in cards {
                if card.description.is_empty() {
                    let _ = writeln!(out, "- **{}**", card.title);
                } else {
                    let _ = writeln!(out, "- **{}**: {}", card.title, card.description);
                }
            }
            out.push('\n');
        }
        ContentBlock::Metrics { metrics } => {
            out.push_str("| Metric | Value |\n|---|---|\n");
            for metric in metrics {
                let _ = writeln!(out, "| {} | {} |", metric.label, metric.value);
            }
            out.push('\n');
        }
        ContentBlock::Facts { facts } => {
            for fact in facts {
                let _ = writeln!(out, "**{}:** {}  ", fact.label, fact.value);
            }
            out.push('\n');
        }
        ContentBlock::Palette { swatches } => {
            let colors: Vec<String> = swatches
                .iter()
                .map(|swatch| format!("{} `{}`", swatch.name, swatch.color))
                .collect();
            let _ = writeln!(out, "Colors: {}\n", colors.join(", "));
        }
        ContentBlock::Fonts {
            heading_font,
            body_font,
        } => {
            let _ = writeln!(
                out,
                "Typography: headings {}, body {}\n",
                or_dash(heading_font),
                or_dash(body_font)
            );
        }
        ContentBlock::Link { label, url } => {
            let _ = writeln!(out, "[{}]({})\n", label, url);
        }
        ContentBlock::Tags { tags } => {
            let tags: Vec<String> = tags.iter().map(|tag| format!("`{}`", tag)).collect();
            let _ = writeln!(out, "{}\n", tags.join(" "));
        }
    }
}

fn write_image(out: &mut String, image: &ImageRef) {
    let _ = writeln!(out, "![{}]({})", image.alt, image.url);
    if let Some(caption) = image.caption.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "*{}*", caption);
    }
    out.push('\n');
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
