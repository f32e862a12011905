//! Markdown rendering backend.
//!
//! Keeps the report content inspectable without a layout engine. Tables
//! become pipe tables, bullet lists become list items, and spacers vanish.

use anyhow::Result;

use super::DocumentRenderer;
use crate::report::{Block, ParagraphStyle, ReportDocument};

pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    fn format(doc: &ReportDocument) -> String {
        let mut md = String::with_capacity(2048);

        for block in &doc.blocks {
            match block {
                Block::Title(text) => {
                    md.push_str(&format!("# {}\n\n", text));
                }
                Block::Paragraph { text, style } => {
                    Self::paragraph(&mut md, text, *style);
                }
                Block::KeyValueTable { header, rows, .. } => {
                    md.push_str(&format!("| {} | {} |\n", header.0, header.1));
                    md.push_str("|---|---|\n");
                    for (key, value) in rows {
                        md.push_str(&format!("| {} | {} |\n", key, value));
                    }
                    md.push('\n');
                }
                Block::BulletList(items) => {
                    for item in items {
                        md.push_str(&format!("- {}\n", item));
                    }
                    md.push('\n');
                }
                Block::Spacer { .. } => {}
            }
        }

        md
    }

    fn paragraph(md: &mut String, text: &str, style: ParagraphStyle) {
        match style {
            ParagraphStyle::SectionHeading => {
                md.push_str(&format!("## {}\n\n", text));
            }
            ParagraphStyle::Highlight => {
                md.push_str(&format!("**{}**\n\n", text));
            }
            ParagraphStyle::Footer => {
                for line in text.lines() {
                    md.push_str(&format!("*{}*  \n", line));
                }
                md.push('\n');
            }
            ParagraphStyle::Body => {
                // Hard line breaks survive as trailing double spaces.
                md.push_str(&text.replace('\n', "  \n"));
                md.push_str("\n\n");
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn media_type(&self) -> &'static str {
        "text/markdown"
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, doc: &ReportDocument) -> Result<Vec<u8>> {
        Ok(Self::format(doc).into_bytes())
    }
}
