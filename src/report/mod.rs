//! Typed report document.
//!
//! A report is an ordered sequence of renderable blocks. The builder
//! assembles the sequence from calculation results; the backends in
//! [`render`] turn it into concrete bytes. Content is decided entirely
//! by the builder and never depends on which backend consumes it.

pub mod builder;
pub mod render;

pub use builder::{build_report, RECOMMENDATIONS, REPORT_TITLE};

/// Visual treatment of a paragraph block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    /// Regular running text.
    Body,
    /// Section heading above a group of blocks.
    SectionHeading,
    /// The headline figure, rendered large and centered.
    Highlight,
    /// Closing fine print, rendered small and centered.
    Footer,
}

/// Header tint for a key/value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAccent {
    Blue,
    Green,
}

/// One renderable unit of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Document title, first block of every report.
    Title(String),
    /// Styled text. May contain newlines, which renderers keep as line breaks.
    Paragraph { text: String, style: ParagraphStyle },
    /// Two-column table with a tinted header row.
    KeyValueTable {
        header: (String, String),
        rows: Vec<(String, String)>,
        accent: TableAccent,
    },
    /// Unordered list, one bullet per item.
    BulletList(Vec<String>),
    /// Vertical gap in layout-aware backends, invisible elsewhere.
    Spacer { points: f64 },
}

/// Ordered block sequence making up one report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDocument {
    pub blocks: Vec<Block>,
}
