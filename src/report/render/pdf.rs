//! PDF rendering backend.
//!
//! A minimal PDF 1.4 writer sized to the block language: single-column A4
//! pages, the two standard Helvetica fonts with WinAnsi encoding, filled
//! table bands with a stroked grid, and top-down cursor layout with page
//! breaks. Objects and the cross-reference table are assembled by hand and
//! content streams stay uncompressed.

use anyhow::Result;

use super::DocumentRenderer;
use crate::report::{Block, ParagraphStyle, ReportDocument, TableAccent};

const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 72.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f64 = 24.0;
const TITLE_LEADING: f64 = 29.0;
const TITLE_SPACE_AFTER: f64 = 30.0;
const HEADING_SIZE: f64 = 16.0;
const HEADING_LEADING: f64 = 20.0;
const HEADING_SPACE_AFTER: f64 = 12.0;
const BODY_SIZE: f64 = 10.0;
const BODY_LEADING: f64 = 14.0;
const HIGHLIGHT_SIZE: f64 = 18.0;
const HIGHLIGHT_LEADING: f64 = 24.0;
const BULLET_INDENT: f64 = 14.0;

const TABLE_KEY_WIDTH: f64 = 216.0;
const TABLE_VALUE_WIDTH: f64 = 144.0;
const TABLE_HEADER_HEIGHT: f64 = 28.0;
const TABLE_ROW_HEIGHT: f64 = 22.0;
const CELL_PAD: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb(f64, f64, f64);

impl Rgb {
    fn pdf(&self) -> String {
        format!("{} {} {}", num(self.0), num(self.1), num(self.2))
    }
}

const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
const DARK_BLUE: Rgb = Rgb(0.0, 0.0, 0.545);
const DARK_GREEN: Rgb = Rgb(0.0, 0.392, 0.0);
const RED: Rgb = Rgb(1.0, 0.0, 0.0);
const WHITE_SMOKE: Rgb = Rgb(0.961, 0.961, 0.961);
const LIGHT_BLUE: Rgb = Rgb(0.678, 0.847, 0.902);
const LIGHT_GREEN: Rgb = Rgb(0.565, 0.933, 0.565);
const BEIGE: Rgb = Rgb(0.961, 0.961, 0.863);
const LIGHT_GREY: Rgb = Rgb(0.827, 0.827, 0.827);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "/F1",
            Font::Bold => "/F2",
        }
    }
}

/// Glyph advance widths for WinAnsi bytes 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722,
    667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222,
    500, 222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334,
    584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667,
    611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 333, 278, 333, 584, 556, 333, 556, 556, 556, 611, 556, 333, 611, 611, 278, 278, 556,
    278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(byte: u8, font: Font) -> u16 {
    match byte {
        0x20..=0x7E => {
            let table = match font {
                Font::Regular => &HELVETICA_WIDTHS,
                Font::Bold => &HELVETICA_BOLD_WIDTHS,
            };
            table[(byte - 0x20) as usize]
        }
        0x95 => 350, // bullet
        0xB0 => 400, // degree sign
        0xD7 => 584, // multiplication sign
        _ => 556,
    }
}

/// Maps report text onto WinAnsi bytes. Characters the encoding lacks are
/// substituted with a close ASCII form rather than dropped.
fn winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{2082}' => b'2', // subscript two, as in CO2
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{00B0}' => 0xB0,
            '\u{00D7}' => 0xD7,
            _ => b'?',
        })
        .collect()
}

/// Escapes an encoded string for a PDF literal, octal-escaping bytes outside
/// the printable ASCII range.
fn escape_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    for &b in bytes {
        match b {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\{:03o}", b)),
        }
    }
    out
}

fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = winansi(text)
        .iter()
        .map(|&b| u32::from(glyph_width(b, font)))
        .sum();
    f64::from(units) * size / 1000.0
}

/// Greedy word wrap against the font metrics.
fn wrap(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if current.is_empty() || text_width(&candidate, font, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn num(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Cursor-based page composer. The y cursor runs from the top margin down;
/// content that would cross the bottom margin opens a new page first.
struct PageLayout {
    pages: Vec<String>,
    ops: String,
    y: f64,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn finish_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_room(&mut self, height: f64) {
        if self.y - height < MARGIN && !self.ops.is_empty() {
            self.finish_page();
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, baseline: f64, font: Font, size: f64, color: Rgb) {
        let literal = escape_literal(&winansi(text));
        self.ops.push_str("BT\n");
        self.ops
            .push_str(&format!("{} {} Tf\n", font.resource(), num(size)));
        self.ops.push_str(&format!("{} rg\n", color.pdf()));
        self.ops.push_str(&format!("{} {} Td\n", num(x), num(baseline)));
        self.ops.push_str(&format!("({}) Tj\n", literal));
        self.ops.push_str("ET\n");
    }

    fn line(&mut self, text: &str, x: f64, font: Font, size: f64, leading: f64, color: Rgb) {
        self.ensure_room(leading);
        self.y -= leading;
        self.draw_text(text, x, self.y, font, size, color);
    }

    fn centered_line(&mut self, text: &str, font: Font, size: f64, leading: f64, color: Rgb) {
        let x = MARGIN + (CONTENT_WIDTH - text_width(text, font, size)).max(0.0) / 2.0;
        self.line(text, x, font, size, leading, color);
    }

    fn space(&mut self, points: f64) {
        self.y -= points;
    }

    fn title(&mut self, text: &str) {
        for line in wrap(text, Font::Bold, TITLE_SIZE, CONTENT_WIDTH) {
            self.centered_line(&line, Font::Bold, TITLE_SIZE, TITLE_LEADING, DARK_BLUE);
        }
        self.space(TITLE_SPACE_AFTER);
    }

    fn paragraph(&mut self, text: &str, style: ParagraphStyle) {
        match style {
            ParagraphStyle::SectionHeading => {
                for line in wrap(text, Font::Bold, HEADING_SIZE, CONTENT_WIDTH) {
                    self.line(&line, MARGIN, Font::Bold, HEADING_SIZE, HEADING_LEADING, DARK_GREEN);
                }
                self.space(HEADING_SPACE_AFTER);
            }
            ParagraphStyle::Highlight => {
                for raw in text.split('\n') {
                    for line in wrap(raw, Font::Bold, HIGHLIGHT_SIZE, CONTENT_WIDTH) {
                        self.centered_line(&line, Font::Bold, HIGHLIGHT_SIZE, HIGHLIGHT_LEADING, RED);
                    }
                }
            }
            ParagraphStyle::Footer => {
                for raw in text.split('\n') {
                    for line in wrap(raw, Font::Regular, BODY_SIZE, CONTENT_WIDTH) {
                        self.centered_line(&line, Font::Regular, BODY_SIZE, BODY_LEADING, BLACK);
                    }
                }
            }
            ParagraphStyle::Body => {
                for raw in text.split('\n') {
                    for line in wrap(raw, Font::Regular, BODY_SIZE, CONTENT_WIDTH) {
                        self.line(&line, MARGIN, Font::Regular, BODY_SIZE, BODY_LEADING, BLACK);
                    }
                }
            }
        }
    }

    fn bullet_list(&mut self, items: &[String]) {
        for item in items {
            let lines = wrap(item, Font::Regular, BODY_SIZE, CONTENT_WIDTH - BULLET_INDENT);
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    self.line(&format!("• {}", line), MARGIN, Font::Regular, BODY_SIZE, BODY_LEADING, BLACK);
                } else {
                    self.line(line, MARGIN + BULLET_INDENT, Font::Regular, BODY_SIZE, BODY_LEADING, BLACK);
                }
            }
        }
    }

    fn rect_fill(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.ops.push_str(&format!("{} rg\n", color.pdf()));
        self.ops
            .push_str(&format!("{} {} {} {} re\nf\n", num(x), num(y), num(w), num(h)));
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push_str(&format!(
            "{} {} m\n{} {} l\nS\n",
            num(x1),
            num(y1),
            num(x2),
            num(y2)
        ));
    }

    fn table(&mut self, header: &(String, String), rows: &[(String, String)], accent: TableAccent) {
        let total_height = TABLE_HEADER_HEIGHT + rows.len() as f64 * TABLE_ROW_HEIGHT;
        self.ensure_room(total_height);

        let x0 = MARGIN;
        let x1 = MARGIN + TABLE_KEY_WIDTH;
        let width = TABLE_KEY_WIDTH + TABLE_VALUE_WIDTH;
        let top = self.y;

        let (header_fill, body_fill) = match accent {
            TableAccent::Blue => (LIGHT_BLUE, BEIGE),
            TableAccent::Green => (LIGHT_GREEN, LIGHT_GREY),
        };

        self.rect_fill(x0, top - TABLE_HEADER_HEIGHT, width, TABLE_HEADER_HEIGHT, header_fill);
        let header_baseline = top - TABLE_HEADER_HEIGHT + 9.0;
        self.draw_text(&header.0, x0 + CELL_PAD, header_baseline, Font::Bold, 12.0, WHITE_SMOKE);
        self.draw_text(&header.1, x1 + CELL_PAD, header_baseline, Font::Bold, 12.0, WHITE_SMOKE);

        let mut row_top = top - TABLE_HEADER_HEIGHT;
        for (key, value) in rows {
            self.rect_fill(x0, row_top - TABLE_ROW_HEIGHT, width, TABLE_ROW_HEIGHT, body_fill);
            let baseline = row_top - TABLE_ROW_HEIGHT + 7.0;
            self.draw_text(key, x0 + CELL_PAD, baseline, Font::Regular, BODY_SIZE, BLACK);
            self.draw_text(value, x1 + CELL_PAD, baseline, Font::Regular, BODY_SIZE, BLACK);
            row_top -= TABLE_ROW_HEIGHT;
        }

        // Grid on top of the fills.
        let bottom = top - total_height;
        self.ops.push_str("0 0 0 RG\n1 w\n");
        self.stroke_line(x0, top, x0 + width, top);
        self.stroke_line(x0, top - TABLE_HEADER_HEIGHT, x0 + width, top - TABLE_HEADER_HEIGHT);
        let mut y = top - TABLE_HEADER_HEIGHT;
        for _ in rows {
            y -= TABLE_ROW_HEIGHT;
            self.stroke_line(x0, y, x0 + width, y);
        }
        self.stroke_line(x0, top, x0, bottom);
        self.stroke_line(x1, top, x1, bottom);
        self.stroke_line(x0 + width, top, x0 + width, bottom);

        self.y = bottom;
    }

    fn finish(mut self) -> Vec<String> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.finish_page();
        }
        self.pages
    }
}

/// Serializes finished content streams into a complete PDF file.
fn assemble(pages: &[String]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(8192);
    out.extend_from_slice(b"%PDF-1.4\n");
    out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    let first_page_obj = 5;
    let object_count = 4 + 2 * pages.len();
    let mut offsets: Vec<usize> = Vec::with_capacity(object_count);

    fn push_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, body: String) {
        offsets.push(out.len());
        out.extend_from_slice(body.as_bytes());
    }

    push_object(
        &mut out,
        &mut offsets,
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
    );

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_obj + 2 * i))
        .collect();
    push_object(
        &mut out,
        &mut offsets,
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            pages.len()
        ),
    );

    push_object(
        &mut out,
        &mut offsets,
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n"
            .to_string(),
    );
    push_object(
        &mut out,
        &mut offsets,
        "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n"
            .to_string(),
    );

    for (i, ops) in pages.iter().enumerate() {
        let page_id = first_page_obj + 2 * i;
        let content_id = page_id + 1;
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                page_id,
                num(PAGE_WIDTH),
                num(PAGE_HEIGHT),
                content_id
            ),
        );
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "{} 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj\n",
                content_id,
                ops.len(),
                ops
            ),
        );
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            object_count + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for PdfRenderer {
    fn media_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, doc: &ReportDocument) -> Result<Vec<u8>> {
        let mut layout = PageLayout::new();
        for block in &doc.blocks {
            match block {
                Block::Title(text) => layout.title(text),
                Block::Paragraph { text, style } => layout.paragraph(text, *style),
                Block::KeyValueTable { header, rows, accent } => {
                    layout.table(header, rows, *accent)
                }
                Block::BulletList(items) => layout.bullet_list(items),
                Block::Spacer { points } => layout.space(*points),
            }
        }
        Ok(assemble(&layout.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::EmissionModel;
    use crate::input::UsageInput;
    use crate::report::build_report;
    use chrono::{TimeZone, Utc};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|window| *window == needle)
            .count()
    }

    fn sample_pdf() -> Vec<u8> {
        let model = EmissionModel::default();
        let input = UsageInput::parse(Some("Household"), Some("300")).unwrap();
        let result = model.footprint(input.monthly_usage_kwh);
        let generated_at = Utc.with_ymd_and_hms(2025, 3, 9, 18, 30, 0).unwrap();
        let doc = build_report(&model, &input, &result, generated_at);
        PdfRenderer::new().render(&doc).unwrap()
    }

    #[test]
    fn test_winansi_substitutions() {
        assert_eq!(winansi("CO₂"), vec![b'C', b'O', b'2']);
        assert_eq!(winansi("24°C"), vec![b'2', b'4', 0xB0, b'C']);
        assert_eq!(winansi("12 × 0.82"), vec![b'1', b'2', b' ', 0xD7, b' ', b'0', b'.', b'8', b'2']);
        assert_eq!(winansi("日"), vec![b'?']);
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(b"(5-star rated)"), "\\(5-star rated\\)");
        assert_eq!(escape_literal(b"a\\b"), "a\\\\b");
        assert_eq!(escape_literal(&[0xD7]), "\\327");
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Switch to LED light bulbs to reduce electricity consumption";
        let lines = wrap(text, Font::Regular, BODY_SIZE, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, BODY_SIZE) <= 120.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_short_text_on_one_line() {
        let lines = wrap("Input Details", Font::Bold, HEADING_SIZE, CONTENT_WIDTH);
        assert_eq!(lines, vec!["Input Details".to_string()]);
    }

    #[test]
    fn test_renders_well_formed_pdf() {
        let pdf = sample_pdf();
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert_eq!(count(&pdf, b"BT\n"), count(&pdf, b"ET\n"));
        assert!(contains(&pdf, b"/Encoding /WinAnsiEncoding"));
        assert!(contains(&pdf, b"startxref"));

        // One page object and one content stream per page.
        let pages = count(&pdf, b"/Type /Page /Parent");
        assert!(pages >= 1);
        assert_eq!(count(&pdf, b"\nstream\n"), pages);
        assert!(contains(&pdf, format!("/Count {}", pages).as_bytes()));
    }

    #[test]
    fn test_report_text_lands_in_content_streams() {
        let pdf = sample_pdf();
        assert!(contains(&pdf, b"(Electricity Carbon Footprint Report) Tj"));
        assert!(contains(&pdf, b"(Input Details) Tj"));
        assert!(contains(&pdf, b"2952.00 kg"));
        assert!(contains(&pdf, b"6,790 miles"));
        // Parentheses in recommendation text are escaped.
        assert!(contains(&pdf, b"\\(5-star rated\\)"));
    }

    #[test]
    fn test_breaks_long_documents_into_pages() {
        let items: Vec<String> = (0..80).map(|i| format!("Recommendation number {}", i)).collect();
        let doc = ReportDocument {
            blocks: vec![
                Block::Title("Long".to_string()),
                Block::BulletList(items),
            ],
        };
        let pdf = PdfRenderer::new().render(&doc).unwrap();
        let pages = count(&pdf, b"/Type /Page /Parent");
        assert!(pages >= 2, "expected pagination, got {} page(s)", pages);
        assert!(contains(&pdf, format!("/Count {}", pages).as_bytes()));
    }

    #[test]
    fn test_empty_document_still_yields_one_page() {
        let doc = ReportDocument::default();
        let pdf = PdfRenderer::new().render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert_eq!(count(&pdf, b"/Type /Page /Parent"), 1);
    }
}
