//! Diary report rendering (PDF export).
//!
//! Produces a plain, text-only PDF 1.4 document using the standard
//! Helvetica fonts with `WinAnsiEncoding`, so Portuguese accents render
//! without embedding a font. Layout is a single column on A4 pages with
//! greedy word wrapping.

use std::fmt::Write as _;

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// A4 width in PDF points.
const PAGE_WIDTH: f32 = 595.0;

/// A4 height in PDF points.
const PAGE_HEIGHT: f32 = 842.0;

/// Margin on every side, in points.
const MARGIN: f32 = 56.0;

/// Characters per body line. Helvetica averages roughly half an em per
/// glyph, so this fits the text column at 11pt.
const BODY_WRAP: usize = 88;

/// Characters per heading line at 13pt.
const HEADING_WRAP: usize = 70;

/// Prefix of the downloaded file name.
pub const REPORT_FILENAME_PREFIX: &str = "diario-entrepaginas";

// ---------------------------------------------------------------------------
// Report inputs
// ---------------------------------------------------------------------------

/// Filters applied to a report, used for the summary line under the title.
#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub mood: Option<String>,
    pub favorites_only: bool,
}

impl ReportFilters {
    /// Human-readable summary of the active filters (pt-BR).
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => parts.push(format!(
                "Período: {} a {}",
                start.format("%d/%m/%Y"),
                end.format("%d/%m/%Y")
            )),
            (Some(start), None) => parts.push(format!("A partir de: {}", start.format("%d/%m/%Y"))),
            (None, Some(end)) => parts.push(format!("Até: {}", end.format("%d/%m/%Y"))),
            (None, None) => {}
        }

        if let Some(mood) = &self.mood {
            parts.push(format!("Humor: {mood}"));
        }

        if self.favorites_only {
            parts.push("Apenas favoritos".to_string());
        }

        if parts.is_empty() {
            "Todas as entradas".to_string()
        } else {
            parts.join(" • ")
        }
    }
}

/// The subset of an entry printed in the report.
#[derive(Debug, Clone, Copy)]
pub struct ReportEntry<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub mood: Option<&'a str>,
    pub entry_date: Timestamp,
    pub is_favorite: bool,
    pub tags: &'a [String],
}

/// Download file name for a report generated on `date`.
pub fn report_filename(date: NaiveDate) -> String {
    format!("{REPORT_FILENAME_PREFIX}-{}.pdf", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone)]
struct Line {
    font: Font,
    size: f32,
    /// Vertical space consumed above the baseline.
    advance: f32,
    text: String,
}

impl Line {
    fn new(font: Font, size: f32, advance: f32, text: impl Into<String>) -> Self {
        Self {
            font,
            size,
            advance,
            text: text.into(),
        }
    }

    fn spacer(advance: f32) -> Self {
        Self::new(Font::Regular, 11.0, advance, String::new())
    }
}

/// Greedy word wrap on character counts. Words longer than `width` are
/// hard-split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        // Blank paragraphs keep their vertical space.
        lines.push(current);
    }

    lines
}

fn layout(entries: &[ReportEntry<'_>], filters: &ReportFilters, generated_at: Timestamp) -> Vec<Line> {
    let mut lines = vec![
        Line::new(Font::Bold, 20.0, 24.0, "Entre Páginas"),
        Line::new(Font::Regular, 11.0, 18.0, filters.summary()),
        Line::new(
            Font::Regular,
            9.0,
            14.0,
            format!(
                "Gerado em {} • {} entradas",
                generated_at.format("%d/%m/%Y %H:%M UTC"),
                entries.len()
            ),
        ),
        Line::spacer(12.0),
    ];

    for entry in entries {
        for (i, heading) in wrap(entry.title, HEADING_WRAP).into_iter().enumerate() {
            let advance = if i == 0 { 22.0 } else { 16.0 };
            lines.push(Line::new(Font::Bold, 13.0, advance, heading));
        }

        let mut meta = entry.entry_date.format("%d/%m/%Y %H:%M").to_string();
        if let Some(mood) = entry.mood {
            let _ = write!(meta, " • Humor: {mood}");
        }
        if entry.is_favorite {
            meta.push_str(" • Favorito");
        }
        lines.push(Line::new(Font::Regular, 9.0, 14.0, meta));

        if !entry.tags.is_empty() {
            lines.push(Line::new(
                Font::Regular,
                9.0,
                12.0,
                format!("Tags: {}", entry.tags.join(", ")),
            ));
        }

        lines.push(Line::spacer(4.0));
        for body in wrap(entry.content, BODY_WRAP) {
            lines.push(Line::new(Font::Regular, 11.0, 15.0, body));
        }
        lines.push(Line::spacer(10.0));
    }

    lines
}

/// Split laid-out lines into pages, returning `(y, line)` placements.
fn paginate(lines: Vec<Line>) -> Vec<Vec<(f32, Line)>> {
    let mut pages = Vec::new();
    let mut page = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        if y - line.advance < MARGIN && y < PAGE_HEIGHT - MARGIN {
            // A page holding only blank lines is dropped rather than emitted.
            if !page.is_empty() {
                pages.push(std::mem::take(&mut page));
            }
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= line.advance;
        if !line.text.is_empty() {
            page.push((y, line));
        }
    }

    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

// ---------------------------------------------------------------------------
// PDF serialization
// ---------------------------------------------------------------------------

/// Map a character to its `WinAnsiEncoding` byte, or `?` if it has none.
fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '\t' => b' ',
        _ => b'?',
    }
}

/// Encode text as `WinAnsiEncoding` bytes for a `Tj` operand.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn content_stream(placements: &[(f32, Line)]) -> Content {
    let operations = placements
        .iter()
        .flat_map(|(y, line)| {
            [
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![line.font.resource().into(), line.size.into()]),
                Operation::new("Td", vec![MARGIN.into(), (*y).into()]),
                Operation::new("Tj", vec![Object::string_literal(win_ansi_bytes(&line.text))]),
                Operation::new("ET", vec![]),
            ]
        })
        .collect();
    Content { operations }
}

fn font(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn pdf_error(err: impl std::fmt::Display) -> CoreError {
    CoreError::Internal(format!("PDF encoding failed: {err}"))
}

/// Render `entries` as an uncompressed PDF 1.4 document.
pub fn render_pdf(
    entries: &[ReportEntry<'_>],
    filters: &ReportFilters,
    generated_at: Timestamp,
) -> Result<Vec<u8>, CoreError> {
    let pages = paginate(layout(entries, filters, generated_at));

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font("Helvetica"));
    let bold_id = doc.add_object(font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for placements in &pages {
        let content = content_stream(placements).encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut pdf = Vec::new();
    doc.save_to(&mut pdf).map_err(pdf_error)?;
    Ok(pdf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn ts() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 12, 15, 10, 30, 0).unwrap()
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    /// Every `Tj` operand in page order, as raw WinAnsi bytes.
    fn shown_text(pdf: &[u8]) -> Vec<Vec<u8>> {
        let doc = Document::load_mem(pdf).unwrap();
        let mut shown = Vec::new();
        for page_id in doc.get_pages().into_values() {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            for op in content.operations.into_iter().filter(|op| op.operator == "Tj") {
                if let Some(Object::String(bytes, _)) = op.operands.into_iter().next() {
                    shown.push(bytes);
                }
            }
        }
        shown
    }

    #[test]
    fn filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        assert_eq!(report_filename(date), "diario-entrepaginas-2024-12-05.pdf");
    }

    #[test]
    fn summary_without_filters() {
        assert_eq!(ReportFilters::default().summary(), "Todas as entradas");
    }

    #[test]
    fn summary_lists_active_filters() {
        let filters = ReportFilters {
            start_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 15),
            mood: Some("feliz".into()),
            favorites_only: true,
        };
        assert_eq!(
            filters.summary(),
            "Período: 01/12/2024 a 15/12/2024 • Humor: feliz • Apenas favoritos"
        );
    }

    #[test]
    fn summary_with_open_ended_range() {
        let filters = ReportFilters {
            end_date: NaiveDate::from_ymd_opt(2024, 12, 15),
            ..Default::default()
        };
        assert_eq!(filters.summary(), "Até: 15/12/2024");
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("um dois três quatro cinco", 10);
        assert_eq!(lines, vec!["um dois", "três", "quatro", "cinco"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_hard_splits_long_words() {
        let lines = wrap("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn wrap_keeps_blank_paragraphs() {
        let lines = wrap("primeiro\n\nsegundo", 20);
        assert_eq!(lines, vec!["primeiro", "", "segundo"]);
    }

    #[test]
    fn text_encoding_maps_accents_and_punctuation() {
        assert_eq!(win_ansi_bytes("(é) • ✓"), b"(\xE9) \x95 ?");
    }

    #[test]
    fn rendered_pdf_is_well_formed() {
        let tags = vec!["leitura".to_string()];
        let entries = [ReportEntry {
            title: "Noite de leitura",
            content: "Passei a noite lendo um romance (ótimo).",
            mood: Some("contemplativo"),
            entry_date: ts(),
            is_favorite: true,
            tags: &tags,
        }];

        let pdf = render_pdf(&entries, &ReportFilters::default(), ts()).unwrap();

        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(find(&pdf, b"%%EOF").is_some());

        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let shown = shown_text(&pdf);
        assert_eq!(shown[0], b"Entre P\xE1ginas");
        assert!(shown.contains(&b"Noite de leitura".to_vec()));
        assert!(shown.contains(&b"Tags: leitura".to_vec()));
        assert!(shown.contains(&b"Passei a noite lendo um romance (\xF3timo).".to_vec()));
        assert!(shown
            .iter()
            .any(|line| find(line, b"Humor: contemplativo \x95 Favorito").is_some()));
    }

    #[test]
    fn long_reports_span_multiple_pages() {
        let content = "palavra ".repeat(3000);
        let entries: Vec<ReportEntry<'_>> = (0..5)
            .map(|_| ReportEntry {
                title: "Entrada longa",
                content: &content,
                mood: None,
                entry_date: ts(),
                is_favorite: false,
                tags: &[],
            })
            .collect();

        let pdf = render_pdf(&entries, &ReportFilters::default(), ts()).unwrap();
        let doc = Document::load_mem(&pdf).unwrap();

        assert!(doc.get_pages().len() > 1);
        let headings = shown_text(&pdf)
            .into_iter()
            .filter(|line| line == b"Entrada longa")
            .count();
        assert_eq!(headings, 5);
    }

    #[test]
    fn empty_report_still_has_one_page() {
        let pdf = render_pdf(&[], &ReportFilters::default(), ts()).unwrap();
        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert!(shown_text(&pdf).contains(&b"Todas as entradas".to_vec()));
    }
}
