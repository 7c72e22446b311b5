//! A4 PDF export of a rendered CV.
//!
//! The tree is flattened into styled lines, word-wrapped with approximate
//! Helvetica widths and laid out top to bottom, opening a new page whenever
//! the next line would cross the bottom margin. Columns are emitted in order
//! (sidebar first for the two-column layout).

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};
use thiserror::Error;

use crate::document::transfer::file_stem;
use crate::render::style::hex_to_rgb;
use crate::render::tree::{Block, EntryItem, Item, RenderedCv};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.35;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF generation failed: {0}")]
    Generate(String),
}

/// `<Name>_CV.pdf`
pub fn pdf_file_name(name: &str) -> String {
    format!("{}_CV.pdf", file_stem(name))
}

// ────────────────────────────────────────────────────────────────────────────
// Line model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Accent,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    /// Right-aligned text on the same baseline (entry dates).
    right: Option<String>,
    size: f32,
    bold: bool,
    tone: Tone,
    indent_mm: f32,
    gap_before_mm: f32,
}

impl Line {
    fn new(text: impl Into<String>, size: f32) -> Self {
        Line {
            text: text.into(),
            right: None,
            size,
            bold: false,
            tone: Tone::Text,
            indent_mm: 0.0,
            gap_before_mm: 0.0,
        }
    }

    fn height_mm(&self) -> f32 {
        self.gap_before_mm + self.size * PT_TO_MM * LINE_SPACING
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Placed {
    line: Line,
    /// Baseline measured from the bottom of the page, as printpdf expects.
    y_mm: f32,
}

/// Approximate Helvetica advance width in em.
fn char_width_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' | '!' | '.' | ',' | ':' | ';' => 0.25,
        ' ' | 'f' | 't' | 'I' | '(' | ')' | '[' | ']' | '/' | '-' => 0.3,
        'r' => 0.35,
        'm' | 'M' | 'W' => 0.85,
        'w' => 0.75,
        '0'..='9' => 0.56,
        c if c.is_uppercase() => 0.68,
        _ => 0.52,
    }
}

fn text_width_mm(text: &str, size: f32, bold: bool) -> f32 {
    let em: f32 = text.chars().map(char_width_em).sum();
    let weight = if bold { 1.06 } else { 1.0 };
    em * size * PT_TO_MM * weight
}

/// Greedy word wrap. Always returns at least one line for non-blank input; a
/// single word wider than the line is kept whole.
fn wrap(text: &str, size: f32, bold: bool, width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width_mm(&candidate, size, bold) > width_mm {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Characters WinAnsi (CP1252) adds on top of Latin-1 in its 0x80-0x9F block.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Built-in PDF fonts only cover WinAnsi. The dashes and bullets the layouts
/// use become ASCII; other WinAnsi characters pass through and anything else
/// becomes `?`.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '–' | '—' | '•' | '·' => '-',
            '‘' | '’' => '\'',
            '“' | '”' => '"',
            c if c.is_ascii() => c,
            '\u{a0}'..='\u{ff}' => c,
            c if WIN_ANSI_EXTRAS.contains(c) => c,
            _ => '?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Flattening
// ────────────────────────────────────────────────────────────────────────────

fn push_wrapped(lines: &mut Vec<Line>, text: &str, template: Line) {
    let width = TEXT_WIDTH_MM - template.indent_mm;
    for (i, paragraph) in text.lines().filter(|p| !p.trim().is_empty()).enumerate() {
        for (j, chunk) in wrap(&sanitize(paragraph), template.size, template.bold, width)
            .into_iter()
            .enumerate()
        {
            let gap = if i == 0 && j == 0 { template.gap_before_mm } else { 0.0 };
            lines.push(Line {
                text: chunk,
                gap_before_mm: gap,
                ..template.clone()
            });
        }
    }
}

fn entry_lines(lines: &mut Vec<Line>, entry: &EntryItem) {
    let dates = entry.dates.as_ref().map(|d| sanitize(&d.display()));
    let dates_width = dates
        .as_deref()
        .map(|d| text_width_mm(d, 9.5, false) + 4.0)
        .unwrap_or(0.0);
    let title = wrap(&sanitize(&entry.title), 11.0, true, TEXT_WIDTH_MM - dates_width);
    if title.is_empty() {
        if let Some(dates) = dates {
            lines.push(Line {
                right: Some(dates),
                gap_before_mm: 2.5,
                ..Line::new("", 11.0)
            });
        }
    } else {
        for (i, chunk) in title.into_iter().enumerate() {
            lines.push(Line {
                right: if i == 0 { dates.clone() } else { None },
                bold: true,
                gap_before_mm: if i == 0 { 2.5 } else { 0.0 },
                ..Line::new(chunk, 11.0)
            });
        }
    }
    if let Some(subtitle) = &entry.subtitle {
        push_wrapped(lines, subtitle, Line::new("", 10.0));
    }
    for detail in &entry.details {
        push_wrapped(lines, detail, Line::new("", 9.5));
    }
    if let Some(body) = &entry.body {
        push_wrapped(
            lines,
            body,
            Line {
                indent_mm: 3.0,
                gap_before_mm: 0.8,
                ..Line::new("", 10.0)
            },
        );
    }
}

fn flatten(cv: &RenderedCv) -> Vec<Line> {
    let mut lines = Vec::new();
    for block in cv.columns.iter().flat_map(|column| &column.blocks) {
        match block {
            Block::Title { text } => push_wrapped(
                &mut lines,
                text,
                Line {
                    bold: true,
                    tone: Tone::Accent,
                    ..Line::new("", 22.0)
                },
            ),
            Block::Contact {
                heading,
                items,
                separator,
            } => {
                if let Some(heading) = heading {
                    push_wrapped(&mut lines, heading, section_heading());
                }
                let joined = match separator {
                    Some(sep) => items.join(&format!(" {sep} ")),
                    None => items.join("   "),
                };
                push_wrapped(
                    &mut lines,
                    &joined,
                    Line {
                        gap_before_mm: 1.5,
                        ..Line::new("", 10.0)
                    },
                );
            }
            Block::Section(section) => {
                if let Some(heading) = &section.heading {
                    push_wrapped(&mut lines, heading, section_heading());
                }
                for item in &section.items {
                    match item {
                        Item::Paragraph { text } => push_wrapped(
                            &mut lines,
                            text,
                            Line {
                                gap_before_mm: 1.5,
                                ..Line::new("", 10.0)
                            },
                        ),
                        Item::Entry(entry) => entry_lines(&mut lines, entry),
                        Item::Tags { tags } => {
                            let joined = tags
                                .iter()
                                .map(|tag| match &tag.level {
                                    Some(level) => format!("{} ({level})", tag.label),
                                    None => tag.label.clone(),
                                })
                                .collect::<Vec<_>>()
                                .join(", ");
                            push_wrapped(
                                &mut lines,
                                &joined,
                                Line {
                                    gap_before_mm: 1.5,
                                    ..Line::new("", 10.0)
                                },
                            );
                        }
                    }
                }
            }
        }
    }
    lines
}

fn section_heading() -> Line {
    Line {
        bold: true,
        tone: Tone::Accent,
        gap_before_mm: 5.0,
        ..Line::new("", 13.0)
    }
}

/// Assigns baselines, breaking to a new page at the bottom margin. A gap at
/// the top of a fresh page is dropped.
fn paginate(lines: Vec<Line>) -> Vec<Vec<Placed>> {
    let mut pages: Vec<Vec<Placed>> = vec![Vec::new()];
    let mut cursor = PAGE_HEIGHT_MM - MARGIN_MM;
    for mut line in lines {
        if cursor - line.height_mm() < MARGIN_MM && !pages.last().map_or(true, Vec::is_empty) {
            pages.push(Vec::new());
            cursor = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        if pages.last().map_or(false, Vec::is_empty) {
            line.gap_before_mm = 0.0;
        }
        cursor -= line.height_mm();
        if let Some(page) = pages.last_mut() {
            page.push(Placed { line, y_mm: cursor });
        }
    }
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

fn rgb(hex: &str) -> Color {
    let (r, g, b) = hex_to_rgb(hex).unwrap_or((0.0, 0.0, 0.0));
    Color::Rgb(Rgb::new(r, g, b, None))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw(layer: &PdfLayerReference, placed: &[Placed], fonts: &Fonts, accent: &Color, text: &Color) {
    for Placed { line, y_mm } in placed {
        let font = if line.bold { &fonts.bold } else { &fonts.regular };
        let color = match line.tone {
            Tone::Accent => accent.clone(),
            Tone::Text => text.clone(),
        };
        layer.set_fill_color(color);
        if !line.text.is_empty() {
            layer.use_text(
                line.text.as_str(),
                line.size,
                Mm(MARGIN_MM + line.indent_mm),
                Mm(*y_mm),
                font,
            );
        }
        if let Some(right) = &line.right {
            let x = PAGE_WIDTH_MM - MARGIN_MM - text_width_mm(right, 9.5, false);
            layer.set_fill_color(text.clone());
            layer.use_text(right.as_str(), 9.5, Mm(x), Mm(*y_mm), &fonts.regular);
        }
    }
}

/// Renders the tree to PDF bytes. CPU-bound; call from `spawn_blocking`.
pub fn render_pdf(cv: &RenderedCv, title: &str) -> Result<Vec<u8>, PdfError> {
    let pages = paginate(flatten(cv));
    let (doc, first_page, first_layer) = PdfDocument::new(
        sanitize(title),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfError::Generate(format!("{e:?}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfError::Generate(format!("{e:?}")))?,
    };
    let accent = rgb(&cv.style.accent_color);
    let text = rgb(&cv.style.text_color);

    for (index, placed) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };
        draw(&layer, placed, &fonts, &accent, &text);
    }

    doc.save_to_bytes()
        .map_err(|e| PdfError::Generate(format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;
    use crate::models::document::{CvDocument, ExperienceEntry};
    use crate::render::layout::LayoutName;
    use crate::render::style::StyleOverrides;
    use crate::render::tree::render;

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("Alex  Johnson"), "Alex_Johnson_CV.pdf");
        assert_eq!(pdf_file_name("   "), "CV_CV.pdf");
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "word ".repeat(200);
        let lines = wrap(&text, 10.0, false, TEXT_WIDTH_MM);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0, false) <= TEXT_WIDTH_MM);
        }
        assert_eq!(lines.join(" ").split_whitespace().count(), 200);
    }

    #[test]
    fn test_wrap_keeps_overlong_word() {
        let word = "x".repeat(500);
        assert_eq!(wrap(&word, 10.0, false, 50.0), vec![word]);
        assert!(wrap("   ", 10.0, false, 50.0).is_empty());
    }

    #[test]
    fn test_sanitize_maps_layout_punctuation() {
        assert_eq!(sanitize("Jan 2022 – Present • Go"), "Jan 2022 - Present - Go");
        assert_eq!(sanitize("José"), "José");
        assert_eq!(sanitize("Zoë Müller"), "Zoë Müller");
        assert_eq!(sanitize("Œuvre €5"), "Œuvre €5");
        assert_eq!(sanitize("王芳 Ł"), "?? ?");
    }

    #[test]
    fn test_latin1_name_survives_into_title_line() {
        let mut doc = CvDocument::default();
        doc.personal_info.name = "Zoë Müller".to_string();
        let cv = render(&doc, LayoutName::Modern, &StyleOverrides::default());
        assert!(flatten(&cv).iter().any(|l| l.text == "Zoë Müller"));
    }

    #[test]
    fn test_current_role_line_carries_present() {
        let cv = render(&sample_document(), LayoutName::Modern, &StyleOverrides::default());
        let lines = flatten(&cv);
        assert!(lines
            .iter()
            .any(|l| l.right.as_deref() == Some("Jan 2022 - Present")));
    }

    #[test]
    fn test_long_document_spans_pages() {
        let mut doc = CvDocument::default();
        doc.personal_info.name = "Ana Lee".to_string();
        for i in 0..60 {
            doc.experience.push(ExperienceEntry {
                job_title: format!("Role {i}"),
                company: "Acme".to_string(),
                description: "Shipped features. ".repeat(12),
                ..Default::default()
            });
        }
        let cv = render(&doc, LayoutName::Classic, &StyleOverrides::default());
        let pages = paginate(flatten(&cv));
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.is_empty());
            for placed in page {
                assert!(placed.y_mm >= MARGIN_MM - 0.01);
                assert!(placed.y_mm <= PAGE_HEIGHT_MM - MARGIN_MM);
            }
        }
    }

    #[test]
    fn test_render_pdf_produces_document() {
        for layout in LayoutName::ALL {
            let cv = render(&sample_document(), layout, &StyleOverrides::default());
            let bytes = render_pdf(&cv, "Alex Johnson CV").unwrap();
            assert!(bytes.starts_with(b"%PDF"));
        }
    }

    #[test]
    fn test_empty_document_still_renders() {
        let cv = render(&CvDocument::default(), LayoutName::Minimal, &StyleOverrides::default());
        let bytes = render_pdf(&cv, "CV").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
