//! PDF writer on top of `lopdf`.
//!
//! A4 pages, one-inch margins, Helvetica 10pt on 12pt leading. Lines are
//! word-wrapped to the text width using the standard Helvetica metrics.
//! Runs of mask blocks are drawn as filled rectangles so they stay opaque in
//! any viewer, independent of font coverage.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::Result;
use crate::ir::RedactedDocument;

const PAGE_WIDTH: f64 = 595.2756;
const PAGE_HEIGHT: f64 = 841.8898;
const MARGIN: f64 = 72.0;
const FONT_SIZE: f64 = 10.0;
const LEADING: f64 = 12.0;
const BLOCK: char = '\u{2588}';
/// Advance of one mask block, in font units.
const BLOCK_WIDTH: u32 = 600;
/// Advance used for characters outside the ASCII metrics table.
const FALLBACK_WIDTH: u32 = 556;

/// Helvetica advance widths for ' '..='~', in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u32; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

fn char_units(c: char) -> u32 {
    match c {
        BLOCK => BLOCK_WIDTH,
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 0x20],
        _ => FALLBACK_WIDTH,
    }
}

fn text_width(text: &str) -> f64 {
    let units: u32 = text.chars().map(char_units).sum();
    f64::from(units) * FONT_SIZE / 1000.0
}

fn text_area_width() -> f64 {
    PAGE_WIDTH - 2.0 * MARGIN
}

/// Number of text rows that fit between the top and bottom margins.
pub fn rows_per_page() -> usize {
    let first_baseline = PAGE_HEIGHT - MARGIN - FONT_SIZE;
    ((first_baseline - MARGIN) / LEADING).floor() as usize + 1
}

/// Greedy word wrap with whitespace runs collapsed to one space. Words wider
/// than the line are split by character. A blank paragraph yields one blank
/// row.
pub fn wrap_paragraph(paragraph: &str, max_width: f64) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if text_width(&current) > max_width && current.chars().count() > 1 {
                current.pop();
                rows.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    rows.push(current);
    rows
}

/// Break the document body into pages of wrapped rows.
pub fn paginate(doc: &RedactedDocument) -> Vec<Vec<String>> {
    let width = text_area_width();
    let rows: Vec<String> = doc
        .paragraphs
        .iter()
        .flat_map(|p| wrap_paragraph(p, width))
        .collect();

    if rows.is_empty() {
        return vec![Vec::new()];
    }
    rows.chunks(rows_per_page()).map(<[String]>::to_vec).collect()
}

/// Serialize the document as PDF bytes.
pub fn write_pdf(doc: &RedactedDocument) -> Result<Vec<u8>> {
    let pages = paginate(doc);
    let mut pdf = Document::with_version("1.5");

    let pages_id = pdf.new_object_id();
    let font_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for rows in &pages {
        let content = Content {
            operations: page_operations(rows),
        };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                real(0.0),
                real(0.0),
                real(PAGE_WIDTH),
                real(PAGE_HEIGHT),
            ],
        }),
    );
    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    pdf.save_to(&mut out)?;
    Ok(out)
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn page_operations(rows: &[String]) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN - FONT_SIZE;
    for row in rows {
        draw_row(&mut ops, row, MARGIN, y);
        y -= LEADING;
    }
    ops
}

/// Split a row into text and mask runs. Text is shown with `Tj`, mask runs
/// become `re f` rectangles of the same advance.
fn draw_row(ops: &mut Vec<Operation>, row: &str, mut x: f64, y: f64) {
    let mut run = String::new();
    let mut run_is_block = false;

    let mut flush = |run: &mut String, is_block: bool, x: &mut f64| {
        if run.is_empty() {
            return;
        }
        let width = text_width(run);
        if is_block {
            ops.push(Operation::new(
                "re",
                vec![real(*x), real(y - 2.0), real(width), real(FONT_SIZE)],
            ));
            ops.push(Operation::new("f", vec![]));
        } else {
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("Tf", vec!["F1".into(), real(FONT_SIZE)]));
            ops.push(Operation::new("Td", vec![real(*x), real(y)]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(run))],
            ));
            ops.push(Operation::new("ET", vec![]));
        }
        *x += width;
        run.clear();
    };

    for c in row.chars() {
        let is_block = c == BLOCK;
        if is_block != run_is_block {
            flush(&mut run, run_is_block, &mut x);
            run_is_block = is_block;
        }
        run.push(c);
    }
    flush(&mut run, run_is_block, &mut x);
}

/// WinAnsi bytes for a text run. Characters outside Latin-1 become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
