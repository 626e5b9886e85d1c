//! Margin overlay rendering
//!
//! Each tile with a non-zero margin gets a transparent overlay page carrying
//! two dashed cut guides (left and bottom) and a `Grid (column,row)` label
//! placed in the margin strip. Top and right guides are never drawn: the
//! neighbouring tile's margin already covers those edges.

use crate::constants::*;
use crate::render::{finish_document, new_document, rect_to_object};
use crate::types::{Rect, Result};
use lopdf::{Dictionary, Document, Object, Stream};

/// Font resource name used by the label
const LABEL_FONT_NAME: &str = "F1";

/// Render the margin overlay for one tile as a standalone one-page document.
///
/// The overlay page spans `page_width` × `page_height` from `page_ll`, which
/// is the tile's margin-expanded lower-left corner; `page_ur` bounds the
/// guide lines.
pub fn render_overlay(
    page_width: f64,
    page_height: f64,
    page_ll: (f64, f64),
    page_ur: (f64, f64),
    margin: f64,
    column: usize,
    row: usize,
) -> Result<Document> {
    let (mut doc, pages_tree_id) = new_document();

    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(OVERLAY_FONT.as_bytes().to_vec()));
    let font_id = doc.add_object(font_dict);

    let mut fonts = Dictionary::new();
    fonts.set(LABEL_FONT_NAME, Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let content = overlay_content(page_ll, page_ur, margin, column, row);
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let media_box = Rect::new(page_ll.0, page_ll.1, page_width, page_height);
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_tree_id)),
        ("MediaBox", rect_to_object(&media_box)),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Dictionary(resources)),
    ]));

    finish_document(&mut doc, pages_tree_id, vec![Object::Reference(page_id)]);
    Ok(doc)
}

/// Label text for a tile
pub fn grid_label(column: usize, row: usize) -> String {
    format!("Grid ({},{})", column, row)
}

/// Content stream operations for the guides and label
fn overlay_content(
    page_ll: (f64, f64),
    page_ur: (f64, f64),
    margin: f64,
    column: usize,
    row: usize,
) -> String {
    let (llx, lly) = page_ll;
    let (urx, ury) = page_ur;
    let gray = OVERLAY_GRAY;

    let mut ops = String::new();
    ops.push_str("q\n");

    // Label
    ops.push_str(&format!("{} {} {} rg\n", gray, gray, gray));
    ops.push_str(&format!(
        "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
        LABEL_FONT_NAME,
        OVERLAY_FONT_SIZE,
        llx + margin + OVERLAY_LABEL_X_OFFSET,
        lly + margin / 3.0,
        escape_pdf_string(&grid_label(column, row))
    ));

    // Guides
    ops.push_str(&format!("[{} {}] 0 d\n", OVERLAY_DASH_ON, OVERLAY_DASH_OFF));
    ops.push_str(&format!("{} w\n", OVERLAY_LINE_WIDTH));
    ops.push_str(&format!("{} {} {} RG\n", gray, gray, gray));
    ops.push_str(&format!(
        "{} {} m {} {} l S\n",
        llx,
        lly + margin,
        urx,
        lly + margin
    ));
    ops.push_str(&format!(
        "{} {} m {} {} l S\n",
        llx + margin,
        lly,
        llx + margin,
        ury
    ));

    ops.push_str("Q\n");
    ops
}

/// Escape a string for use inside a PDF literal string `( ... )`
fn escape_pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{first_page_id, page_media_box};

    fn content_of(doc: &Document) -> String {
        let page_id = first_page_id(doc).unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
        let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
        String::from_utf8(stream.content.clone()).unwrap()
    }

    #[test]
    fn test_overlay_is_single_page_with_media_box() {
        let doc = render_overlay(624.75, 871.75, (-29.75, -29.75), (595.0, 842.0), 29.75, 1, 1)
            .unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let page_id = first_page_id(&doc).unwrap();
        let media_box = page_media_box(&doc, page_id).unwrap();
        assert_eq!(media_box.x, -29.75);
        assert_eq!(media_box.y, -29.75);
        assert_eq!(media_box.right(), 595.0);
        assert_eq!(media_box.top(), 842.0);
    }

    #[test]
    fn test_overlay_guides() {
        let doc = render_overlay(130.0, 130.0, (-30.0, -30.0), (100.0, 100.0), 30.0, 1, 1)
            .unwrap();
        let content = content_of(&doc);

        // Bottom guide at y = lly + margin across the page
        assert!(content.contains("-30 0 m 100 0 l S"));
        // Left guide at x = llx + margin up the page
        assert!(content.contains("0 -30 m 0 100 l S"));
        assert!(content.contains("[5 7] 0 d"));
        assert!(content.contains("0.25 w"));
        assert!(content.contains("0.68 0.68 0.68 RG"));
        // Exactly two guides
        assert_eq!(content.matches(" l S").count(), 2);
    }

    #[test]
    fn test_overlay_label() {
        let doc = render_overlay(130.0, 130.0, (-30.0, -30.0), (100.0, 100.0), 30.0, 2, 3)
            .unwrap();
        let content = content_of(&doc);

        assert!(content.contains("(Grid \\(2,3\\)) Tj"));
        assert!(content.contains("BT /F1 15 Tf 10 -20 Td"));
        assert!(content.contains("0.68 0.68 0.68 rg"));
    }

    #[test]
    fn test_grid_label() {
        assert_eq!(grid_label(1, 2), "Grid (1,2)");
    }
}
