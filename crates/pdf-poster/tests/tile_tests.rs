use lopdf::{Dictionary, Document, Object, Stream};
use pdf_poster::*;

fn create_test_pdf(width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        b"0 0 1 rg 0 0 100 100 re f".to_vec(),
    ));
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ]),
        ),
        ("Resources", Object::Dictionary(Dictionary::new())),
        ("Contents", Object::Reference(content_id)),
    ]));

    // Create pages dict
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn page_content(doc: &Document, page_number: u32) -> String {
    let page_id = doc.get_pages()[&page_number];
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

fn page_box(doc: &Document, page_number: u32) -> Rect {
    let page_id = doc.get_pages()[&page_number];
    render::page_media_box(doc, page_id).unwrap()
}

/// Swap the first page's content for `encoded` bytes behind `filter`
fn set_filtered_content(doc: &mut Document, filter: &str, encoded: &[u8]) {
    let page_id = doc.get_pages()[&1];
    let content_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Contents")
        .unwrap()
        .as_reference()
        .unwrap();
    let mut dict = Dictionary::new();
    dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
    doc.objects
        .insert(content_id, Object::Stream(Stream::new(dict, encoded.to_vec())));
}

fn poster_xobject_content(doc: &Document) -> Vec<u8> {
    let page_id = doc.get_pages()[&1];
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let poster_id = xobjects.get(b"Poster").unwrap().as_reference().unwrap();
    doc.get_object(poster_id).unwrap().as_stream().unwrap().content.clone()
}

const A4: Dimension = Dimension {
    width: 595.0,
    height: 842.0,
};

#[test]
fn test_tile_two_column_poster() {
    let source = create_test_pdf(1190, 842);
    let input = Dimension::new(1190.0, 842.0);

    let (doc, report) = tile(&source, input, input, A4, 0.0).unwrap();

    assert_eq!(report.columns, 2);
    assert_eq!(report.rows, 1);
    assert_eq!(report.total_pages, 2);
    assert_eq!(report.content_scale, 1.0);
    assert_eq!(doc.get_pages().len(), 2);

    assert_eq!(page_box(&doc, 1), Rect::new(0.0, 0.0, 595.0, 842.0));
    assert_eq!(page_box(&doc, 2), Rect::new(595.0, 0.0, 595.0, 842.0));
}

#[test]
fn test_tile_without_margin_has_no_overlay() {
    let source = create_test_pdf(595, 842);
    let (doc, _) = tile(&source, A4, A4, A4, 0.0).unwrap();

    let content = page_content(&doc, 1);
    assert!(content.contains("/Poster Do"));
    assert!(!content.contains("/Overlay Do"));
}

#[test]
fn test_tile_with_margin_paints_overlay_last() {
    let source = create_test_pdf(595, 842);
    let (doc, report) = tile(&source, A4, A4, A4, 29.75).unwrap();

    assert_eq!(report.page_size, Dimension::new(624.75, 871.75));
    assert_eq!(page_box(&doc, 1), Rect::new(-29.75, -29.75, 624.75, 871.75));

    let content = page_content(&doc, 1);
    let poster_at = content.find("/Poster Do").unwrap();
    let overlay_at = content.find("/Overlay Do").unwrap();
    assert!(poster_at < overlay_at);
}

#[test]
fn test_tile_columns_outer_rows_inner() {
    let source = create_test_pdf(595, 842);
    let input = Dimension::new(595.0, 842.0);
    let poster = Dimension::new(1190.0, 1684.0);

    let mut visited = Vec::new();
    let (doc, report) = tile_with_progress(&source, input, poster, A4, 10.0, |cell| {
        visited.push((cell.page_number, cell.column, cell.row));
    })
    .unwrap();

    assert_eq!(report.content_scale, 2.0);
    assert_eq!(
        visited,
        vec![(1, 1, 1), (2, 1, 2), (3, 2, 1), (4, 2, 2)]
    );
    assert_eq!(doc.get_pages().len(), 4);

    // Page 2 is column 1, row 2: one cell up
    assert_eq!(page_box(&doc, 2), Rect::new(-10.0, 832.0, 605.0, 852.0));
}

#[test]
fn test_tile_overlay_labels_follow_page_order() {
    let source = create_test_pdf(595, 842);
    let poster = Dimension::new(1190.0, 1684.0);
    let (doc, _) = tile(&source, A4, poster, A4, 29.75).unwrap();

    let mut labels = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let page = doc.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        let overlay_id = xobjects.get(b"Overlay").unwrap().as_reference().unwrap();
        let overlay = doc.get_object(overlay_id).unwrap().as_stream().unwrap();
        let content = String::from_utf8_lossy(&overlay.content).into_owned();
        for label in ["(1,1)", "(1,2)", "(2,1)", "(2,2)"] {
            let escaped = label.replace('(', "\\(").replace(')', "\\)");
            if content.contains(&escaped) {
                labels.push(label);
            }
        }
    }
    assert_eq!(labels, vec!["(1,1)", "(1,2)", "(2,1)", "(2,2)"]);
}

#[test]
fn test_tile_shares_one_poster_xobject() {
    let source = create_test_pdf(595, 842);
    let poster = Dimension::new(1190.0, 842.0);
    let (doc, _) = tile(&source, A4, poster, A4, 0.0).unwrap();

    let mut poster_ids = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let page = doc.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        poster_ids.push(xobjects.get(b"Poster").unwrap().as_reference().unwrap());
    }
    assert_eq!(poster_ids.len(), 2);
    assert_eq!(poster_ids[0], poster_ids[1]);
}

#[test]
fn test_tile_rejects_zero_media() {
    let source = create_test_pdf(595, 842);
    let result = tile(&source, A4, A4, Dimension::new(0.0, 842.0), 0.0);
    assert!(matches!(result, Err(PosterError::InvalidGeometry(_))));
}

#[test]
fn test_tile_empty_document() {
    let mut source = Document::with_version("1.7");
    let pages_id = source.new_object_id();
    source.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![])),
            ("Count", Object::Integer(0)),
        ])),
    );
    let catalog_id = source.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    source.trailer.set("Root", catalog_id);

    let result = tile(&source, A4, A4, A4, 0.0);
    assert!(matches!(result, Err(PosterError::NoPages)));
    assert!(matches!(pdf_dimensions(&source), Err(PosterError::NoPages)));
}

#[test]
fn test_tiled_document_round_trips_through_bytes() {
    let source = create_test_pdf(1190, 842);
    let input = Dimension::new(1190.0, 842.0);
    let (mut doc, _) = tile(&source, input, input, A4, 29.75).unwrap();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    let loaded = Document::load_mem(&bytes).unwrap();

    assert_eq!(loaded.get_pages().len(), 2);
    let (dim, orientation) = pdf_dimensions(&loaded).unwrap();
    assert_eq!(dim, Dimension::new(624.75, 871.75));
    assert_eq!(orientation, Orientation::Portrait);
}

#[test]
fn test_tile_embeds_plain_content_unchanged() {
    let source = create_test_pdf(595, 842);
    let (doc, _) = tile(&source, A4, A4, A4, 0.0).unwrap();
    assert_eq!(poster_xobject_content(&doc), b"0 0 1 rg 0 0 100 100 re f");
}

#[test]
fn test_tile_decodes_filtered_content() {
    let mut source = create_test_pdf(595, 842);
    set_filtered_content(
        &mut source,
        "ASCII85Decode",
        b"0H`%l0d(LL+>=ol+>GQ(+>GQ(+ED$9Ac~>",
    );

    let (doc, _) = tile(&source, A4, A4, A4, 0.0).unwrap();
    assert_eq!(poster_xobject_content(&doc), b"0 0 1 rg 0 0 100 100 re f");
}

#[test]
fn test_tile_rejects_undecodable_content() {
    let mut source = create_test_pdf(595, 842);
    set_filtered_content(&mut source, "RunLengthDecode", b"\x02abc\x80");

    let result = tile(&source, A4, A4, A4, 0.0);
    assert!(matches!(result, Err(PosterError::Pdf(_))));
}
