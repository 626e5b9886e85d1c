//! Output page construction and content stream editing

use crate::types::{Rect, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::boxes::{first_page_id, rect_to_object};
use super::xobject::{create_page_xobject, get_page_content};

// =============================================================================
// Document Skeleton
// =============================================================================

/// A new empty document and the reserved ID of its page tree root
pub fn new_document() -> (Document, ObjectId) {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    (output, pages_tree_id)
}

/// Write the page tree root and catalog once all pages are added
pub fn finish_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}

/// Add a page with the given MediaBox, content and resources
pub fn create_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    media_box: &Rect,
    content: String,
    resources: Dictionary,
) -> ObjectId {
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set("MediaBox", rect_to_object(media_box));
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Content stream command painting a form XObject scaled about the origin
pub fn placement_command(xobject_name: &str, scale: f64) -> String {
    format!("q {} 0 0 {} 0 0 cm /{} Do Q\n", scale, scale, xobject_name)
}

// =============================================================================
// Overlay Merge
// =============================================================================

/// Paint the first page of `overlay` on top of `page_id`'s existing content.
///
/// The overlay page becomes a form XObject whose BBox is the overlay's
/// MediaBox, drawn without any transformation, so both pages must share a
/// coordinate space.
pub fn merge_overlay(
    output: &mut Document,
    page_id: ObjectId,
    overlay: &Document,
    xobject_name: &str,
) -> Result<()> {
    let overlay_page_id = first_page_id(overlay)?;
    let mut cache = HashMap::new();
    let xobject_id = create_page_xobject(output, overlay, overlay_page_id, &mut cache)?;

    add_xobject_resource(output, page_id, xobject_name, xobject_id)?;
    append_content(
        output,
        page_id,
        format!("q /{} Do Q\n", xobject_name).into_bytes(),
    )
}

fn add_xobject_resource(
    output: &mut Document,
    page_id: ObjectId,
    name: &str,
    xobject_id: ObjectId,
) -> Result<()> {
    // Resolve an indirect Resources dictionary to the object that owns it
    let resources_ref = output
        .get_dictionary(page_id)?
        .get(b"Resources")
        .and_then(Object::as_reference)
        .ok();

    let resources = match resources_ref {
        Some(id) => output.get_object_mut(id)?.as_dict_mut()?,
        None => {
            let page = output.get_object_mut(page_id)?.as_dict_mut()?;
            if !page.has(b"Resources") {
                page.set("Resources", Object::Dictionary(Dictionary::new()));
            }
            page.get_mut(b"Resources")?.as_dict_mut()?
        }
    };

    let xobjects_ref = resources
        .get(b"XObject")
        .and_then(Object::as_reference)
        .ok();
    let xobjects = match xobjects_ref {
        Some(id) => output.get_object_mut(id)?.as_dict_mut()?,
        None => {
            if !resources.has(b"XObject") {
                resources.set("XObject", Object::Dictionary(Dictionary::new()));
            }
            resources.get_mut(b"XObject")?.as_dict_mut()?
        }
    };
    xobjects.set(name, Object::Reference(xobject_id));
    Ok(())
}

// =============================================================================
// Content Editing
// =============================================================================

/// Append a content stream after the page's existing content
pub fn append_content(output: &mut Document, page_id: ObjectId, content: Vec<u8>) -> Result<()> {
    let new_id = output.add_object(Stream::new(Dictionary::new(), content));

    let existing = output.get_dictionary(page_id)?.get(b"Contents").ok().cloned();
    let mut contents = match existing {
        Some(Object::Array(arr)) => arr,
        Some(Object::Reference(id)) => match output.get_object(id)? {
            Object::Array(arr) => arr.clone(),
            _ => vec![Object::Reference(id)],
        },
        _ => Vec::new(),
    };
    contents.push(Object::Reference(new_id));

    output
        .get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Contents", Object::Array(contents));
    Ok(())
}

/// Replace the page's content with `prefix + content + suffix` in a single
/// decoded stream.
pub fn wrap_content(doc: &mut Document, page_id: ObjectId, prefix: &str, suffix: &str) -> Result<()> {
    let content = get_page_content(doc, doc.get_dictionary(page_id)?)?;

    let mut wrapped = Vec::with_capacity(prefix.len() + content.len() + suffix.len() + 2);
    wrapped.extend_from_slice(prefix.as_bytes());
    wrapped.push(b'\n');
    wrapped.extend_from_slice(&content);
    wrapped.push(b'\n');
    wrapped.extend_from_slice(suffix.as_bytes());

    let content_id = doc.add_object(Stream::new(Dictionary::new(), wrapped));
    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Contents", Object::Reference(content_id));
    Ok(())
}
