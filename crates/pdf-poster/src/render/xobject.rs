//! XObject creation for tiling
//!
//! Source pages are embedded into the output as Form XObjects once and then
//! painted by every tile with its own transformation.

use crate::types::{PosterError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::boxes::{inherited_attribute, page_media_box, rect_to_object};

// =============================================================================
// XObject Creation
// =============================================================================

/// Embed `page_id` of `source` into `output` as a Form XObject.
///
/// The BBox is the page's (possibly inherited) MediaBox, so the form paints in
/// the page's own coordinate space. Resources are deep-copied; `cache` maps
/// source object ids to output ids so shared objects are copied once.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let media_box = page_media_box(source, page_id)?;
    let page_dict = source.get_dictionary(page_id)?;
    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", rect_to_object(&media_box));
    xobject_dict.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(xobject_dict, content_data)))
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the decoded content stream data from a page.
pub(crate) fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        // Blank page
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id)? {
            Object::Array(arr) => join_content_streams(doc, arr),
            other => stream_data(other),
        },
        Object::Array(arr) => join_content_streams(doc, arr),
        Object::Stream(_) => stream_data(contents),
        _ => Err(PosterError::InvalidGeometry(
            "page Contents is neither a stream nor an array".to_string(),
        )),
    }
}

/// Decoded bytes of a content stream. Non-stream entries contribute nothing;
/// a filter that cannot be decoded is an error.
fn stream_data(obj: &Object) -> Result<Vec<u8>> {
    let Ok(stream) = obj.as_stream() else {
        return Ok(Vec::new());
    };
    if !stream.is_compressed() {
        return Ok(stream.content.clone());
    }
    Ok(stream.decompressed_content()?)
}

/// Join a Contents array into one stream, newline separated
fn join_content_streams(doc: &Document, parts: &[Object]) -> Result<Vec<u8>> {
    let mut joined = Vec::new();
    for part in parts {
        let Object::Reference(id) = part else {
            continue;
        };
        joined.extend_from_slice(&stream_data(doc.get_object(*id)?)?);
        joined.push(b'\n');
    }
    Ok(joined)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Copy `obj` into `output`, pulling every referenced object along.
///
/// Each source object is copied at most once per `cache`.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    let copied = match obj {
        Object::Reference(source_id) => {
            Object::Reference(copy_reference(output, source, *source_id, cache)?)
        }
        Object::Dictionary(dict) => {
            Object::Dictionary(copy_dictionary(output, source, dict, cache)?)
        }
        Object::Array(items) => {
            let mut copied_items = Vec::with_capacity(items.len());
            for item in items {
                copied_items.push(copy_object_deep(output, source, item, cache)?);
            }
            Object::Array(copied_items)
        }
        Object::Stream(stream) => Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        }),
        other => other.clone(),
    };
    Ok(copied)
}

fn copy_reference(
    output: &mut Document,
    source: &Document,
    source_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    if let Some(&copied_id) = cache.get(&source_id) {
        return Ok(copied_id);
    }

    // Reserve the id first so reference cycles resolve to it
    let copied_id = output.new_object_id();
    cache.insert(source_id, copied_id);

    let copied = copy_object_deep(output, source, source.get_object(source_id)?, cache)?;
    output.objects.insert(copied_id, copied);
    Ok(copied_id)
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        // Parent links would drag the whole source page tree along
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}
