//! Page boxes and inherited page attributes

use crate::types::{PosterError, Rect, Result};
use lopdf::{Document, Object, ObjectId};

/// Page boxes rescaled by the fit pass
pub const PAGE_BOXES: [&[u8]; 5] = [b"MediaBox", b"CropBox", b"BleedBox", b"TrimBox", b"ArtBox"];

/// Deepest page tree walked when looking for inherited attributes
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Object ID of the first page
pub fn first_page_id(doc: &Document) -> Result<ObjectId> {
    doc.get_pages()
        .values()
        .next()
        .copied()
        .ok_or(PosterError::NoPages)
}

/// Look up a page attribute, walking up `Parent` links for inherited values
pub fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut dict = doc.get_dictionary(page_id)?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(obj) = dict.get(key) {
            return Ok(Some(resolve(doc, obj)?));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => dict = doc.get_dictionary(parent_id)?,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

/// Follow a reference, if `obj` is one
pub fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// The page's MediaBox, normalized so that `x`/`y` is the lower-left corner
pub fn page_media_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    match inherited_attribute(doc, page_id, b"MediaBox")? {
        Some(obj) => read_rect(doc, obj),
        None => Err(PosterError::InvalidGeometry(
            "page has no MediaBox".to_string(),
        )),
    }
}

/// Read a `[llx lly urx ury]` rectangle
pub fn read_rect(doc: &Document, obj: &Object) -> Result<Rect> {
    let malformed = || PosterError::InvalidGeometry(format!("malformed page box: {:?}", obj));

    let arr = obj.as_array().map_err(|_| malformed())?;
    if arr.len() != 4 {
        return Err(malformed());
    }

    let mut values = [0.0_f64; 4];
    for (slot, item) in values.iter_mut().zip(arr) {
        *slot = extract_number(resolve(doc, item)?).ok_or_else(malformed)?;
    }

    let [x1, y1, x2, y2] = values;
    Ok(Rect::from_corners(
        x1.min(x2),
        y1.min(y2),
        x1.max(x2),
        y1.max(y2),
    ))
}

/// Serialize a rectangle as a PDF box array
pub fn rect_to_object(rect: &Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x as f32),
        Object::Real(rect.y as f32),
        Object::Real(rect.right() as f32),
        Object::Real(rect.top() as f32),
    ])
}

/// Multiply every page box by `scale`, the way a uniform `cm` scale moves
/// the page content. Inherited boxes are materialized on the page itself.
pub fn scale_page_boxes(doc: &mut Document, page_id: ObjectId, scale: f64) -> Result<()> {
    let mut scaled = Vec::new();
    for key in PAGE_BOXES {
        if let Some(obj) = inherited_attribute(doc, page_id, key)? {
            let rect = read_rect(doc, obj)?;
            let rect = Rect::new(
                rect.x * scale,
                rect.y * scale,
                rect.width * scale,
                rect.height * scale,
            );
            scaled.push((key, rect));
        }
    }

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    for (key, rect) in scaled {
        page.set(key, rect_to_object(&rect));
    }
    Ok(())
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
