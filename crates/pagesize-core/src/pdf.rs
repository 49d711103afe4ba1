//! PDF page geometry via lopdf
//!
//! Reads page size from MediaBox, falling back to CropBox. Both boxes are
//! inheritable page attributes, so the `/Parent` chain is searched too.

use crate::error::{PageSizeError, Result};
use crate::source::DocumentSource;
use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};

/// Guards against cyclic `/Parent` links in malformed files
const MAX_INHERIT_DEPTH: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    /// Swap width and height for pages rotated by 90 or 270 degrees
    pub honor_rotation: bool,
}

pub struct PdfSource {
    document: Document,
    pages: Vec<ObjectId>,
    options: PdfOptions,
}

impl PdfSource {
    /// Parse PDF bytes
    pub fn load(bytes: &[u8], options: &PdfOptions) -> Result<Self> {
        let document =
            Document::load_mem(bytes).map_err(|e| PageSizeError::ParseError(e.to_string()))?;
        let pages: Vec<ObjectId> = document.get_pages().into_values().collect();

        tracing::debug!("Loaded PDF with {} pages", pages.len());

        Ok(Self {
            document,
            pages,
            options: options.clone(),
        })
    }

    fn page_dict(&self, page_number: u32) -> Result<&Dictionary> {
        let page_id = page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .ok_or(PageSizeError::PageOutOfRange {
                page: page_number,
                count: self.pages.len() as u32,
            })?;

        self.document
            .get_object(*page_id)
            .and_then(Object::as_dict)
            .map_err(|_| {
                PageSizeError::ParseError(format!("Page {} is not a dictionary", page_number))
            })
    }
}

impl DocumentSource for PdfSource {
    fn page_count(&self) -> Result<u32> {
        Ok(self.pages.len() as u32)
    }

    fn page_dimensions(&self, page_number: u32) -> Result<(f64, f64)> {
        let page_dict = self.page_dict(page_number)?;

        let (width, height) = [b"MediaBox".as_slice(), b"CropBox".as_slice()]
            .iter()
            .find_map(|key| {
                inherited(&self.document, page_dict, key)
                    .and_then(|obj| box_dimensions(&self.document, obj))
            })
            .ok_or_else(|| {
                PageSizeError::ParseError(format!(
                    "Page {} has no usable MediaBox or CropBox",
                    page_number
                ))
            })?;

        if self.options.honor_rotation {
            let rotation = get_rotation(&self.document, page_dict);
            if rotation == 90 || rotation == 270 {
                return Ok((height, width));
            }
        }

        Ok((width, height))
    }
}

/// Look up an inheritable attribute on the page or its ancestors
fn inherited<'a>(
    doc: &'a Document,
    page_dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut dict = page_dict;

    for _ in 0..MAX_INHERIT_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Some(resolve(doc, value));
        }

        let parent_id = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        dict = doc.get_object(parent_id).and_then(Object::as_dict).ok()?;
    }

    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj.as_reference() {
        Ok(id) => doc.get_object(id).unwrap_or(obj),
        Err(_) => obj,
    }
}

/// Width and height of a box array [x1, y1, x2, y2]
fn box_dimensions(doc: &Document, obj: &Object) -> Option<(f64, f64)> {
    let array = obj.as_array().ok()?;
    if array.len() != 4 {
        return None;
    }

    let mut coords = [0.0; 4];
    for (slot, item) in coords.iter_mut().zip(array) {
        *slot = number(resolve(doc, item))?;
    }

    Some(((coords[2] - coords[0]).abs(), (coords[3] - coords[1]).abs()))
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(n) => Some(*n as f64),
        Object::Real(n) => Some(*n as f64),
        _ => None,
    }
}

fn get_rotation(doc: &Document, page_dict: &Dictionary) -> i64 {
    inherited(doc, page_dict, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .map(normalize_rotation)
        .unwrap_or(0)
}

/// Normalize rotation to 0, 90, 180, or 270
fn normalize_rotation(angle: i64) -> i64 {
    angle.rem_euclid(360)
}
