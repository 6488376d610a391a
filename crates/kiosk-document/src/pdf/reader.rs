// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open published documents and split out single pages for the
// viewer using the `lopdf` crate.

use std::path::Path;

use kiosk_core::error::{KioskError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::{debug, info, instrument, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Read-only view of a PDF on disk or in memory.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(KioskError::NotFound(path_ref.display().to_string()));
        }
        info!("opening PDF");

        let document = Document::load(path_ref).map_err(|err| {
            KioskError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            KioskError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    pub fn page_count(&self) -> u32 {
        u32::try_from(self.document.get_pages().len()).unwrap_or(u32::MAX)
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// Extract a single page (1-indexed) into a new standalone PDF document.
    ///
    /// Returns the serialised bytes of the single-page PDF.
    #[instrument(skip(self))]
    pub fn extract_page(&self, page_number: u32) -> Result<Vec<u8>> {
        let pages = self.document.get_pages();
        let total = self.page_count();
        if page_number == 0 || page_number > total {
            return Err(KioskError::PageOutOfRange {
                page: page_number,
                total,
            });
        }

        // lopdf pages are keyed by 1-indexed page number.
        let page_object_id: ObjectId = *pages.get(&page_number).ok_or_else(|| {
            KioskError::PdfError(format!("page {} not found in page tree", page_number))
        })?;

        let mut new_doc = single_page_shell();
        clone_page_into(&self.document, &mut new_doc, page_object_id)?;

        let mut output = Vec::new();
        new_doc.save_to(&mut output).map_err(|err| {
            KioskError::PdfError(format!("failed to serialise extracted page: {}", err))
        })?;

        debug!(page_number, output_bytes = output.len(), "page extracted");
        Ok(output)
    }
}

/// An empty document with a catalog and an empty page tree.
fn single_page_shell() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Clone a single page object (and its referenced resources) from `source` into
/// `target`, appending it as the last page.
///
/// Inherited attributes (resources, media box) are copied onto the page
/// itself since its original ancestors are not cloned.
fn clone_page_into(source: &Document, target: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = source.get_dictionary(page_id).map_err(|err| {
        KioskError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
    })?;

    let mut flattened = page.clone();
    for key in INHERITABLE {
        if !flattened.has(key)
            && let Some(value) = inherited(source, page, key)
        {
            flattened.set(key.to_vec(), value);
        }
    }

    let cloned = deep_clone_object(source, target, &Object::Dictionary(flattened))?;
    let cloned_id = target.add_object(cloned);

    let pages_id = target
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|err| KioskError::PdfError(format!("no /Pages in target: {}", err)))?;

    // Add page reference to the /Kids array and bump /Count.
    if let Ok(Object::Dictionary(pages_dict)) = target.get_object_mut(pages_id) {
        if let Ok(Object::Array(kids)) = pages_dict.get_mut(b"Kids") {
            kids.push(Object::Reference(cloned_id));
        }
        if let Ok(count_obj) = pages_dict.get_mut(b"Count")
            && let Object::Integer(count) = count_obj
        {
            *count += 1;
        }
    }

    if let Ok(Object::Dictionary(page_dict)) = target.get_object_mut(cloned_id) {
        page_dict.set("Parent", Object::Reference(pages_id));
    }

    Ok(())
}

/// Walk /Parent links looking for an inheritable attribute.
fn inherited(source: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut node = page;
    // Page trees are shallow; the bound guards against /Parent cycles.
    for _ in 0..32 {
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = source.get_dictionary(parent_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
    }
    None
}

/// Deep-clone a single lopdf Object, recursively resolving references (except
/// /Parent which is skipped to avoid circular cloning).
fn deep_clone_object(source: &Document, target: &mut Document, object: &Object) -> Result<Object> {
    match object {
        Object::Dictionary(dict) => Ok(Object::Dictionary(clone_dict(source, target, dict)?)),
        Object::Array(arr) => {
            let mut new_arr = Vec::with_capacity(arr.len());
            for item in arr {
                new_arr.push(deep_clone_object(source, target, item)?);
            }
            Ok(Object::Array(new_arr))
        }
        Object::Reference(ref_id) => match source.get_object(*ref_id) {
            Ok(referenced) => {
                let cloned = deep_clone_object(source, target, referenced)?;
                let new_id = target.add_object(cloned);
                Ok(Object::Reference(new_id))
            }
            Err(err) => {
                warn!(?ref_id, %err, "cannot resolve reference, using Null");
                Ok(Object::Null)
            }
        },
        Object::Stream(stream) => Ok(Object::Stream(lopdf::Stream::new(
            clone_dict(source, target, &stream.dict)?,
            stream.content.clone(),
        ))),
        other => Ok(other.clone()),
    }
}

fn clone_dict(source: &Document, target: &mut Document, dict: &Dictionary) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        if key == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), deep_clone_object(source, target, value)?);
    }
    Ok(new_dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::sample_pdf;

    #[test]
    fn counts_pages() {
        let reader = PdfReader::from_bytes(&sample_pdf(3)).unwrap();
        assert_eq!(reader.page_count(), 3);
        assert!(reader.source_path().is_none());
    }

    #[test]
    fn extracted_page_is_standalone() {
        let reader = PdfReader::from_bytes(&sample_pdf(3)).unwrap();
        let bytes = reader.extract_page(2).unwrap();

        let page = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(page.page_count(), 1);

        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = doc.get_pages()[&1];
        let dict = doc.get_dictionary(page_id).unwrap();
        assert!(dict.has(b"MediaBox"), "inherited media box is flattened");
        assert!(dict.has(b"Resources"), "inherited resources are flattened");
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        let reader = PdfReader::from_bytes(&sample_pdf(2)).unwrap();
        assert!(matches!(
            reader.extract_page(0),
            Err(KioskError::PageOutOfRange { page: 0, total: 2 })
        ));
        assert!(matches!(
            reader.extract_page(3),
            Err(KioskError::PageOutOfRange { page: 3, total: 2 })
        ));
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        assert!(matches!(
            PdfReader::from_bytes(b"not a pdf"),
            Err(KioskError::PdfError(_))
        ));
    }

    #[test]
    fn open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("siup.pdf");
        std::fs::write(&path, sample_pdf(1)).unwrap();

        let reader = PdfReader::open(&path).unwrap();
        assert_eq!(reader.page_count(), 1);
        assert!(reader.source_path().unwrap().ends_with("siup.pdf"));

        assert!(matches!(
            PdfReader::open(dir.path().join("missing.pdf")),
            Err(KioskError::NotFound(_))
        ));
    }
}
