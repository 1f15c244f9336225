//! PDF text and link-annotation extraction.

use lopdf::{Dictionary, Document, Object};

use crate::error::ExtractError;

/// Extract text and embedded link targets from a PDF.
///
/// Body text comes from the content streams (table cells ride along — the
/// extractor flattens layout). Link URIs come from page annotation
/// dictionaries; any annotation that fails to resolve is skipped.
pub(crate) fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let body =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    let links = extract_link_annotations(bytes);
    Ok(super::assemble(&body, "", &links))
}

/// Walk every page's `Annots` array collecting `A`/`URI` action targets.
///
/// Best-effort throughout: a malformed page, annotation, or action simply
/// contributes nothing.
fn extract_link_annotations(bytes: &[u8]) -> Vec<String> {
    let Ok(doc) = Document::load_mem(bytes) else {
        tracing::warn!("PDF reopen for link annotations failed; links omitted");
        return Vec::new();
    };

    let mut urls = Vec::new();
    for page_id in doc.get_pages().into_values() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Some(annots) = page.get(b"Annots").ok().and_then(|obj| resolve(&doc, obj)) else {
            continue;
        };
        let Object::Array(annots) = annots else {
            continue;
        };
        for annot in annots {
            if let Some(uri) = annotation_uri(&doc, annot) {
                urls.push(uri);
            }
        }
    }
    urls
}

/// Pull the URI out of one annotation object, if it carries a link action.
fn annotation_uri(doc: &Document, annot: &Object) -> Option<String> {
    let annot: &Dictionary = match resolve(doc, annot)? {
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    let action = match resolve(doc, annot.get(b"A").ok()?)? {
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    match resolve(doc, action.get(b"URI").ok()?)? {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Follow one level of indirection if `obj` is a reference.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}
