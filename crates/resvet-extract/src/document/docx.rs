//! DOCX text, table, and hyperlink extraction.
//!
//! A DOCX file is a zip container; body and table text live in
//! `word/document.xml` and hyperlink targets in the relationship part
//! `word/_rels/document.xml.rels` (the visible text often omits the URL).

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::ExtractError;

pub(crate) fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let document_xml = read_part(&mut archive, "word/document.xml")
        .ok_or_else(|| ExtractError::Docx("missing word/document.xml".to_string()))?;
    let (body, tables) = body_and_table_text(&document_xml);

    // Hyperlink extraction is optional; a missing or malformed rels part
    // just means no appended URLs.
    let links = read_part(&mut archive, "word/_rels/document.xml.rels")
        .map(|xml| hyperlink_targets(&xml))
        .unwrap_or_default();

    Ok(super::assemble(&body, &tables, &links))
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Option<String> {
    let mut file = archive.by_name(name).ok()?;
    let mut content = String::new();
    file.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Walk `document.xml` collecting run text (`w:t`), splitting paragraph and
/// table content. Tracks `w:tbl` nesting depth so table cell text lands in
/// the table blob, with cells space-joined and rows newline-terminated.
fn body_and_table_text(xml: &str) -> (String, String) {
    let mut reader = Reader::from_str(xml);
    let mut body = String::new();
    let mut tables = String::new();
    let mut table_depth = 0_usize;
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"t" => in_run_text = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"t" => in_run_text = false,
                b"p" if table_depth == 0 => body.push('\n'),
                b"tc" => tables.push(' '),
                b"tr" => tables.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_run_text => {
                if let Ok(text) = t.unescape() {
                    if table_depth > 0 {
                        tables.push_str(&text);
                    } else {
                        body.push_str(&text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                // Malformed XML past this point: keep what was collected.
                tracing::warn!(error = %e, "DOCX body parse stopped early");
                break;
            }
        }
    }

    (body, tables)
}

/// Pull hyperlink targets from the relationships part.
fn hyperlink_targets(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut targets = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e) | Event::Empty(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel_type = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => rel_type = attr.unescape_value().ok().map(String::from),
                        b"Target" => target = attr.unescape_value().ok().map(String::from),
                        _ => {}
                    }
                }
                if rel_type.is_some_and(|t| t.contains("hyperlink")) {
                    if let Some(target) = target {
                        targets.push(target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "DOCX relationships parse stopped early");
                break;
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Software Engineer at Acme Corp</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Python</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>Django</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
  </w:body>
</w:document>"#;

    const RELS_XML: &str = r#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://github.com/janedoe" TargetMode="External"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

    #[test]
    fn body_text_keeps_paragraph_lines() {
        let (body, _) = body_and_table_text(DOCUMENT_XML);
        assert!(body.contains("Jane Doe\n"));
        assert!(body.contains("Software Engineer at Acme Corp"));
    }

    #[test]
    fn table_text_is_separated_from_body() {
        let (body, tables) = body_and_table_text(DOCUMENT_XML);
        assert!(!body.contains("Python"));
        assert!(tables.contains("Python"));
        assert!(tables.contains("Django"));
    }

    #[test]
    fn hyperlink_targets_filters_to_hyperlink_rels() {
        let targets = hyperlink_targets(RELS_XML);
        assert_eq!(targets, vec!["https://github.com/janedoe".to_string()]);
    }

    #[test]
    fn malformed_xml_returns_partial_text() {
        let (body, _) = body_and_table_text("<w:p><w:t>Partial</w:t></w:p><broken");
        assert!(body.contains("Partial"));
    }
}
