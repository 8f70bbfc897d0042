//! Resume text extraction by file type.
//!
//! Extraction problems stay local to one file: callers get an `ExtractError`, or an
//! empty string via [`extract_text_or_empty`], and the rest of the batch proceeds.

use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF read error: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resume file kinds, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Word,
    PlainText,
}

impl ResumeFormat {
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => ResumeFormat::Pdf,
            Some("docx") | Some("doc") => ResumeFormat::Word,
            _ => ResumeFormat::PlainText,
        }
    }
}

/// Extracts raw text from a resume file's bytes.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    match ResumeFormat::from_filename(filename) {
        ResumeFormat::Pdf => extract_pdf(bytes),
        ResumeFormat::Word => extract_docx(bytes),
        // Undecodable bytes are replaced rather than failing the file.
        ResumeFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Same as [`extract_text`] but logs failures and falls back to an empty string.
pub fn extract_text_or_empty(filename: &str, bytes: &[u8]) -> String {
    match extract_text(filename, bytes) {
        Ok(text) => text,
        Err(e) => {
            error!("Text extraction failed for {filename}: {e}");
            String::new()
        }
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract can panic on malformed input; keep that inside this one file.
    let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));
    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
        Err(_) => {
            warn!("PDF extractor panicked on malformed input");
            Err(ExtractError::Pdf("malformed PDF".to_string()))
        }
    }
}

static PARAGRAPH_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</w:p>").expect("valid paragraph regex"));
/// Text runs (group 1), run-level tabs (group 2) and line breaks, in document order.
static RUN_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*[^/>])?>(.*?)</w:t>|(<w:tab\s*/>)|<w:(?:br|cr)\b[^>]*/>")
        .expect("valid run content regex")
});
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]{1,6})|#([0-9]{1,7})|(lt|gt|quot|apos|amp));")
        .expect("valid entity regex")
});

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
    Ok(docx_xml_to_text(&xml))
}

/// Joins the text runs of each `<w:p>` paragraph, one paragraph per line.
fn docx_xml_to_text(xml: &str) -> String {
    let mut paragraphs: Vec<String> = PARAGRAPH_END_RE
        .split(xml)
        .map(|para| {
            let mut text = String::new();
            for caps in RUN_CONTENT_RE.captures_iter(para) {
                if let Some(run) = caps.get(1) {
                    push_run_text(&mut text, run.as_str());
                } else if caps.get(2).is_some() {
                    text.push('\t');
                } else {
                    text.push('\n');
                }
            }
            text
        })
        .collect();
    // Trailing content after the last paragraph is document/section markup.
    if paragraphs.len() > 1 {
        paragraphs.pop();
    }
    paragraphs.join("\n")
}

/// CDATA sections are copied verbatim; everything else is entity-decoded.
fn push_run_text(out: &mut String, raw: &str) {
    let mut rest = raw;
    while let Some(open) = rest.find("<![CDATA[") {
        out.push_str(&unescape_xml(&rest[..open]));
        let body = &rest[open + "<![CDATA[".len()..];
        match body.find("]]>") {
            Some(close) => {
                out.push_str(&body[..close]);
                rest = &body[close + "]]>".len()..];
            }
            None => {
                out.push_str(body);
                return;
            }
        }
    }
    out.push_str(&unescape_xml(rest));
}

/// Decodes the predefined XML entities and numeric character references.
/// A reference to an invalid code point is left as written.
fn unescape_xml(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &regex::Captures| {
            let numeric = caps
                .get(1)
                .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
                .or_else(|| caps.get(2).and_then(|dec| dec.as_str().parse().ok()));
            match (numeric, caps.get(3).map(|m| m.as_str())) {
                (Some(code), _) => char::from_u32(code)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string()),
                (None, Some("lt")) => "<".to_string(),
                (None, Some("gt")) => ">".to_string(),
                (None, Some("quot")) => "\"".to_string(),
                (None, Some("apos")) => "'".to_string(),
                (None, Some("amp")) => "&".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn make_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("word/document.xml", zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ResumeFormat::from_filename("cv.PDF"), ResumeFormat::Pdf);
        assert_eq!(ResumeFormat::from_filename("cv.docx"), ResumeFormat::Word);
        assert_eq!(ResumeFormat::from_filename("cv.doc"), ResumeFormat::Word);
        assert_eq!(ResumeFormat::from_filename("cv.txt"), ResumeFormat::PlainText);
        assert_eq!(ResumeFormat::from_filename("resume"), ResumeFormat::PlainText);
    }

    #[test]
    fn test_plain_text_is_lossy() {
        let text = extract_text("cv.txt", b"Rust \xff engineer").unwrap();
        assert!(text.starts_with("Rust "));
        assert!(text.ends_with(" engineer"));
    }

    #[test]
    fn test_docx_paragraphs_joined_by_newline() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t xml:space="preserve">Rust &amp; </w:t></w:r><w:r><w:tab/><w:t>Go</w:t></w:r></w:p>
            <w:sectPr/></w:body></w:document>"#;
        let text = extract_text("cv.docx", &make_docx(xml)).unwrap();
        assert_eq!(text, "Jane Doe\nRust & \tGo");
    }

    #[test]
    fn test_docx_decodes_character_references() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>O&#8217;Brien &#x2014; &lt;Lead&gt; &amp;amp;</w:t></w:r></w:p>
            <w:p><w:r><w:t>bad &#xD800; ref</w:t></w:r></w:p>
            </w:body></w:document>"#;
        let text = extract_text("cv.docx", &make_docx(xml)).unwrap();
        assert_eq!(text, "O\u{2019}Brien \u{2014} <Lead> &amp;\nbad &#xD800; ref");
    }

    #[test]
    fn test_docx_line_breaks_and_cdata() {
        let xml = r#"<w:document><w:body>
            <w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
            <w:r><w:t>Skills</w:t><w:br/><w:t><![CDATA[C++ & <Rust>]]></w:t></w:r></w:p>
            </w:body></w:document>"#;
        let text = extract_text("cv.docx", &make_docx(xml)).unwrap();
        assert_eq!(text, "Skills\nC++ & <Rust>");
    }

    #[test]
    fn test_invalid_docx_is_an_error() {
        assert!(matches!(
            extract_text("cv.docx", b"not a zip"),
            Err(ExtractError::Docx(_))
        ));
        assert_eq!(extract_text_or_empty("cv.doc", b"\xd0\xcf\x11\xe0"), "");
    }

    #[test]
    fn test_invalid_pdf_falls_back_to_empty() {
        assert_eq!(extract_text_or_empty("cv.pdf", b"definitely not a pdf"), "");
    }
}
