//! Text extraction from various file formats

use crate::error::{Result, ResumeScreenerError};
use pulldown_cmark::{html, Parser};
use regex::{Captures, Regex};
use std::io::{Cursor, Read};

/// Converts an in-memory document into plain text
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract already separates pages with newlines
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeScreenerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })
    }
}

/// Reads `word/document.xml` out of the DOCX container and joins its
/// paragraphs with newlines.
pub struct DocxExtractor {
    paragraph_regex: Regex,
    run_regex: Regex,
    entities: EntityDecoder,
}

impl DocxExtractor {
    const DOCUMENT_PART: &'static str = "word/document.xml";

    pub fn new() -> Result<Self> {
        // Self-closing paragraphs are empty lines
        let paragraph_regex = Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>(.*?)</w:p>")?;
        let run_regex = Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:(tab|br|cr)(?:\s[^>]*)?/>")?;

        Ok(Self {
            paragraph_regex,
            run_regex,
            entities: EntityDecoder::new()?,
        })
    }

    /// Flatten the WordprocessingML body into plain text
    pub fn document_xml_to_text(&self, xml: &str) -> String {
        let mut paragraphs = Vec::new();

        for paragraph in self.paragraph_regex.captures_iter(xml) {
            let mut text = String::new();

            if let Some(body) = paragraph.get(1) {
                for run in self.run_regex.captures_iter(body.as_str()) {
                    match (run.get(1), run.get(2).map(|m| m.as_str())) {
                        (Some(t), _) => text.push_str(&self.entities.decode(t.as_str())),
                        (None, Some("tab")) => text.push('\t'),
                        (None, Some(_)) => text.push('\n'),
                        (None, None) => {}
                    }
                }
            }

            paragraphs.push(text);
        }

        paragraphs.join("\n")
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut xml = String::new();
        archive
            .by_name(Self::DOCUMENT_PART)?
            .read_to_string(&mut xml)
            .map_err(|e| {
                ResumeScreenerError::DocxExtraction(format!("Failed to read {}: {}", Self::DOCUMENT_PART, e))
            })?;

        Ok(self.document_xml_to_text(&xml))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ResumeScreenerError::InvalidInput(format!("Text file is not valid UTF-8: {}", e)))
    }
}

pub struct MarkdownExtractor {
    tag_regex: Regex,
    entities: EntityDecoder,
}

impl MarkdownExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tag_regex: Regex::new(r"<[^>]*>")?,
            entities: EntityDecoder::new()?,
        })
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html.replace("<br>", "\n").replace("</p>", "\n\n");
        let clean_text = self.tag_regex.replace_all(&text, "");
        let clean_text = self.entities.decode(&clean_text).replace("&nbsp;", " ");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

/// Decodes the predefined XML entities and numeric character references
struct EntityDecoder {
    numeric_regex: Regex,
}

impl EntityDecoder {
    fn new() -> Result<Self> {
        Ok(Self {
            numeric_regex: Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));")?,
        })
    }

    /// `&amp;` goes last so it is not decoded twice
    fn decode(&self, text: &str) -> String {
        let named = text
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'");

        let numeric = self.numeric_regex.replace_all(&named, |caps: &Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                (None, None) => None,
            };
            // Invalid code points are left as written
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        });

        numeric.replace("&amp;", "&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p w:rsidR="001"><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Senior Rust</w:t></w:r><w:r><w:t xml:space="preserve"> Developer</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>Skills: Rust, Tokio &amp; Serde</w:t></w:r></w:p>
</w:body></w:document>"#;

        let text = DocxExtractor::new().unwrap().extract(&build_docx(xml)).unwrap();

        assert_eq!(text, "Senior Rust Developer\n\nSkills: Rust, Tokio & Serde");
    }

    #[test]
    fn test_numeric_character_references() {
        let extractor = DocxExtractor::new().unwrap();
        let xml = "<w:p><w:r><w:t>Jane&#8217;s r&#xE9;sum&#xe9; &amp;#39; &#xD800;</w:t></w:r></w:p>";

        assert_eq!(extractor.document_xml_to_text(xml), "Jane\u{2019}s r\u{e9}sum\u{e9} &#39; &#xD800;");
    }

    #[test]
    fn test_docx_tabs_and_breaks() {
        let extractor = DocxExtractor::new().unwrap();
        let xml = "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>";

        assert_eq!(extractor.document_xml_to_text(xml), "A\tB\nC");
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("other.xml", FileOptions::default()).unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = DocxExtractor::new().unwrap().extract(&bytes);
        assert!(matches!(result, Err(ResumeScreenerError::DocxExtraction(_))));
    }

    #[test]
    fn test_garbage_is_not_a_docx() {
        let result = DocxExtractor::new().unwrap().extract(b"definitely not a zip archive");
        assert!(result.is_err());
    }

    #[test]
    fn test_markdown_formatting_removed() {
        let extractor = MarkdownExtractor::new().unwrap();
        let text = extractor
            .extract(b"# Jane Roe\n\n**Backend Engineer**\n\n## Skills\n\n- Rust\n- Go")
            .unwrap();

        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Backend Engineer"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        assert!(PlainTextExtractor.extract(&[0xff, 0xfe, 0xfd]).is_err());
    }
}
