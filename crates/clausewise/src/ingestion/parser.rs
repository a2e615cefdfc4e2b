//! Upload text extraction for PDF, DOCX and plain text

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::types::FileType;

/// Message returned for uploads that are not PDF, DOCX or TXT
pub const UNSUPPORTED_MESSAGE: &str = "Unsupported file type. Please upload PDF, DOCX, or TXT files.";

/// Parsed upload with extracted text
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// File type
    pub file_type: FileType,
    /// MIME type the type was detected from (canonical when guessed)
    pub mime_type: String,
    /// Extracted text content
    pub content: String,
    /// Content hash
    pub content_hash: String,
    /// Total pages (PDF only)
    pub total_pages: Option<u32>,
}

/// Upload file parser
pub struct FileParser;

impl FileParser {
    /// Detect the file type of an upload.
    ///
    /// The MIME type sent by the client wins; a missing or generic one falls
    /// back to a guess from the filename.
    pub fn detect(filename: &str, mime: Option<&str>) -> FileType {
        if let Some(file_type) = mime
            .map(FileType::from_mime)
            .filter(FileType::is_supported)
        {
            return file_type;
        }

        if let Some(guess) = mime_guess::from_path(filename).first() {
            let file_type = FileType::from_mime(guess.essence_str());
            if file_type.is_supported() {
                return file_type;
            }
        }

        let extension = filename.rsplit('.').next().unwrap_or("");
        FileType::from_extension(extension)
    }

    /// Parse an upload and extract its text
    pub fn parse(filename: &str, mime: Option<&str>, data: &[u8]) -> Result<ParsedDocument> {
        let file_type = Self::detect(filename, mime);

        let (content, total_pages) = match file_type {
            FileType::Pdf => Self::parse_pdf(filename, data)?,
            FileType::Docx => (Self::parse_docx(filename, data)?, None),
            FileType::Txt => (Self::parse_text(filename, data)?, None),
            FileType::Unknown => {
                return Err(Error::UnsupportedFileType(UNSUPPORTED_MESSAGE.to_string()))
            }
        };

        tracing::debug!(
            filename,
            file_type = file_type.display_name(),
            chars = content.len(),
            "extracted text"
        );

        Ok(ParsedDocument {
            file_type,
            mime_type: mime
                .filter(|m| FileType::from_mime(m) == file_type)
                .unwrap_or(file_type.mime_type())
                .to_string(),
            content_hash: hash_content(&content),
            content,
            total_pages,
        })
    }

    /// Parse PDF document: each page with text is followed by a newline
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<(String, Option<u32>)> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let mut content = String::new();
        for page in pages.iter().filter(|page| !page.trim().is_empty()) {
            content.push_str(page);
            content.push('\n');
        }

        let total_pages = lopdf::Document::load_mem(data)
            .ok()
            .map(|doc| doc.get_pages().len() as u32);

        Ok((content, total_pages))
    }

    /// Parse DOCX document: one line per paragraph
    fn parse_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let mut content = String::new();

        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                content.push_str(&t.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(content)
    }

    /// Parse plain text (strict UTF-8)
    fn parse_text(filename: &str, data: &[u8]) -> Result<String> {
        String::from_utf8(data.to_vec())
            .map_err(|e| Error::file_parse(filename, format!("invalid UTF-8: {}", e)))
    }
}

/// Hash content for change detection
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
