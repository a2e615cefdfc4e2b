//! Upload ingestion: text extraction from PDF, DOCX and TXT

mod parser;

pub use parser::{FileParser, ParsedDocument, UNSUPPORTED_MESSAGE};
