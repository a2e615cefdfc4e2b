//! clausewise: Legal document analysis backend
//!
//! Uploads PDF, DOCX and plain text documents, extracts their text and answers
//! analysis requests (summaries, classification, entities, plain-language
//! rewrites, question answering). Hosted models are used when an API key is
//! configured; every remote path degrades to local keyword/regex heuristics.
//! Summaries can be read aloud through an offline speech engine.

pub mod analysis;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod speech;
pub mod types;

pub use analysis::DocumentAnalyzer;
pub use config::ClauseWiseConfig;
pub use error::{Error, Result};
pub use server::ClauseWiseServer;
pub use speech::SpeechSynthesizer;
pub use types::{
    document::{Classification, Document, DocumentLabel, FileType},
    entities::{EntityBag, EntityCategory},
    response::{AnalysisOutcome, AnalysisSource},
};
