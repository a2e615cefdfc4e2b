//! Core types for ClauseWise

pub mod document;
pub mod entities;
pub mod query;
pub mod response;

pub use document::{Classification, Document, DocumentLabel, FileType};
pub use entities::{EntityBag, EntityCategory};
pub use response::{AnalysisOutcome, AnalysisSource, ConversationTurn};
