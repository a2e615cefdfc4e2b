//! Document analysis orchestration

mod analyzer;

pub use analyzer::DocumentAnalyzer;
