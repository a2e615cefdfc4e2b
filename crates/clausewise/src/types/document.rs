//! Document types and the fixed document label set

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// MIME type of Word documents as sent by browsers
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported upload file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// Anything else
    Unknown,
}

impl FileType {
    /// Detect file type from a MIME type
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" => Self::Pdf,
            DOCX_MIME => Self::Docx,
            "text/plain" => Self::Txt,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" | "text" => Self::Txt,
            _ => Self::Unknown,
        }
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Canonical MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => DOCX_MIME,
            Self::Txt => "text/plain",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Txt => "Text File",
            Self::Unknown => "Unknown",
        }
    }
}

/// The fixed set of document labels produced by classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentLabel {
    LegalContract,
    InsurancePolicy,
    LeaseAgreement,
    EmploymentDocument,
    LegalWill,
    NonDisclosureAgreement,
    ServiceAgreement,
    PurchaseAgreement,
    PartnershipAgreement,
    LicenseAgreement,
    CourtDocument,
    LegalNotice,
    TermsAndConditions,
    /// Default when no keyword matches
    GeneralLegalDocument,
}

impl DocumentLabel {
    /// Every label, in classification table order, default last
    pub const ALL: [DocumentLabel; 14] = [
        Self::LegalContract,
        Self::InsurancePolicy,
        Self::LeaseAgreement,
        Self::EmploymentDocument,
        Self::LegalWill,
        Self::NonDisclosureAgreement,
        Self::ServiceAgreement,
        Self::PurchaseAgreement,
        Self::PartnershipAgreement,
        Self::LicenseAgreement,
        Self::CourtDocument,
        Self::LegalNotice,
        Self::TermsAndConditions,
        Self::GeneralLegalDocument,
    ];

    /// Human readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LegalContract => "Legal Contract",
            Self::InsurancePolicy => "Insurance Policy",
            Self::LeaseAgreement => "Lease Agreement",
            Self::EmploymentDocument => "Employment Document",
            Self::LegalWill => "Legal Will",
            Self::NonDisclosureAgreement => "Non-Disclosure Agreement",
            Self::ServiceAgreement => "Service Agreement",
            Self::PurchaseAgreement => "Purchase Agreement",
            Self::PartnershipAgreement => "Partnership Agreement",
            Self::LicenseAgreement => "License Agreement",
            Self::CourtDocument => "Court Document",
            Self::LegalNotice => "Legal Notice",
            Self::TermsAndConditions => "Terms & Conditions",
            Self::GeneralLegalDocument => "General Legal Document",
        }
    }
}

impl fmt::Display for DocumentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of keyword classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub label: DocumentLabel,
    /// Number of the label's keywords found in the text (0 for the default label)
    pub keywords_matched: usize,
}

impl Classification {
    /// The default classification
    pub fn general() -> Self {
        Self {
            label: DocumentLabel::GeneralLegalDocument,
            keywords_matched: 0,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label == DocumentLabel::GeneralLegalDocument {
            write!(f, "{} (No specific type identified)", self.label)
        } else {
            write!(
                f,
                "{} (Confidence: {} keywords matched)",
                self.label, self.keywords_matched
            )
        }
    }
}

/// An uploaded document. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded by user
    pub filename: String,
    /// File type
    pub file_type: FileType,
    /// MIME type reported for the upload
    pub mime_type: String,
    /// Extracted plain text
    pub content: String,
    /// Content hash (SHA-256, hex)
    pub content_hash: String,
    /// File size in bytes
    pub file_size: u64,
    /// Total number of pages (PDF only)
    pub total_pages: Option<u32>,
    /// Whitespace separated words in the extracted text
    pub word_count: usize,
    /// Detected document type
    pub classification: Classification,
    /// Upload timestamp
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document
    pub fn new(
        filename: String,
        file_type: FileType,
        mime_type: String,
        content: String,
        content_hash: String,
        file_size: u64,
        classification: Classification,
    ) -> Self {
        let word_count = content.split_whitespace().count();
        Self {
            id: Uuid::new_v4(),
            filename,
            file_type,
            mime_type,
            content,
            content_hash,
            file_size,
            total_pages: None,
            word_count,
            classification,
            uploaded_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_mime() {
        assert_eq!(FileType::from_mime("application/pdf"), FileType::Pdf);
        assert_eq!(FileType::from_mime(DOCX_MIME), FileType::Docx);
        assert_eq!(FileType::from_mime("text/plain; charset=utf-8"), FileType::Txt);
        assert_eq!(FileType::from_mime("image/png"), FileType::Unknown);
    }

    #[test]
    fn test_classification_display() {
        let c = Classification {
            label: DocumentLabel::LeaseAgreement,
            keywords_matched: 4,
        };
        assert_eq!(c.to_string(), "Lease Agreement (Confidence: 4 keywords matched)");
        assert_eq!(
            Classification::general().to_string(),
            "General Legal Document (No specific type identified)"
        );
    }
}
