//! Keyword-count document classification

use crate::types::{Classification, DocumentLabel};

/// Keywords counted for each label
fn keywords(label: DocumentLabel) -> &'static [&'static str] {
    match label {
        DocumentLabel::LegalContract => &[
            "contract",
            "agreement",
            "party",
            "whereas",
            "hereby",
            "covenant",
            "obligations",
        ],
        DocumentLabel::InsurancePolicy => &[
            "policy",
            "coverage",
            "premium",
            "deductible",
            "claim",
            "insured",
            "beneficiary",
        ],
        DocumentLabel::LeaseAgreement => &[
            "lease",
            "rent",
            "tenant",
            "landlord",
            "premises",
            "rental",
            "occupancy",
        ],
        DocumentLabel::EmploymentDocument => &[
            "employment",
            "employee",
            "employer",
            "salary",
            "compensation",
            "benefits",
            "termination",
        ],
        DocumentLabel::LegalWill => &[
            "will",
            "testament",
            "beneficiary",
            "estate",
            "inheritance",
            "executor",
            "bequest",
        ],
        DocumentLabel::NonDisclosureAgreement => &[
            "confidential",
            "nda",
            "proprietary",
            "disclosure",
            "confidentiality",
        ],
        DocumentLabel::ServiceAgreement => &[
            "services",
            "provider",
            "client",
            "deliverables",
            "scope",
            "performance",
        ],
        DocumentLabel::PurchaseAgreement => &[
            "purchase",
            "sale",
            "buyer",
            "seller",
            "goods",
            "merchandise",
            "delivery",
        ],
        DocumentLabel::PartnershipAgreement => &[
            "partnership",
            "partner",
            "joint",
            "venture",
            "collaboration",
            "profit sharing",
        ],
        DocumentLabel::LicenseAgreement => &[
            "license",
            "licensing",
            "intellectual property",
            "rights",
            "usage",
            "royalty",
        ],
        DocumentLabel::CourtDocument => &[
            "court",
            "judge",
            "plaintiff",
            "defendant",
            "lawsuit",
            "hearing",
            "verdict",
        ],
        DocumentLabel::LegalNotice => &[
            "notice",
            "notification",
            "inform",
            "hereby notify",
            "warning",
            "demand",
        ],
        DocumentLabel::TermsAndConditions => &[
            "terms",
            "conditions",
            "service",
            "privacy",
            "user agreement",
            "acceptable use",
        ],
        DocumentLabel::GeneralLegalDocument => &[],
    }
}

/// Classify a document by counting label keywords (substring matches).
///
/// The highest positive score wins; ties go to the earlier label in
/// [`DocumentLabel::ALL`]. No match at all yields the general label.
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();
    let mut best = Classification::general();

    for label in DocumentLabel::ALL {
        let score = keywords(label)
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .count();
        if score > best.keywords_matched {
            best = Classification {
                label,
                keywords_matched: score,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_is_detected() {
        let text = "This Lease is made between the Landlord and the Tenant. \
                    Monthly rent for the premises is due on the first.";
        let classification = classify(text);
        assert_eq!(classification.label, DocumentLabel::LeaseAgreement);
        assert_eq!(classification.keywords_matched, 5);
        assert_eq!(
            classification.to_string(),
            "Lease Agreement (Confidence: 5 keywords matched)"
        );
    }

    #[test]
    fn test_no_keywords_is_general() {
        let classification = classify("Lorem ipsum dolor sit amet.");
        assert_eq!(classification, Classification::general());
        assert_eq!(
            classification.to_string(),
            "General Legal Document (No specific type identified)"
        );
        assert_eq!(classify(""), Classification::general());
    }

    #[test]
    fn test_tie_goes_to_earlier_label() {
        // one contract keyword, one insurance keyword
        let classification = classify("agreement premium");
        assert_eq!(classification.label, DocumentLabel::LegalContract);
        assert_eq!(classification.keywords_matched, 1);
    }

    #[test]
    fn test_result_is_always_a_known_label() {
        for text in ["", "court judge verdict", "nda", "random words only", "ÄÖÜ ß"] {
            let classification = classify(text);
            assert!(DocumentLabel::ALL.contains(&classification.label));
            assert_eq!(
                classification.keywords_matched == 0,
                classification.label == DocumentLabel::GeneralLegalDocument
            );
        }
    }
}
