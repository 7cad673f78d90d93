//! Required-document checklist matching.
//!
//! Matching is case-insensitive substring containment against the free-text
//! classification result. The model rarely returns a canonical name exactly
//! (it tends to embed "Hospital Bill" in a sentence), so containment is the
//! accepted heuristic here, not a placeholder for strict parsing.

use crate::session::ClaimType;

/// The three supporting documents expected for a claim type, in the order
/// they are shown to the claimant.
pub fn required_documents(claim_type: ClaimType) -> [&'static str; 3] {
    match claim_type {
        ClaimType::Health => ["Hospital Bill", "Discharge Summary", "Doctor's Report"],
        ClaimType::Accident => ["Police Report", "Vehicle Images", "Medical Report"],
        ClaimType::Travel => ["Flight Ticket", "Passport Copy", "Lost Baggage Report"],
    }
}

/// Subset of the claim type's required documents not mentioned in the
/// detected document type. An empty result means everything required
/// appears to be present.
pub fn missing_documents(claim_type: ClaimType, detected_document_type: &str) -> Vec<&'static str> {
    let haystack = detected_document_type.to_lowercase();
    required_documents(claim_type)
        .into_iter()
        .filter(|name| !haystack.contains(&name.to_lowercase()))
        .collect()
}
