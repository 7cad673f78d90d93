//! Prompt templates for the completion endpoint.
//!
//! Every builder is a pure function over session fields. Empty inputs
//! degrade to minimal prompts; none of the builders can fail.

use crate::session::{ClaimType, FormField};

/// Closed set of document-type labels the classifier chooses from.
pub const CANDIDATE_DOCUMENT_TYPES: [&str; 9] = [
    "Hospital Bill",
    "Discharge Summary",
    "Doctor's Report",
    "Police Report",
    "Vehicle Image",
    "Medical Report",
    "Flight Ticket",
    "Passport Copy",
    "Lost Baggage Report",
];

/// Ask the model to pick one document-type label for the extracted text.
pub fn classification(extracted_text: &str) -> String {
    format!(
        "Classify the type of this document based on its content. Choose from: {}.\n\n\
         Document Text:\n{}",
        CANDIDATE_DOCUMENT_TYPES.join(", "),
        extracted_text
    )
}

/// Ask the model to draft a formal claim letter from the filled-in fields.
///
/// Fields arrive already filtered to non-empty values in display order;
/// absent fields are omitted entirely rather than rendered as placeholders.
pub fn letter(fields: &[(FormField, &str)]) -> String {
    let body = fields
        .iter()
        .map(|(field, value)| format!("{}: {}", field.letter_label(), value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Write a formal insurance claim letter using the following details. \
         Only include what is given:\n\n{}\n\n\
         The tone should be polite, formal, and easy to understand.",
        body
    )
}

/// Ask the model for a payout estimate in INR with a short justification.
pub fn estimation(
    claim_type: ClaimType,
    fields: &[(FormField, &str)],
    extracted_text: &str,
) -> String {
    let mut lines = vec![format!("Claim Type: {}", claim_type.label())];

    if let Some(location) = field_value(fields, FormField::Location) {
        lines.push(format!("Incident Location: {location}"));
    }
    if let Some(date) = field_value(fields, FormField::IncidentDate) {
        lines.push(format!("Date: {date}"));
    }
    if let Some(persons) = field_value(fields, FormField::PersonsInvolved) {
        lines.push(format!("People Involved: {persons}"));
    }
    let contact: Vec<&str> = [
        field_value(fields, FormField::ContactEmail),
        field_value(fields, FormField::ContactPhone),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !contact.is_empty() {
        lines.push(format!("Claimant Contact: {}", contact.join(", ")));
    }
    if let Some(damage) = field_value(fields, FormField::DamageDescription) {
        lines.push(format!("Damage Summary: {damage}"));
    }
    if let Some(estimate) = field_value(fields, FormField::EstimatedExpenses) {
        lines.push(format!("Estimated by User: {estimate}"));
    }
    if !extracted_text.trim().is_empty() {
        lines.push(format!("Extracted Document Content: {extracted_text}"));
    }

    format!(
        "You are an experienced insurance claim analyst. Based on the following claim \
         details, provide an estimated insurance payout in INR along with a brief \
         justification.\n\n\
         Use average Indian repair and treatment costs and similar real-world cases to \
         inform your estimate. Be reasonable and avoid exaggeration.\n\n\
         ---\n\n{}\n\n---\n\n\
         Respond in the following format:\n\n\
         1. Estimated Amount (INR): \u{20b9}_____\n\
         2. Reason for Estimate: ___",
        lines.join("\n")
    )
}

/// Ask the model to point out suspicious indicators in the document text.
pub fn fraud_check(extracted_text: &str) -> String {
    format!(
        "You are an insurance fraud analyst. Review the following claim document text \
         and list any indicators that look suspicious or inconsistent, such as altered \
         amounts, mismatched dates, or implausible details. If nothing stands out, say \
         that no obvious fraud indicators were found.\n\n\
         Document Text:\n{}",
        extracted_text
    )
}

/// Build the chat prompt: a context block of everything the claimant has
/// entered so far, then the running question.
pub fn chat(fields: &[(FormField, &str)], question: &str) -> String {
    let context_info = fields
        .iter()
        .map(|(field, value)| format!("{}: {}", field.chat_label(), value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful insurance assistant. Use the user's previous inputs if helpful.\n\n\
         User Inputs:\n{}\n\n\
         Question:\n{}",
        context_info, question
    )
}

fn field_value<'a>(fields: &[(FormField, &'a str)], want: FormField) -> Option<&'a str> {
    fields
        .iter()
        .find(|(field, _)| *field == want)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_prompt_omits_empty_fields() {
        let prompt = letter(&[(FormField::Location, "Mumbai")]);

        assert!(prompt.contains("Location: Mumbai"));
        for field in FormField::DISPLAY_ORDER {
            if field == FormField::Location {
                continue;
            }
            assert!(
                !prompt.contains(&format!("{}:", field.letter_label())),
                "unexpected label for {:?}",
                field
            );
        }
        // Exactly one field line sits between the two instruction blocks.
        let field_lines: Vec<&str> = prompt
            .lines()
            .filter(|line| line.contains(": ") && !line.starts_with("Write"))
            .collect();
        assert_eq!(field_lines, vec!["Location: Mumbai"]);
    }

    #[test]
    fn classification_prompt_lists_all_candidate_labels() {
        let prompt = classification("some scanned text");
        for label in CANDIDATE_DOCUMENT_TYPES {
            assert!(prompt.contains(label));
        }
        assert!(prompt.contains("some scanned text"));
    }

    #[test]
    fn estimation_prompt_skips_missing_details() {
        let prompt = estimation(
            ClaimType::Accident,
            &[(FormField::Location, "Pune")],
            "",
        );
        assert!(prompt.contains("Claim Type: Accident"));
        assert!(prompt.contains("Incident Location: Pune"));
        assert!(!prompt.contains("Claimant Contact"));
        assert!(!prompt.contains("Extracted Document Content"));
        assert!(prompt.contains("Estimated Amount (INR)"));
    }

    #[test]
    fn estimation_prompt_joins_contact_parts() {
        let prompt = estimation(
            ClaimType::Health,
            &[
                (FormField::ContactEmail, "a@b.in"),
                (FormField::ContactPhone, "98765"),
            ],
            "",
        );
        assert!(prompt.contains("Claimant Contact: a@b.in, 98765"));
    }

    #[test]
    fn chat_prompt_uses_capitalized_keys() {
        let prompt = chat(
            &[(FormField::PersonsInvolved, "self")],
            "What documents do I need?",
        );
        assert!(prompt.contains("Persons involved: self"));
        assert!(prompt.contains("Question:\nWhat documents do I need?"));
    }

    #[test]
    fn builders_degrade_on_empty_input() {
        assert!(classification("").contains("Choose from"));
        assert!(letter(&[]).contains("formal insurance claim letter"));
        assert!(fraud_check("").contains("fraud analyst"));
        assert!(chat(&[], "hi").contains("Question:\nhi"));
    }
}
