//! Value transformers: maskers and free-form pattern redaction

use crate::patterns::PatternLibrary;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const EMAIL_REDACTED: &str = "[EMAIL REDACTED]";
pub const PHONE_REDACTED: &str = "[PHONE REDACTED]";
pub const DOB_REDACTED: &str = "[DOB REDACTED]";
pub const ADDRESS_REDACTED: &str = "[ADDRESS REDACTED]";
pub const ID_REDACTED: &str = "[ID REDACTED]";
pub const SSN_SENTINEL: &str = "[SSN-REDACTED]";
pub const IP_SENTINEL: &str = "[IP-REDACTED]";

/// Mask an email address, keeping a two-character local prefix and the
/// domain's final label (`jane.doe@school.example.org` → `ja***@***.org`).
pub fn mask_email(email: &str) -> String {
    let Some(at_pos) = email.find('@') else {
        return EMAIL_REDACTED.to_string();
    };
    let (local, domain_with_at) = email.split_at(at_pos);
    let domain = &domain_with_at[1..];

    let masked_local = if local.chars().count() < 3 {
        "***".to_string()
    } else {
        let prefix: String = local.chars().take(2).collect();
        format!("{}***", prefix)
    };

    let masked_domain = match domain.rfind('.') {
        Some(dot_pos) => format!("***{}", &domain[dot_pos..]),
        None => "***".to_string(),
    };

    format!("{}@{}", masked_local, masked_domain)
}

/// Mask a phone number down to its last four digits
/// (`(555) 123-4567` → `***-***-4567`).
pub fn mask_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 10 {
        format!("***-***-{}", &digits[digits.len() - 4..])
    } else {
        PHONE_REDACTED.to_string()
    }
}

/// Mask a birth date down to its year (`2012-03-14` → `2012-**-**`).
pub fn mask_birth_date(value: &str) -> String {
    let year: String = value.chars().take(4).collect();
    if year.chars().count() == 4 && year.parse::<i32>().is_ok() {
        format!("{}-**-**", year)
    } else {
        DOB_REDACTED.to_string()
    }
}

/// Mask a student identifier behind a stable 32-bit hash tag.
///
/// Deterministic within a process; carries no requirement to match any
/// foreign hash.
pub fn mask_student_id(value: &str) -> String {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    format!("[ID:{:x}]", hasher.finish() as u32)
}

/// Scrub SSN and IPv4 literals out of a pass-through string.
pub fn redact_pass_through(text: &str, patterns: &PatternLibrary) -> String {
    let text = patterns.ssn().replace_all(text, SSN_SENTINEL);
    patterns.ipv4().replace_all(&text, IP_SENTINEL).to_string()
}
