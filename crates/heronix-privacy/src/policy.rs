//! Field-level policy tables and the drop/mask/pass classifier

use crate::context::SanitizationContext;

/// Lowercase substring tokens that drop a field at any depth, regardless of
/// its value type.
pub const ALWAYS_REMOVE: &[&str] = &[
    "ssn",
    "social_security_number",
    "password",
    "password_hash",
    "pin",
    "pin_code",
    "security_question",
    "security_answer",
    "internal_id",
    "system_id",
    "database_id",
    "db_id",
    "server_ip",
    "host_ip",
    "mac_address",
    "gps_coordinates",
    "latitude",
    "longitude",
    "ip_address",
    "client_ip",
];

/// Masker routing table; first contained token wins.
const MASKABLE: &[(&str, MaskKind)] = &[
    ("email", MaskKind::Email),
    ("phone", MaskKind::Phone),
    ("address", MaskKind::Address),
    ("birth", MaskKind::BirthDate),
    ("dob", MaskKind::BirthDate),
    ("student_id", MaskKind::StudentId),
];

/// Structural field tokens that remain pass-through inside sensitive record
/// types when strict mode is active; everything else unknown is dropped.
const STRICT_PASS_ALLOW: &[&str] = &[
    "grade", "level", "status", "date", "period", "range", "type", "count", "total", "average",
    "score", "subject", "term", "year",
];

/// Masker selected for a field routed to `FieldAction::Mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    Email,
    Phone,
    Address,
    BirthDate,
    StudentId,
}

/// Per-field decision of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    Drop,
    Mask(MaskKind),
    Pass,
}

/// Field classifier over the process-wide policy tables.
///
/// Matching is substring-on-lowercase, intentionally permissive to catch
/// naming-convention variants (`phoneNumber`, `phone_number`,
/// `mobilePhone`). Matching is additionally underscore-insensitive so
/// camelCase forms of droplisted names (`internalId`) cannot slip through.
#[derive(Debug, Clone)]
pub struct FieldPolicy {
    remove_tokens: Vec<TokenForms>,
}

#[derive(Debug, Clone)]
struct TokenForms {
    token: String,
    compact: String,
}

impl TokenForms {
    fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            compact: token.replace('_', ""),
        }
    }

    fn matches(&self, lower: &str, compact: &str) -> bool {
        lower.contains(self.token.as_str()) || compact.contains(self.compact.as_str())
    }
}

impl FieldPolicy {
    /// Build the policy from the seed table plus deployment-wide extra
    /// removal tokens.
    pub fn new(extra_remove_tokens: &[String]) -> Self {
        let remove_tokens = ALWAYS_REMOVE
            .iter()
            .copied()
            .chain(extra_remove_tokens.iter().map(String::as_str))
            .map(TokenForms::new)
            .collect();
        Self { remove_tokens }
    }

    /// Classify a field name under the given context.
    pub fn classify(&self, field: &str, context: &SanitizationContext) -> FieldAction {
        let lower = field.to_lowercase();
        let compact: String = lower.chars().filter(|c| *c != '_').collect();

        if self.remove_tokens.iter().any(|t| t.matches(&lower, &compact)) {
            return FieldAction::Drop;
        }
        for token in &context.additional_fields_to_remove {
            if TokenForms::new(token).matches(&lower, &compact) {
                return FieldAction::Drop;
            }
        }

        for (token, kind) in MASKABLE {
            if TokenForms::new(token).matches(&lower, &compact) {
                return FieldAction::Mask(*kind);
            }
        }

        if context.strict_mode
            && context.data_type.is_sensitive()
            && !STRICT_PASS_ALLOW.iter().any(|t| lower.contains(t))
        {
            return FieldAction::Drop;
        }

        FieldAction::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DataType, TransmissionPurpose};

    fn lenient_context() -> SanitizationContext {
        SanitizationContext::new(DataType::Notification, TransmissionPurpose::ParentNotification)
    }

    fn strict_student_context() -> SanitizationContext {
        SanitizationContext::new(DataType::StudentRecord, TransmissionPurpose::DistrictSync)
    }

    #[test]
    fn droplist_tokens_match_as_substrings() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context();

        assert_eq!(policy.classify("ssn", &ctx), FieldAction::Drop);
        assert_eq!(policy.classify("student_ssn", &ctx), FieldAction::Drop);
        assert_eq!(policy.classify("password_hash", &ctx), FieldAction::Drop);
        assert_eq!(policy.classify("gps_coordinates", &ctx), FieldAction::Drop);
    }

    #[test]
    fn droplist_matching_ignores_underscores() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context();

        assert_eq!(policy.classify("internalId", &ctx), FieldAction::Drop);
        assert_eq!(policy.classify("clientIp", &ctx), FieldAction::Drop);
        assert_eq!(policy.classify("macAddress", &ctx), FieldAction::Drop);
    }

    #[test]
    fn maskable_tokens_route_to_the_right_masker() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context();

        assert_eq!(
            policy.classify("phoneNumber", &ctx),
            FieldAction::Mask(MaskKind::Phone)
        );
        assert_eq!(
            policy.classify("phone_number", &ctx),
            FieldAction::Mask(MaskKind::Phone)
        );
        assert_eq!(
            policy.classify("mobilePhone", &ctx),
            FieldAction::Mask(MaskKind::Phone)
        );
        assert_eq!(
            policy.classify("contactEmail", &ctx),
            FieldAction::Mask(MaskKind::Email)
        );
        assert_eq!(
            policy.classify("homeAddress", &ctx),
            FieldAction::Mask(MaskKind::Address)
        );
        assert_eq!(
            policy.classify("dateOfBirth", &ctx),
            FieldAction::Mask(MaskKind::BirthDate)
        );
        assert_eq!(
            policy.classify("dob", &ctx),
            FieldAction::Mask(MaskKind::BirthDate)
        );
        assert_eq!(
            policy.classify("studentId", &ctx),
            FieldAction::Mask(MaskKind::StudentId)
        );
    }

    #[test]
    fn email_wins_over_address_for_email_address_fields() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context();
        assert_eq!(
            policy.classify("email_address", &ctx),
            FieldAction::Mask(MaskKind::Email)
        );
    }

    #[test]
    fn droplist_beats_masking() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context();
        // "server_ip_address" contains both a droplist and a maskable token
        assert_eq!(policy.classify("server_ip_address", &ctx), FieldAction::Drop);
    }

    #[test]
    fn unmatched_fields_pass_in_lenient_contexts() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context();
        assert_eq!(policy.classify("subject", &ctx), FieldAction::Pass);
        assert_eq!(policy.classify("gradeLevel", &ctx), FieldAction::Pass);
    }

    #[test]
    fn additional_context_tokens_extend_the_droplist() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context().with_additional_fields(["homeroom"]);
        assert_eq!(policy.classify("homeroomTeacher", &ctx), FieldAction::Drop);
    }

    #[test]
    fn deployment_tokens_extend_the_droplist() {
        let policy = FieldPolicy::new(&["legacy_key".to_string()]);
        let ctx = lenient_context();
        assert_eq!(policy.classify("legacyKey", &ctx), FieldAction::Drop);
    }

    #[test]
    fn strict_mode_drops_unknown_fields_in_sensitive_records() {
        let policy = FieldPolicy::new(&[]);
        let strict = strict_student_context();

        assert_eq!(policy.classify("counselorNotes", &strict), FieldAction::Drop);
        // Structural fields still pass
        assert_eq!(policy.classify("gradeLevel", &strict), FieldAction::Pass);
        assert_eq!(policy.classify("status", &strict), FieldAction::Pass);

        let lenient = strict_student_context().with_strict_mode(false);
        assert_eq!(
            policy.classify("counselorNotes", &lenient),
            FieldAction::Pass
        );
    }

    #[test]
    fn strict_mode_leaves_non_sensitive_data_types_alone() {
        let policy = FieldPolicy::new(&[]);
        let ctx = lenient_context();
        assert!(ctx.strict_mode);
        assert_eq!(policy.classify("freeformNote", &ctx), FieldAction::Pass);
    }
}
