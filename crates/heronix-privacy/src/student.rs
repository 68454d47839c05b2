//! Student record sanitization for outbound device payloads

use crate::engine::{append_metadata, first_string, first_value, Sanitizer};
use crate::transform;
use heronix_core::{Capability, DeviceIdentity};
use serde_json::{Map, Value};
use tracing::debug;

impl Sanitizer {
    /// Sanitize a student record for one device.
    ///
    /// Output is allowlist-shaped: `reference_id` is always present; basic
    /// and contact categories appear only under the matching capability.
    /// SSN, full address, birth date, and medical fields are never emitted,
    /// irrespective of permissions.
    pub fn sanitize_student(
        &self,
        record: &Map<String, Value>,
        device: &dyn DeviceIdentity,
    ) -> Map<String, Value> {
        let mut out = Map::new();

        let student_id = first_string(record, &["studentId", "student_id"]);
        out.insert(
            "reference_id".to_string(),
            Value::String(
                self.pseudonyms()
                    .derive(student_id.as_deref(), device.device_id()),
            ),
        );

        if device.has_permission(Capability::StudentBasicInfo) {
            let first = first_string(record, &["firstName", "first_name"]);
            let last = first_string(record, &["lastName", "last_name"]);
            if let Some(name) = display_name(first.as_deref(), last.as_deref()) {
                out.insert("student_name".to_string(), Value::String(name));
            }
            if let Some(grade) = first_value(record, &["gradeLevel", "grade_level"]) {
                out.insert("grade_level".to_string(), grade.clone());
            }
        } else {
            debug!(
                device_id = device.device_id(),
                "basic info withheld, device lacks STUDENT_BASIC_INFO"
            );
        }

        if device.has_permission(Capability::StudentContactInfo) {
            if let Some(email) = first_string(record, &["parentEmail", "parent_email"]) {
                out.insert(
                    "contact_email".to_string(),
                    Value::String(transform::mask_email(&email)),
                );
            }
            if let Some(phone) = first_string(record, &["parentPhone", "parent_phone"]) {
                out.insert(
                    "contact_phone".to_string(),
                    Value::String(transform::mask_phone(&phone)),
                );
            }
        } else {
            debug!(
                device_id = device.device_id(),
                "contact info withheld, device lacks STUDENT_CONTACT_INFO"
            );
        }

        append_metadata(&mut out);
        out
    }
}

/// `<first initial>. <last name>`, with empty parts omitted.
fn display_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let initial = first
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.chars().next());
    let last = last.map(str::trim).filter(|s| !s.is_empty());

    match (initial, last) {
        (Some(i), Some(l)) => Some(format!("{}. {}", i, l)),
        (Some(i), None) => Some(format!("{}.", i)),
        (None, Some(l)) => Some(l.to_string()),
        (None, None) => None,
    }
}
