//! Attendance record sanitization

use crate::engine::{append_metadata, first_string, first_value, Sanitizer};
use heronix_core::{Capability, DeviceIdentity};
use serde_json::{Map, Value};
use tracing::debug;

impl Sanitizer {
    /// Sanitize an attendance record for one device.
    ///
    /// Requires `STUDENT_ATTENDANCE`; without it the output is empty. Only
    /// the pseudonymous student reference, the calendar date, and the
    /// status survive. Times, locations, class periods, and teacher names
    /// are never emitted.
    pub fn sanitize_attendance(
        &self,
        record: &Map<String, Value>,
        device: &dyn DeviceIdentity,
    ) -> Map<String, Value> {
        if !device.has_permission(Capability::StudentAttendance) {
            debug!(
                device_id = device.device_id(),
                "attendance withheld, device lacks STUDENT_ATTENDANCE"
            );
            return Map::new();
        }

        let mut out = Map::new();

        let student_id = first_string(record, &["studentId", "student_id"]);
        out.insert(
            "student_ref".to_string(),
            Value::String(
                self.pseudonyms()
                    .derive(student_id.as_deref(), device.device_id()),
            ),
        );

        if let Some(date) = first_string(record, &["date", "attendanceDate", "attendance_date"]) {
            out.insert("date".to_string(), Value::String(date_only(&date)));
        }
        if let Some(status) = first_value(record, &["status"]) {
            out.insert("status".to_string(), status.clone());
        }

        append_metadata(&mut out);
        out
    }
}

/// Strip the time component from an ISO-8601 date-time, if present.
fn date_only(raw: &str) -> String {
    raw.split(['T', ' ']).next().unwrap_or(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use heronix_core::{PrivacyConfig, RegisteredDevice};
    use serde_json::json;

    fn sanitizer() -> Sanitizer {
        Sanitizer::new(&PrivacyConfig::default()).unwrap()
    }

    fn record() -> Map<String, Value> {
        json!({
            "studentId": "S100",
            "date": "2024-09-18T08:15:00",
            "status": "PRESENT",
            "arrivalTime": "08:15",
            "classroom": "12B",
            "period": 3,
            "teacherName": "Ms. Alvarez"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn requires_the_attendance_capability() {
        let device = RegisteredDevice::new("D1", "parent_app", [Capability::StudentBasicInfo]);
        let out = sanitizer().sanitize_attendance(&record(), &device);
        assert!(out.is_empty());
    }

    #[test]
    fn emits_reference_date_and_status_only() {
        let device = RegisteredDevice::new("D1", "parent_app", [Capability::StudentAttendance]);
        let out = sanitizer().sanitize_attendance(&record(), &device);

        assert!(out["student_ref"].as_str().unwrap().starts_with("REF-"));
        assert_eq!(out["date"], "2024-09-18");
        assert_eq!(out["status"], "PRESENT");
        assert_eq!(out["_sanitized"], true);

        for key in ["arrivalTime", "classroom", "period", "teacherName", "studentId"] {
            assert!(out.get(key).is_none(), "{} leaked", key);
        }
    }

    #[test]
    fn date_only_values_pass_unchanged() {
        let device = RegisteredDevice::new("D1", "parent_app", [Capability::StudentAttendance]);
        let mut rec = record();
        rec.insert("date".to_string(), json!("2024-09-18"));
        let out = sanitizer().sanitize_attendance(&rec, &device);
        assert_eq!(out["date"], "2024-09-18");
    }

    #[test]
    fn space_separated_date_times_are_stripped() {
        assert_eq!(date_only("2024-09-18 08:15:00"), "2024-09-18");
        assert_eq!(date_only("2024-09-18T08:15:00"), "2024-09-18");
        assert_eq!(date_only("2024-09-18"), "2024-09-18");
    }

    #[test]
    fn pseudonym_matches_the_student_sanitizer() {
        let device = RegisteredDevice::new(
            "D1",
            "parent_app",
            [Capability::StudentAttendance, Capability::StudentBasicInfo],
        );
        let s = sanitizer();

        let attendance_ref = s.sanitize_attendance(&record(), &device)["student_ref"].clone();
        let student = json!({ "studentId": "S100" }).as_object().unwrap().clone();
        let student_ref = s.sanitize_student(&student, &device)["reference_id"].clone();

        assert_eq!(attendance_ref, student_ref);
    }
}
