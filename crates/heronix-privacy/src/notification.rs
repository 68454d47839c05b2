//! Outbound notification sanitization

use crate::engine::Sanitizer;
use heronix_core::{DeviceIdentity, NotificationContent};
use serde_json::Value;
use tracing::debug;

const SUBJECT_REDACTED: &str = "[REDACTED]";
const SUBJECT_SCHOOL: &str = "[SCHOOL]";
const BODY_SSN: &str = "[SSN-REDACTED]";
const BODY_SCHOOL_ADDRESS: &str = "[SCHOOL ADDRESS]";
const BODY_PHONE: &str = "[PHONE REDACTED]";
const INTERNAL: &str = "[INTERNAL]";

impl Sanitizer {
    /// Sanitize a notification before delivery.
    ///
    /// Recipient address fields are kept verbatim (the transport needs
    /// them); subject, body, and string template variables are scrubbed of
    /// PII and internal infrastructure references; attachments are dropped
    /// wholesale.
    pub fn sanitize_notification(
        &self,
        notification: &NotificationContent,
        device: &dyn DeviceIdentity,
    ) -> NotificationContent {
        let mut out = notification.clone();

        out.subject = self.redact_subject(&notification.subject);
        out.body = self.redact_body(&notification.body);
        out.template_variables = notification
            .template_variables
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key.clone(), Value::String(self.redact_body(s))),
                other => (key.clone(), other.clone()),
            })
            .collect();
        out.attachments = Vec::new();

        debug!(
            device_id = device.device_id(),
            notification_type = ?notification.notification_type,
            dropped_attachments = notification.attachments.len(),
            "notification sanitized"
        );

        out
    }

    fn redact_subject(&self, text: &str) -> String {
        let text = self.redact_school_info(text);
        let text = self.patterns().ssn().replace_all(&text, SUBJECT_REDACTED);
        let text = self.patterns().address().replace_all(&text, SUBJECT_SCHOOL);
        self.patterns().ipv4().replace_all(&text, INTERNAL).to_string()
    }

    fn redact_body(&self, text: &str) -> String {
        let text = self.redact_school_info(text);
        let text = self.patterns().ssn().replace_all(&text, BODY_SSN);
        let text = self.patterns().phone().replace_all(&text, BODY_PHONE);
        let text = self
            .patterns()
            .address()
            .replace_all(&text, BODY_SCHOOL_ADDRESS);
        self.patterns().ipv4().replace_all(&text, INTERNAL).to_string()
    }

    /// Replace `server:`/`database:`/`schema:` references, keeping the
    /// label as written.
    fn redact_school_info(&self, text: &str) -> String {
        self.patterns()
            .school_info()
            .replace_all(text, |caps: &regex::Captures| {
                format!("{}: {}", &caps[1], INTERNAL)
            })
            .to_string()
    }
}
