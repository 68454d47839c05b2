use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Delivery channel for an outbound notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Email,
    Sms,
    Push,
}

/// Delivery priority for an outbound notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Default for NotificationPriority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Outbound notification payload.
///
/// Recipient address fields are required for delivery and survive
/// sanitization verbatim; subject, body, and template variables are scrubbed
/// before the payload leaves the trust boundary, and attachments are dropped
/// wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationContent {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub recipient_email: String,
    pub recipient_phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub template_id: Option<String>,
    #[serde(default)]
    pub template_variables: Map<String, Value>,
    #[serde(default)]
    pub priority: NotificationPriority,
    /// Opaque attachment maps; never inspected, always dropped on output.
    #[serde(default)]
    pub attachments: Vec<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_round_trips_through_json() {
        let content = NotificationContent {
            notification_type: NotificationType::Email,
            recipient_email: "parent@example.org".to_string(),
            recipient_phone: None,
            subject: "Attendance update".to_string(),
            body: "Your student was marked present.".to_string(),
            template_id: Some("attendance-v2".to_string()),
            template_variables: Map::new(),
            priority: NotificationPriority::High,
            attachments: vec![],
        };

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "EMAIL");
        assert_eq!(json["priority"], "HIGH");

        let parsed: NotificationContent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.recipient_email, "parent@example.org");
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let parsed: NotificationContent = serde_json::from_value(json!({
            "type": "SMS",
            "recipient_email": "parent@example.org",
            "recipient_phone": "555-123-4567",
            "subject": "Reminder",
            "body": "School closes early today.",
            "template_id": null
        }))
        .unwrap();

        assert_eq!(parsed.notification_type, NotificationType::Sms);
        assert_eq!(parsed.priority, NotificationPriority::Normal);
        assert!(parsed.template_variables.is_empty());
        assert!(parsed.attachments.is_empty());
    }
}
