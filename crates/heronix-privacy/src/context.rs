//! Contextual envelope selecting sanitization policy

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category of record flowing through the gateway.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    StudentRecord,
    AttendanceRecord,
    GradeRecord,
    Notification,
    AggregateReport,
    ScheduleData,
    ComplianceReport,
}

impl DataType {
    /// Record types carrying per-student PII; strict mode applies its
    /// unknown-field drop rule only to these.
    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            DataType::StudentRecord
                | DataType::AttendanceRecord
                | DataType::GradeRecord
                | DataType::ComplianceReport
        )
    }
}

/// Why a payload is leaving the trust boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransmissionPurpose {
    ParentNotification,
    DistrictSync,
    StateReporting,
    Backup,
    Analytics,
    Audit,
}

/// Immutable per-call envelope selecting sanitization policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizationContext {
    pub data_type: DataType,
    pub purpose: TransmissionPurpose,

    /// Lowercase tokens extending the removal list for this call.
    pub additional_fields_to_remove: HashSet<String>,

    /// When set, unknown fields inside sensitive record types default to
    /// drop rather than pass.
    pub strict_mode: bool,

    /// Tag the output root with `_sanitized` / `_sanitizedAt` /
    /// `_sanitizationVersion`.
    pub include_metadata: bool,
}

impl SanitizationContext {
    pub fn new(data_type: DataType, purpose: TransmissionPurpose) -> Self {
        Self {
            data_type,
            purpose,
            additional_fields_to_remove: HashSet::new(),
            strict_mode: true,
            include_metadata: true,
        }
    }

    /// Context for payloads delivered to parent-facing devices.
    pub fn parent_notification() -> Self {
        Self::new(
            DataType::Notification,
            TransmissionPurpose::ParentNotification,
        )
    }

    /// Context for records synchronized to the district office.
    pub fn district_sync() -> Self {
        Self::new(DataType::StudentRecord, TransmissionPurpose::DistrictSync)
    }

    /// Context for compliance submissions to the state.
    pub fn state_reporting() -> Self {
        Self::new(
            DataType::ComplianceReport,
            TransmissionPurpose::StateReporting,
        )
    }

    pub fn with_additional_fields<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_fields_to_remove
            .extend(tokens.into_iter().map(|t| t.into().to_lowercase()));
        self
    }

    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    pub fn with_metadata(mut self, include_metadata: bool) -> Self {
        self.include_metadata = include_metadata;
        self
    }
}
