use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Data categories a registered device may be granted access to.
///
/// Capabilities are granted at registration time and checked before any
/// field category is emitted; a missing capability drops the category or
/// empties the payload, it never fails the call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capability {
    StudentBasicInfo,
    StudentContactInfo,
    StudentAttendance,
    StudentGrades,
    AggregateStatistics,
    ScheduleData,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::StudentBasicInfo => write!(f, "STUDENT_BASIC_INFO"),
            Capability::StudentContactInfo => write!(f, "STUDENT_CONTACT_INFO"),
            Capability::StudentAttendance => write!(f, "STUDENT_ATTENDANCE"),
            Capability::StudentGrades => write!(f, "STUDENT_GRADES"),
            Capability::AggregateStatistics => write!(f, "AGGREGATE_STATISTICS"),
            Capability::ScheduleData => write!(f, "SCHEDULE_DATA"),
        }
    }
}

/// Narrow view of a registered device as consumed by the sanitizer.
///
/// The device registry is an external collaborator; the sanitizer only ever
/// asks for the stable device id, the device type tag, and capability
/// membership.
pub trait DeviceIdentity: Send + Sync {
    fn device_id(&self) -> &str;

    fn device_type(&self) -> &str;

    fn has_permission(&self, capability: Capability) -> bool;
}

/// Registry snapshot of a device and its granted capability set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredDevice {
    pub device_id: String,
    pub device_type: String,
    pub capabilities: HashSet<Capability>,
}

impl RegisteredDevice {
    pub fn new(
        device_id: impl Into<String>,
        device_type: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            device_type: device_type.into(),
            capabilities: capabilities.into_iter().collect(),
        }
    }
}

impl DeviceIdentity for RegisteredDevice {
    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn device_type(&self) -> &str {
        &self.device_type
    }

    fn has_permission(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
