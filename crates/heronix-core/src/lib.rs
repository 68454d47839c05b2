pub mod config;
pub mod device;
pub mod error;
pub mod notification;

pub use config::PrivacyConfig;
pub use device::{Capability, DeviceIdentity, RegisteredDevice};
pub use error::{HeronixError, Result};
pub use notification::{NotificationContent, NotificationPriority, NotificationType};
