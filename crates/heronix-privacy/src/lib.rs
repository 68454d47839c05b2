//! # Heronix Privacy
//!
//! Data sanitization gateway for outbound Heronix records. Every payload
//! leaving the trust boundary of the student information system (parent
//! notifications, district synchronization, state reporting, analytics,
//! backup, audit) is funneled through this crate before transmission.
//!
//! ## Features
//!
//! - **Field Policy**: Drop/mask/pass classification driven by field names
//!   and a process-wide removal token table
//! - **Value Transformers**: Email, phone, birth-date, and student-id
//!   maskers plus SSN/IPv4 pattern redaction for free-form text
//! - **Pseudonymization**: Deterministic per-device student reference ids
//! - **Domain Entry Points**: Student, attendance, notification, and
//!   aggregate sanitizers gated on device capabilities
//! - **K-Anonymity**: Small aggregate counts collapsed to a sentinel
//!
//! ## Quick Start
//!
//! ```rust
//! use heronix_core::{Capability, PrivacyConfig, RegisteredDevice};
//! use heronix_privacy::{SanitizationContext, Sanitizer};
//! use serde_json::json;
//!
//! # fn main() -> heronix_privacy::Result<()> {
//! let sanitizer = Sanitizer::new(&PrivacyConfig::default())?;
//! let device = RegisteredDevice::new("D1", "parent_app", [Capability::StudentBasicInfo]);
//!
//! let record = json!({ "note": "call 555-123-4567", "ssn": "111-22-3333" });
//! let context = SanitizationContext::district_sync();
//! let sanitized = sanitizer.sanitize_record(&record, &device, &context);
//! assert!(sanitized.get("ssn").is_none());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod attendance;
pub mod context;
pub mod engine;
pub mod notification;
pub mod patterns;
pub mod policy;
pub mod pseudonym;
pub mod student;
pub mod transform;

pub use context::{DataType, SanitizationContext, TransmissionPurpose};
pub use engine::{Sanitizer, SANITIZATION_VERSION};
pub use patterns::PatternLibrary;
pub use policy::{FieldAction, FieldPolicy, MaskKind};
pub use pseudonym::{derive_pseudonym, PseudonymDeriver};

/// Result type for sanitizer construction and configuration
pub type Result<T> = std::result::Result<T, Error>;

/// Privacy-subsystem errors
///
/// Sanitization itself is total and never returns these; only construction
/// from an invalid configuration can fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Core(#[from] heronix_core::HeronixError),
}
