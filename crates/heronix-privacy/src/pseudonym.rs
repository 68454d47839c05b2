//! Deterministic per-device pseudonymous student references

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use heronix_core::config::DEFAULT_PSEUDONYM_SALT;
use ring::digest::{digest, SHA256};
use tracing::debug;
use uuid::Uuid;

/// Derives stable, device-scoped replacement identifiers for students.
///
/// The same `(student_id, device_id)` pair always yields the same reference
/// within a deployment; distinct devices see unlinkable references for the
/// same student. The salt is fixed for the process lifetime and never
/// rotated per call.
#[derive(Debug, Clone)]
pub struct PseudonymDeriver {
    salt: String,
}

impl PseudonymDeriver {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Derive the pseudonymous reference for a student as seen by one
    /// device. A missing student id falls back to a fresh anonymous
    /// reference; determinism is broken for that single call.
    pub fn derive(&self, student_id: Option<&str>, device_id: &str) -> String {
        let Some(student_id) = student_id.filter(|s| !s.is_empty()) else {
            debug!(device_id, "missing student id, emitting anonymous reference");
            return anonymous_reference();
        };

        let material = format!("{}:{}:{}", student_id, device_id, self.salt);
        let hash = digest(&SHA256, material.as_bytes());
        let encoded = STANDARD.encode(hash.as_ref());
        let short: String = encoded
            .chars()
            .take(12)
            .map(|c| match c {
                '/' => 'X',
                '+' => 'Y',
                c => c,
            })
            .collect();

        format!("REF-{}", short)
    }
}

fn anonymous_reference() -> String {
    let uuid = Uuid::new_v4().to_string();
    format!("ANON-{}", &uuid[..8])
}

/// Derive a pseudonymous reference with the default deployment salt.
pub fn derive_pseudonym(student_id: &str, device_id: &str) -> String {
    PseudonymDeriver::new(DEFAULT_PSEUDONYM_SALT).derive(Some(student_id), device_id)
}
