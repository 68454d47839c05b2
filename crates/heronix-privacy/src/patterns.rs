//! Compiled pattern library for PII detection

use crate::{Error, Result};
use heronix_core::PrivacyConfig;
use regex::Regex;
use std::sync::OnceLock;

pub const SSN_PATTERN: &str = r"\d{3}-\d{2}-\d{4}";
pub const PHONE_PATTERN: &str = r"\(?\d{3}\)?[-\s.]?\d{3}[-\s.]?\d{4}";
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
pub const ADDRESS_PATTERN: &str = r"\d+\s+[A-Za-z0-9\s,]+\s+(Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln|Court|Ct|Boulevard|Blvd|Way|Place|Pl)";
pub const ZIP_PATTERN: &str = r"\b\d{5}(-\d{4})?\b";
pub const IPV4_PATTERN: &str = r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b";

/// Internal infrastructure references leaked into free-form text
/// (`server: db01`, `database: sis_prod`, `schema: grades`).
pub const SCHOOL_INFO_PATTERN: &str = r"(?i)\b(server|database|schema)\s*:\s*[^\s,;]+";

/// Compiled patterns for the sanitization subsystem.
///
/// The built-in set is compiled once per process and shared read-only
/// across all callers via [`PatternLibrary::shared`]; deployments with an
/// address override compile their own copy. Exact pattern semantics matter
/// for test reproducibility.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    ssn: Regex,
    phone: Regex,
    email: Regex,
    address: Regex,
    zip: Regex,
    ipv4: Regex,
    school_info: Regex,
}

impl PatternLibrary {
    /// Compile the built-in pattern set.
    pub fn new() -> Result<Self> {
        Self::compile(ADDRESS_PATTERN)
    }

    /// Compile the pattern set, honoring a deployment's street-address
    /// override for non-US data.
    pub fn with_config(config: &PrivacyConfig) -> Result<Self> {
        Self::compile(config.address_pattern.as_deref().unwrap_or(ADDRESS_PATTERN))
    }

    /// Get the process-wide library for the built-in pattern set (cached)
    ///
    /// Returns None if compilation fails (should never happen with the
    /// hardcoded patterns)
    pub fn shared() -> Option<&'static Self> {
        static PATTERNS: OnceLock<Option<PatternLibrary>> = OnceLock::new();
        PATTERNS.get_or_init(|| Self::new().ok()).as_ref()
    }

    fn compile(address_pattern: &str) -> Result<Self> {
        Ok(Self {
            ssn: compile_pattern(SSN_PATTERN)?,
            phone: compile_pattern(PHONE_PATTERN)?,
            email: compile_pattern(EMAIL_PATTERN)?,
            address: compile_pattern(address_pattern)?,
            zip: compile_pattern(ZIP_PATTERN)?,
            ipv4: compile_pattern(IPV4_PATTERN)?,
            school_info: compile_pattern(SCHOOL_INFO_PATTERN)?,
        })
    }

    pub fn ssn(&self) -> &Regex {
        &self.ssn
    }

    pub fn phone(&self) -> &Regex {
        &self.phone
    }

    pub fn email(&self) -> &Regex {
        &self.email
    }

    pub fn address(&self) -> &Regex {
        &self.address
    }

    /// ZIP codes are detectable but wired into no transformer; deployments
    /// that need ZIP scrubbing consume this directly.
    pub fn zip(&self) -> &Regex {
        &self.zip
    }

    pub fn ipv4(&self) -> &Regex {
        &self.ipv4
    }

    pub fn school_info(&self) -> &Regex {
        &self.school_info
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Config {
        message: format!("Invalid redaction pattern '{}': {}", pattern, e),
    })
}
