//! Recursive sanitization engine over generic record trees

use crate::context::SanitizationContext;
use crate::patterns::PatternLibrary;
use crate::policy::{FieldAction, FieldPolicy, MaskKind};
use crate::pseudonym::PseudonymDeriver;
use crate::transform;
use crate::{Error, Result};
use heronix_core::{DeviceIdentity, PrivacyConfig};
use serde_json::{Map, Value};
use tracing::debug;

pub const SANITIZATION_VERSION: &str = "1.0";

/// Stateless sanitization engine.
///
/// Policy tables and compiled patterns are built once at construction and
/// read-only thereafter; a single `Sanitizer` may be shared across any
/// number of concurrent callers without synchronization. Inputs are never
/// mutated; outputs are fresh trees owned by the caller.
#[derive(Debug)]
pub struct Sanitizer {
    patterns: PatternLibrary,
    policy: FieldPolicy,
    pseudonyms: PseudonymDeriver,
}

impl Sanitizer {
    pub fn new(config: &PrivacyConfig) -> Result<Self> {
        config.validate()?;

        // Deployments without an address override share the process-wide
        // compiled set; regexes clone cheaply off the singleton
        let patterns = if config.address_pattern.is_some() {
            PatternLibrary::with_config(config)?
        } else {
            PatternLibrary::shared().cloned().ok_or_else(|| Error::Config {
                message: "built-in redaction patterns failed to compile".to_string(),
            })?
        };

        Ok(Self {
            patterns,
            policy: FieldPolicy::new(&config.extra_remove_tokens),
            pseudonyms: PseudonymDeriver::new(config.pseudonym_salt.clone()),
        })
    }

    pub(crate) fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    pub(crate) fn pseudonyms(&self) -> &PseudonymDeriver {
        &self.pseudonyms
    }

    /// Sanitize a generic record tree under the given context.
    ///
    /// Total over all inputs: unknown scalar types pass through, nested
    /// shapes are walked element-wise, and nothing panics on type
    /// surprises.
    pub fn sanitize_record(
        &self,
        tree: &Value,
        device: &dyn DeviceIdentity,
        context: &SanitizationContext,
    ) -> Value {
        let output = match tree {
            Value::Object(map) => {
                let mut out = self.sanitize_map(map, context);
                if context.include_metadata {
                    append_metadata(&mut out);
                }
                Value::Object(out)
            }
            Value::Array(items) => Value::Array(self.sanitize_sequence(items, "", context)),
            scalar => self.pass_scalar(scalar),
        };

        debug!(
            device_id = device.device_id(),
            device_type = device.device_type(),
            data_type = ?context.data_type,
            purpose = ?context.purpose,
            "record sanitized"
        );

        output
    }

    fn sanitize_map(&self, map: &Map<String, Value>, context: &SanitizationContext) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in map {
            let action = self.policy.classify(key, context);
            if action == FieldAction::Drop {
                continue;
            }
            match value {
                Value::Null => {}
                Value::Object(inner) => {
                    out.insert(key.clone(), Value::Object(self.sanitize_map(inner, context)));
                }
                Value::Array(items) => {
                    out.insert(
                        key.clone(),
                        Value::Array(self.sanitize_sequence(items, key, context)),
                    );
                }
                scalar => {
                    out.insert(key.clone(), self.apply_scalar_action(action, scalar));
                }
            }
        }
        out
    }

    fn sanitize_sequence(
        &self,
        items: &[Value],
        parent_key: &str,
        context: &SanitizationContext,
    ) -> Vec<Value> {
        // The parent key already survived classification at the map level;
        // root sequences have no field name to judge, so elements pass
        let action = match self.policy.classify(parent_key, context) {
            FieldAction::Drop => FieldAction::Pass,
            action => action,
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::Object(inner) => Some(Value::Object(self.sanitize_map(inner, context))),
                Value::Array(nested) => {
                    Some(Value::Array(self.sanitize_sequence(nested, parent_key, context)))
                }
                scalar => Some(self.apply_scalar_action(action, scalar)),
            })
            .collect()
    }

    fn apply_scalar_action(&self, action: FieldAction, value: &Value) -> Value {
        match action {
            FieldAction::Mask(kind) => self.mask_scalar(kind, value),
            _ => self.pass_scalar(value),
        }
    }

    fn mask_scalar(&self, kind: MaskKind, value: &Value) -> Value {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            // Booleans and other surprises under a masked key reveal
            // nothing worth keeping
            _ => return Value::String(mask_sentinel(kind).to_string()),
        };
        Value::String(match kind {
            MaskKind::Email => transform::mask_email(&text),
            MaskKind::Phone => transform::mask_phone(&text),
            MaskKind::Address => transform::ADDRESS_REDACTED.to_string(),
            MaskKind::BirthDate => transform::mask_birth_date(&text),
            MaskKind::StudentId => transform::mask_student_id(&text),
        })
    }

    fn pass_scalar(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(transform::redact_pass_through(s, &self.patterns)),
            other => other.clone(),
        }
    }
}

fn mask_sentinel(kind: MaskKind) -> &'static str {
    match kind {
        MaskKind::Email => transform::EMAIL_REDACTED,
        MaskKind::Phone => transform::PHONE_REDACTED,
        MaskKind::Address => transform::ADDRESS_REDACTED,
        MaskKind::BirthDate => transform::DOB_REDACTED,
        MaskKind::StudentId => transform::ID_REDACTED,
    }
}

/// Tag a sanitized root mapping with the gateway metadata trio.
pub(crate) fn append_metadata(out: &mut Map<String, Value>) {
    out.insert("_sanitized".to_string(), Value::Bool(true));
    out.insert(
        "_sanitizedAt".to_string(),
        Value::String(
            chrono::Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
        ),
    );
    out.insert(
        "_sanitizationVersion".to_string(),
        Value::String(SANITIZATION_VERSION.to_string()),
    );
}

/// First string-representable value found under any of the candidate keys.
pub(crate) fn first_string(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// First value found under any of the candidate keys.
pub(crate) fn first_value<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k))
}
