use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CredentialError, ReconcileError};

// ============ Record State ============

/// User-declared desired state for a single DNS record.
///
/// Supplied fresh on every apply step; the reconciler never mutates it.
/// TTL and priority are decimal strings, matching the wire format of the
/// record API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Subdomain fragment without the base domain; empty for the apex.
    pub name: String,
    /// Base domain the record lives on.
    pub domain: String,
    /// Record type (`"A"`, `"CNAME"`, `"TXT"`, ...).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content: address, target, text, depending on the type.
    pub content: String,
    /// Time to live in seconds. The API minimum is 600.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    /// Record priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<String>,
    /// Free-form notes attached to the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Persisted state for a record under management.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedRecord {
    /// Provider-assigned identifier, a string-encoded integer. Absent
    /// until Create succeeds; once assigned it never changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The declared record fields this state currently reflects.
    #[serde(flatten)]
    pub spec: RecordSpec,
}

impl ManagedRecord {
    /// State adopted through Import: only the identifier is known, a
    /// following Read populates the remaining fields.
    #[must_use]
    pub fn imported(record_id: &str) -> Self {
        Self {
            id: Some(record_id.to_string()),
            spec: RecordSpec::default(),
        }
    }

    /// The stored identifier in its numeric form.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::MissingId`] when no identifier is assigned, and
    /// [`ReconcileError::InvalidRecordId`] when it is not a decimal
    /// integer.
    pub fn numeric_id(&self) -> Result<i64, ReconcileError> {
        let id = self.id.as_deref().ok_or(ReconcileError::MissingId)?;
        id.parse().map_err(|e: std::num::ParseIntError| {
            ReconcileError::InvalidRecordId {
                id: id.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// A record as reported by the remote API.
///
/// Read fresh on every refresh, never cached. The name is fully
/// qualified; [`crate::naming::subdomain_fragment`] converts it back to
/// the user-facing form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedRecord {
    /// Provider-assigned record identifier.
    pub id: String,
    /// Fully-qualified record name.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: String,
    /// Record priority, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<String>,
    /// Notes attached to the record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request payload for create and edit calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    /// Subdomain fragment; the API qualifies it with the domain itself.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecordPayload {
    /// Build the request payload for a declared record.
    #[must_use]
    pub fn from_spec(spec: &RecordSpec) -> Self {
        Self {
            name: spec.name.clone(),
            record_type: spec.record_type.clone(),
            content: spec.content.clone(),
            ttl: spec.ttl.clone(),
            prio: spec.prio.clone(),
            notes: spec.notes.clone(),
        }
    }
}

// ============ Diagnostics ============

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Noteworthy but not blocking.
    Warning,
    /// The operation could not complete.
    Error,
}

/// A single message reported back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Whether the message blocks completion.
    pub severity: Severity,
    /// One-line summary of what happened.
    pub summary: String,
    /// Underlying detail, usually the rendered source error.
    pub detail: String,
}

/// Ordered collection of diagnostics produced by one operation.
///
/// Failures are reported here instead of being thrown: the operation
/// terminates its step, the process keeps serving other resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error diagnostic.
    pub fn error(&mut self, summary: impl Into<String>, detail: impl std::fmt::Display) {
        self.0.push(Diagnostic {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.to_string(),
        });
    }

    /// Append a warning diagnostic.
    pub fn warning(&mut self, summary: impl Into<String>, detail: impl std::fmt::Display) {
        self.0.push(Diagnostic {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.to_string(),
        });
    }

    /// Whether any error-severity diagnostic was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    /// Whether no diagnostics were recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the recorded diagnostics in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of a single reconciler operation.
///
/// `state` is `None` when the operation produced no new state: a failed
/// operation leaves the previous state in force, a successful Delete
/// retires the record entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Updated managed state, when the operation produced one.
    pub state: Option<ManagedRecord>,
    /// Messages reported back to the orchestrator.
    pub diagnostics: Diagnostics,
}

impl StepResult {
    /// Successful outcome carrying updated state.
    #[must_use]
    pub fn completed(state: ManagedRecord) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Successful Delete: nothing remains to manage.
    #[must_use]
    pub fn destroyed() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Failed outcome; the previous state stays in force.
    #[must_use]
    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }
}

// ============ Credentials ============

/// API key material for the record API.
///
/// Both fields are validated non-empty at construction; the keys travel
/// in request bodies and are never logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    pub(crate) api_key: String,
    pub(crate) secret_api_key: String,
}

impl ApiCredentials {
    /// Build credentials from the two Porkbun API keys.
    ///
    /// # Errors
    ///
    /// [`CredentialError::Empty`] when either key is empty or
    /// whitespace-only.
    pub fn new(
        api_key: impl Into<String>,
        secret_api_key: impl Into<String>,
    ) -> Result<Self, CredentialError> {
        let api_key = api_key.into();
        let secret_api_key = secret_api_key.into();
        if api_key.trim().is_empty() {
            return Err(CredentialError::Empty("api_key"));
        }
        if secret_api_key.trim().is_empty() {
            return Err(CredentialError::Empty("secret_api_key"));
        }
        Ok(Self {
            api_key,
            secret_api_key,
        })
    }

    /// Construct credentials from a flat key-value map, validating the
    /// required fields. Useful when the orchestrator hands configuration
    /// over as loose strings.
    ///
    /// # Errors
    ///
    /// [`CredentialError::Missing`] or [`CredentialError::Empty`] for the
    /// first offending field.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialError> {
        let api_key = map
            .get("api_key")
            .ok_or(CredentialError::Missing("api_key"))?;
        let secret_api_key = map
            .get("secret_api_key")
            .ok_or(CredentialError::Missing("secret_api_key"))?;
        Self::new(api_key.clone(), secret_api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> RecordSpec {
        RecordSpec {
            name: "www".to_string(),
            domain: "example.com".to_string(),
            record_type: "A".to_string(),
            content: "1.2.3.4".to_string(),
            ttl: Some("600".to_string()),
            prio: None,
            notes: None,
        }
    }

    #[test]
    fn payload_copies_declared_fields() {
        let payload = RecordPayload::from_spec(&spec());
        assert_eq!(payload.name, "www");
        assert_eq!(payload.record_type, "A");
        assert_eq!(payload.content, "1.2.3.4");
        assert_eq!(payload.ttl.as_deref(), Some("600"));
        assert_eq!(payload.prio, None);
    }

    #[test]
    fn payload_omits_unset_optional_fields() {
        let json = serde_json::to_string(&RecordPayload::from_spec(&spec())).unwrap();
        assert!(json.contains("\"type\":\"A\""));
        assert!(!json.contains("prio"));
        assert!(!json.contains("notes"));
    }

    #[test]
    fn numeric_id_parses_assigned_id() {
        let state = ManagedRecord {
            id: Some("106926652".to_string()),
            spec: spec(),
        };
        assert_eq!(state.numeric_id().unwrap(), 106_926_652);
    }

    #[test]
    fn numeric_id_rejects_missing_id() {
        let state = ManagedRecord {
            id: None,
            spec: spec(),
        };
        assert_eq!(state.numeric_id(), Err(ReconcileError::MissingId));
    }

    #[test]
    fn numeric_id_rejects_non_numeric_id() {
        let state = ManagedRecord {
            id: Some("abc".to_string()),
            spec: spec(),
        };
        assert!(matches!(
            state.numeric_id(),
            Err(ReconcileError::InvalidRecordId { id, .. }) if id == "abc"
        ));
    }

    #[test]
    fn imported_state_has_only_the_id() {
        let state = ManagedRecord::imported("42");
        assert_eq!(state.id.as_deref(), Some("42"));
        assert_eq!(state.spec, RecordSpec::default());
    }

    #[test]
    fn observed_record_parses_wire_json() {
        let json = r#"{
            "id": "106926652",
            "name": "www.example.com",
            "type": "A",
            "content": "1.2.3.4",
            "ttl": "600",
            "prio": "0",
            "notes": null
        }"#;
        let record: ObservedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "106926652");
        assert_eq!(record.record_type, "A");
        assert_eq!(record.prio.as_deref(), Some("0"));
        assert_eq!(record.notes, None);
    }

    #[test]
    fn managed_record_serde_round_trip() {
        let state = ManagedRecord {
            id: Some("7".to_string()),
            spec: spec(),
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: ManagedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn diagnostics_track_severity() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        diags.warning("drifted", "record changed remotely");
        assert!(!diags.has_errors());
        diags.error("failed", "boom");
        assert!(diags.has_errors());
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn credentials_reject_empty_fields() {
        assert_eq!(
            ApiCredentials::new("", "sk"),
            Err(CredentialError::Empty("api_key"))
        );
        assert_eq!(
            ApiCredentials::new("pk", "   "),
            Err(CredentialError::Empty("secret_api_key"))
        );
        assert!(ApiCredentials::new("pk", "sk").is_ok());
    }

    #[test]
    fn credentials_from_map_reports_missing_fields() {
        let mut map = HashMap::new();
        assert_eq!(
            ApiCredentials::from_map(&map),
            Err(CredentialError::Missing("api_key"))
        );
        map.insert("api_key".to_string(), "pk".to_string());
        assert_eq!(
            ApiCredentials::from_map(&map),
            Err(CredentialError::Missing("secret_api_key"))
        );
        map.insert("secret_api_key".to_string(), "sk".to_string());
        assert!(ApiCredentials::from_map(&map).is_ok());
    }
}
