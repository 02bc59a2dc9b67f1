//! Per-operation reconciliation between declared record state and the
//! remote record API.
//!
//! One operation runs per resource instance per apply step. Each builds
//! its request from the declared fields, calls the API through the retry
//! executor and folds the response back into managed state; failures are
//! reported as diagnostics so the orchestrator can keep serving other
//! resources.

use tokio_util::sync::CancellationToken;

use crate::error::ReconcileError;
use crate::naming;
use crate::retry::{self, RetryPolicy};
use crate::traits::RecordApi;
use crate::types::{Diagnostics, ManagedRecord, RecordPayload, RecordSpec, StepResult};

/// Drives Create/Read/Update/Delete/Import for managed DNS records.
pub struct RecordReconciler<C> {
    api: C,
    policy: RetryPolicy,
}

impl<C: RecordApi> RecordReconciler<C> {
    /// Reconciler over `api` with the operator-configured attempt ceiling.
    pub fn new(api: C, max_retries: u32) -> Self {
        Self {
            api,
            policy: RetryPolicy::new(max_retries),
        }
    }

    /// Replace the retry policy. Tests use this to shrink the backoff.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Access the underlying record API client.
    pub fn api(&self) -> &C {
        &self.api
    }

    /// Create the declared record and assign its identifier.
    ///
    /// On failure no state is produced: the identifier stays unset and the
    /// wrapped retry-exhaustion or terminal error surfaces as an error
    /// diagnostic.
    pub async fn create(&self, spec: &RecordSpec, cancel: &CancellationToken) -> StepResult {
        let payload = RecordPayload::from_spec(spec);
        let created = retry::run(&self.policy, cancel, || {
            self.api.create_record(&spec.domain, &payload)
        })
        .await;

        match created {
            Ok(id) => {
                log::debug!("created record {id} on {}", spec.domain);
                StepResult::completed(ManagedRecord {
                    id: Some(id.to_string()),
                    spec: spec.clone(),
                })
            }
            Err(error) => Self::report("Error creating DNS record", &error.into()),
        }
    }

    /// Refresh managed state from the remote record list.
    ///
    /// The domain's records are scanned for the stored identifier. When
    /// found, content, notes, TTL and type are overwritten and the display
    /// name is re-derived from the fully-qualified remote name. When the
    /// identifier is no longer present remotely the state is left
    /// unchanged and a warning diagnostic reports the drift.
    pub async fn read(&self, state: &ManagedRecord, cancel: &CancellationToken) -> StepResult {
        let domain = state.spec.domain.clone();
        let retrieved =
            retry::run(&self.policy, cancel, || self.api.retrieve_records(&domain)).await;

        let records = match retrieved {
            Ok(records) => records,
            Err(error) => {
                let mut diagnostics = Diagnostics::new();
                diagnostics.error(format!("Could not retrieve records for {domain}"), &error);
                log::error!("could not retrieve records for {domain}: {error}");
                return StepResult {
                    state: Some(state.clone()),
                    diagnostics,
                };
            }
        };

        log::debug!("found {} records on {domain}", records.len());

        let stored_id = state.id.as_deref().unwrap_or_default();
        let mut updated = state.clone();

        match records.into_iter().find(|r| r.id == stored_id) {
            Some(remote) => {
                updated.spec.content = remote.content;
                updated.spec.notes = remote.notes;
                updated.spec.ttl = Some(remote.ttl);
                updated.spec.record_type = remote.record_type;
                updated.spec.name = naming::subdomain_fragment(&remote.name, &domain);
                StepResult::completed(updated)
            }
            None => {
                let mut diagnostics = Diagnostics::new();
                diagnostics.warning(
                    "DNS record not found during refresh",
                    format!(
                        "no record with id '{stored_id}' exists on {domain}; \
                         state was left unchanged"
                    ),
                );
                log::warn!("record '{stored_id}' not found on {domain}, keeping stored state");
                StepResult {
                    state: Some(updated),
                    diagnostics,
                }
            }
        }
    }

    /// Push the new declared fields to the existing record.
    ///
    /// The stored identifier is re-parsed to its numeric form first; a
    /// malformed identifier aborts the operation before any API call.
    pub async fn update(
        &self,
        state: &ManagedRecord,
        spec: &RecordSpec,
        cancel: &CancellationToken,
    ) -> StepResult {
        let record_id = match state.numeric_id() {
            Ok(id) => id,
            Err(error) => return Self::report("Error updating DNS record", &error),
        };

        let payload = RecordPayload::from_spec(spec);
        let edited = retry::run(&self.policy, cancel, || {
            self.api.edit_record(&spec.domain, record_id, &payload)
        })
        .await;

        match edited {
            Ok(()) => {
                log::debug!("updated record {record_id} on {}", spec.domain);
                StepResult::completed(ManagedRecord {
                    id: state.id.clone(),
                    spec: spec.clone(),
                })
            }
            Err(error) => Self::report("Error updating DNS record", &error.into()),
        }
    }

    /// Delete the managed record. On success no state is retained.
    pub async fn delete(&self, state: &ManagedRecord, cancel: &CancellationToken) -> StepResult {
        let record_id = match state.numeric_id() {
            Ok(id) => id,
            Err(error) => return Self::report("Error deleting DNS record", &error),
        };

        let domain = &state.spec.domain;
        let deleted = retry::run(&self.policy, cancel, || {
            self.api.delete_record(domain, record_id)
        })
        .await;

        match deleted {
            Ok(()) => {
                log::debug!("deleted record {record_id} from {domain}");
                StepResult::destroyed()
            }
            Err(error) => Self::report("Error deleting DNS record", &error.into()),
        }
    }

    /// Adopt an externally-created record by its identifier.
    ///
    /// Pure passthrough: the identifier becomes the primary key and the
    /// next Read populates the remaining fields.
    #[must_use]
    pub fn import(&self, record_id: &str) -> StepResult {
        StepResult::completed(ManagedRecord::imported(record_id))
    }

    fn report(summary: &str, error: &ReconcileError) -> StepResult {
        if error.is_input_error() {
            log::warn!("{summary}: {error}");
        } else {
            log::error!("{summary}: {error}");
        }
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(summary, error);
        StepResult::failed(diagnostics)
    }
}
