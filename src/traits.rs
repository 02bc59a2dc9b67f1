use async_trait::async_trait;

use crate::error::ApiResult;
use crate::types::{ObservedRecord, RecordPayload};

/// The four primitive operations of the remote record API.
///
/// Implementations perform exactly one attempt per call; retry scheduling
/// belongs to [`crate::retry::run`]. Cancellation reaches an in-flight
/// call by future drop from the executor's select loop.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Create a record on `domain`, returning its assigned identifier.
    async fn create_record(&self, domain: &str, record: &RecordPayload) -> ApiResult<i64>;

    /// Fetch every record on `domain`.
    async fn retrieve_records(&self, domain: &str) -> ApiResult<Vec<ObservedRecord>>;

    /// Replace the record `record_id` on `domain` with `record`.
    async fn edit_record(
        &self,
        domain: &str,
        record_id: i64,
        record: &RecordPayload,
    ) -> ApiResult<()>;

    /// Delete the record `record_id` from `domain`.
    async fn delete_record(&self, domain: &str, record_id: i64) -> ApiResult<()>;
}
