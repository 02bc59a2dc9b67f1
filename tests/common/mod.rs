//! Shared test helpers: a scripted record API and small builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use dns_reconciler::{ApiError, ApiResult, ObservedRecord, RecordApi, RecordPayload, RecordSpec};

/// Per-operation call counters.
#[derive(Default)]
pub struct CallCounts {
    pub create: AtomicU32,
    pub retrieve: AtomicU32,
    pub edit: AtomicU32,
    pub delete: AtomicU32,
}

/// Scripted `RecordApi` backed by per-operation response queues.
///
/// Each call pops the next scripted response; an exhausted queue yields a
/// transport error so an over-calling test fails loudly. Captured create
/// and edit payloads are kept for assertions.
#[derive(Default)]
pub struct MockRecordApi {
    create_responses: Mutex<VecDeque<ApiResult<i64>>>,
    retrieve_responses: Mutex<VecDeque<ApiResult<Vec<ObservedRecord>>>>,
    edit_responses: Mutex<VecDeque<ApiResult<()>>>,
    delete_responses: Mutex<VecDeque<ApiResult<()>>>,
    pub seen_payloads: Mutex<Vec<(String, RecordPayload)>>,
    pub calls: CallCounts,
}

impl MockRecordApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_create(&self, result: ApiResult<i64>) {
        self.create_responses.lock().unwrap().push_back(result);
    }

    pub fn push_retrieve(&self, result: ApiResult<Vec<ObservedRecord>>) {
        self.retrieve_responses.lock().unwrap().push_back(result);
    }

    pub fn push_edit(&self, result: ApiResult<()>) {
        self.edit_responses.lock().unwrap().push_back(result);
    }

    pub fn push_delete(&self, result: ApiResult<()>) {
        self.delete_responses.lock().unwrap().push_back(result);
    }

    fn next<T>(queue: &Mutex<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
        queue.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ApiError::Transport {
                detail: "no scripted response left".to_string(),
            })
        })
    }
}

#[async_trait]
impl RecordApi for MockRecordApi {
    async fn create_record(&self, domain: &str, record: &RecordPayload) -> ApiResult<i64> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.seen_payloads
            .lock()
            .unwrap()
            .push((domain.to_string(), record.clone()));
        Self::next(&self.create_responses)
    }

    async fn retrieve_records(&self, _domain: &str) -> ApiResult<Vec<ObservedRecord>> {
        self.calls.retrieve.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.retrieve_responses)
    }

    async fn edit_record(
        &self,
        domain: &str,
        _record_id: i64,
        record: &RecordPayload,
    ) -> ApiResult<()> {
        self.calls.edit.fetch_add(1, Ordering::SeqCst);
        self.seen_payloads
            .lock()
            .unwrap()
            .push((domain.to_string(), record.clone()));
        Self::next(&self.edit_responses)
    }

    async fn delete_record(&self, _domain: &str, _record_id: i64) -> ApiResult<()> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.delete_responses)
    }
}

/// The declared record most scenarios start from.
pub fn www_spec() -> RecordSpec {
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

/// A remote record as the API would report it.
pub fn observed(id: &str, name: &str, record_type: &str, content: &str) -> ObservedRecord {
    ObservedRecord {
        id: id.to_string(),
        name: name.to_string(),
        record_type: record_type.to_string(),
        content: content.to_string(),
        ttl: "600".to_string(),
        prio: None,
        notes: None,
    }
}

pub fn server_fault(code: u16) -> ApiError {
    ApiError::ServerFault {
        code,
        message: "Service Unavailable".to_string(),
    }
}

pub fn status_error(message: &str) -> ApiError {
    ApiError::Status {
        status: "ERROR".to_string(),
        message: message.to_string(),
    }
}

pub fn transport(detail: &str) -> ApiError {
    ApiError::Transport {
        detail: detail.to_string(),
    }
}

/// Assert a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Assert an `Option` is `Some` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}
