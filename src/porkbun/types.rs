//! Porkbun API wire types.

use serde::{Deserialize, Serialize};

use crate::types::RecordPayload;

/// Status discriminant carried by every response.
pub(crate) const STATUS_SUCCESS: &str = "SUCCESS";

/// The part of every response that is shared: a status discriminant plus
/// an error message on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body carrying only the key pair (retrieve, delete, ping).
#[derive(Serialize)]
pub(crate) struct AuthBody<'a> {
    pub apikey: &'a str,
    pub secretapikey: &'a str,
}

/// Request body carrying the key pair plus record fields (create, edit).
#[derive(Serialize)]
pub(crate) struct RecordBody<'a> {
    pub apikey: &'a str,
    pub secretapikey: &'a str,
    #[serde(flatten)]
    pub record: &'a RecordPayload,
}

/// Response to `/dns/create/{domain}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    pub id: i64,
}

/// Response to `/dns/retrieve/{domain}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RetrieveResponse {
    #[serde(default)]
    pub records: Vec<crate::types::ObservedRecord>,
}

/// Response to `/ping`.
#[derive(Debug, Deserialize)]
pub(crate) struct PingResponse {
    #[serde(rename = "yourIp")]
    pub your_ip: String,
}
