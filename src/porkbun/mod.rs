//! Porkbun record API client.
//!
//! Implements [`crate::RecordApi`] over the Porkbun v3 JSON API. Every
//! endpoint is a POST with the key pair in the request body; responses
//! carry a `status` discriminant of `"SUCCESS"` or `"ERROR"`.

mod api;
mod http;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::ApiResult;
use crate::types::ApiCredentials;

use types::PingResponse;

pub(crate) const API_BASE: &str = "https://api.porkbun.com/api/json/v3";

/// Default connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the Porkbun v3 JSON API.
pub struct PorkbunClient {
    pub(crate) client: Client,
    pub(crate) credentials: ApiCredentials,
}

impl PorkbunClient {
    /// Client with the default connect/request timeouts.
    #[must_use]
    pub fn new(credentials: ApiCredentials) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            credentials,
        }
    }

    /// Check the credentials against the API's ping endpoint.
    ///
    /// Returns the caller's public IP address as reported by the API.
    pub async fn ping(&self) -> ApiResult<String> {
        let response: PingResponse = self.post("/ping", &self.auth()).await?;
        Ok(response.your_ip)
    }
}
