//! HTTP plumbing shared by the Porkbun endpoints.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

use super::types::{Envelope, STATUS_SUCCESS};
use super::{API_BASE, PorkbunClient};

/// Maximum body length echoed into logs and error messages.
const LOG_BODY_LIMIT: usize = 256;

impl PorkbunClient {
    /// POST a JSON body to `path` and decode a `T` from the response.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{API_BASE}{path}");
        log::debug!("[porkbun] POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                detail: e.to_string(),
            })?;

        let code = response.status().as_u16();
        log::debug!("[porkbun] response status: {code}");

        let text = response.text().await.map_err(|e| ApiError::Transport {
            detail: format!("failed to read response body: {e}"),
        })?;
        log::debug!("[porkbun] response body: {}", truncate(&text));

        parse_response(code, &text)
    }
}

/// Map an HTTP status and response body to a decoded value or [`ApiError`].
///
/// Server faults (5xx) are reported by code so the retry layer can match
/// them against its retryable set. Any readable `status` discriminant
/// other than success becomes a terminal status error; everything else
/// that fails to decode is a transport error.
pub(crate) fn parse_response<T: DeserializeOwned>(code: u16, text: &str) -> ApiResult<T> {
    if (500..=599).contains(&code) {
        return Err(ApiError::ServerFault {
            code,
            message: truncate(text),
        });
    }

    let envelope: Envelope = serde_json::from_str(text).map_err(|e| {
        if (200..=299).contains(&code) {
            ApiError::Transport {
                detail: format!("undecodable response: {e}"),
            }
        } else {
            ApiError::ServerFault {
                code,
                message: truncate(text),
            }
        }
    })?;

    if envelope.status != STATUS_SUCCESS {
        return Err(ApiError::Status {
            status: envelope.status,
            message: envelope
                .message
                .unwrap_or_else(|| "no error message provided".to_string()),
        });
    }

    serde_json::from_str(text).map_err(|e| ApiError::Transport {
        detail: format!("undecodable response: {e}"),
    })
}

/// Truncate a response body before logging or embedding it in an error.
pub(crate) fn truncate(text: &str) -> String {
    if text.len() <= LOG_BODY_LIMIT {
        return text.to_string();
    }
    let mut end = LOG_BODY_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!(
        "{}... [truncated, {} bytes total]",
        &text[..end],
        text.len()
    )
}
