//! Blocking HTTP client with timeout and bounded jittered retry.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;

use waypoint_core::config::RemoteConfig;
use waypoint_core::errors::{RemoteError, WaypointResult};

use crate::protocol::{RemoteRequest, RemoteResponse, CALL_PATH};

/// HTTP client for the remote facts service. Every logical operation is one
/// POST of a [`RemoteRequest`] envelope to the fixed call path.
pub struct HttpClient {
    client: reqwest::blocking::Client,
    base_url: Option<String>,
    auth_key: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HttpClient {
    /// Build a client from config. The base URL may be absent; calls then
    /// fail with `BackendUnavailable` before touching the network.
    pub fn new(config: &RemoteConfig) -> WaypointResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::BackendUnavailable {
                reason: format!("http client init: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth_key: config.auth_key.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        })
    }

    /// Whether a base URL is configured.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Send one logical call and decode its payload.
    ///
    /// Transport errors and 5xx responses are retried up to the configured
    /// bound with jittered exponential backoff; 4xx responses and
    /// envelope-level rejections are not.
    pub fn call<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> WaypointResult<T> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            RemoteError::BackendUnavailable {
                reason: "remote base URL not configured".to_string(),
            }
        })?;

        let envelope = RemoteRequest::new(method, serde_json::to_value(params)?);
        let url = format!("{base_url}{CALL_PATH}");

        let mut attempt = 0;
        loop {
            match self.send_once(&url, &envelope) {
                Ok(response) => return decode(method, response),
                Err(e) if retryable(&e) && attempt < self.max_retries => {
                    let backoff = self.backoff(attempt);
                    tracing::warn!(
                        method,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "remote call failed, retrying"
                    );
                    std::thread::sleep(backoff);
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn send_once(
        &self,
        url: &str,
        envelope: &RemoteRequest,
    ) -> Result<reqwest::blocking::Response, RemoteError> {
        let mut request = self.client.post(url).json(envelope);
        if let Some(key) = &self.auth_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().map_err(|e| RemoteError::Network {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::CallFailed {
                status: status.as_u16(),
            })
        }
    }

    /// Exponential backoff with jitter derived from the clock's sub-millisecond
    /// noise; good enough to de-synchronize callers without another dependency.
    fn backoff(&self, attempt: u32) -> Duration {
        let base = self.backoff_base_ms.saturating_mul(1 << attempt.min(6));
        let jitter_range = (self.backoff_base_ms / 2).max(1);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.subsec_nanos() as u64);
        Duration::from_millis(base + nanos % jitter_range)
    }
}

fn retryable(error: &RemoteError) -> bool {
    match error {
        RemoteError::Network { .. } => true,
        RemoteError::CallFailed { status } => *status >= 500,
        _ => false,
    }
}

fn decode<T: DeserializeOwned>(
    method: &str,
    response: reqwest::blocking::Response,
) -> WaypointResult<T> {
    let envelope: RemoteResponse<T> =
        response.json().map_err(|e| RemoteError::Rejected {
            reason: format!("malformed response for {method}: {e}"),
        })?;

    if !envelope.ok {
        return Err(RemoteError::Rejected {
            reason: envelope
                .error
                .unwrap_or_else(|| format!("{method} rejected without detail")),
        }
        .into());
    }
    envelope.data.ok_or_else(|| {
        RemoteError::Rejected {
            reason: format!("{method} succeeded but carried no data"),
        }
        .into()
    })
}
