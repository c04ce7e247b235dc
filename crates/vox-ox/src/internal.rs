use std::{collections::HashMap, time::Duration};

use reqwest::{RequestBuilder as ReqwestRequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{VoxRequestError, error};

/// Static settings for every request sent to the endpoint
#[derive(Debug, Clone)]
pub(crate) struct RequestConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub default_headers: HashMap<String, String>,
    pub user_agent: Option<String>,
}

impl RequestConfig {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            default_headers: HashMap::new(),
            user_agent: None,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Posts JSON payloads to the endpoint and maps the outcome
pub(crate) struct VoxRequestHelper {
    client: reqwest::Client,
    config: RequestConfig,
}

impl VoxRequestHelper {
    pub fn new(client: reqwest::Client, endpoint: &str, timeout: Duration) -> Self {
        let config = RequestConfig::new(endpoint, timeout)
            .with_header("content-type", "application/json")
            .with_user_agent(concat!("vox-ox/", env!("CARGO_PKG_VERSION")));

        Self { client, config }
    }

    fn build_request(&self) -> ReqwestRequestBuilder {
        let mut req = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout);

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        if let Some(ref user_agent) = self.config.user_agent {
            req = req.header("user-agent", user_agent);
        }

        req
    }

    /// POST `body` as JSON and decode a 200 response into `T`.
    pub async fn post_json<T, B>(&self, body: &B) -> Result<T, VoxRequestError>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize,
    {
        let res = self
            .build_request()
            .json(body)
            .send()
            .await
            .map_err(|e| VoxRequestError::from_transport(&e))?;

        self.handle_response(res).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> Result<T, VoxRequestError> {
        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| VoxRequestError::from_transport(&e))?;

        tracing::debug!(status = status.as_u16(), body_len = bytes.len(), "endpoint responded");

        if status == StatusCode::OK {
            serde_json::from_slice::<T>(&bytes).map_err(|e| {
                let body_str = String::from_utf8_lossy(&bytes);
                VoxRequestError::MalformedResponse(format!(
                    "HTTP 200 but failed to decode JSON: {e}; body: {}",
                    truncate(&body_str, 200)
                ))
            })
        } else {
            Err(error::parse_error_response(status, &bytes))
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_config_builder() {
        let config = RequestConfig::new("https://example.com/default/fn", Duration::from_secs(5))
            .with_header("content-type", "application/json")
            .with_user_agent("vox-test/1.0");

        assert_eq!(config.endpoint, "https://example.com/default/fn");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.default_headers.len(), 1);
        assert_eq!(config.user_agent.as_deref(), Some("vox-test/1.0"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hola", 10), "hola");
        assert_eq!(truncate("canción", 4), "canc...");
    }
}
