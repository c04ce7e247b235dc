#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Client for a serverless text-to-speech / speech-to-text endpoint.
//!
//! Text is posted as `{"text": ...}` and comes back as synthesized audio;
//! audio is posted as `{"audio_base64": ...}` and comes back as a
//! transcription. [`render::render`] turns the response into a text pane and
//! an audio pane.

pub mod audio;
pub mod error;
mod internal;
pub mod locale;
pub mod render;
pub mod request;
pub mod response;
pub mod session;

// Re-export main types
pub use audio::{AudioFile, AudioFormat, DecodedAudio};
pub use error::VoxRequestError;
pub use locale::Locale;
pub use render::{AudioPane, Notice, Rendered, TextPane, render};
pub use request::{InputKind, InputSelection, RequestPayload, build_payload};
pub use response::ResponsePayload;
pub use session::{Session, SubmissionState};

use bon::Builder;
use core::fmt;
use std::time::Duration;

use crate::internal::VoxRequestHelper;

/// API Gateway URL of the conversion Lambda
pub const DEFAULT_ENDPOINT: &str =
    "https://9sbmriwy50.execute-api.us-east-1.amazonaws.com/default/EvaFrecuente";

/// Long recordings can take minutes to transcribe
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Builder)]
pub struct VoxBridge {
    #[builder(default = DEFAULT_ENDPOINT.to_string(), into)]
    pub(crate) endpoint: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub(crate) timeout: Duration,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
}

impl Default for VoxBridge {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl VoxBridge {
    /// Create a client for `endpoint` with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Read `VOX_ENDPOINT` and `VOX_TIMEOUT_SECS`, falling back to the
    /// defaults for whichever is unset.
    pub fn load_from_env() -> Result<Self, VoxRequestError> {
        let endpoint = std::env::var("VOX_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        validate_endpoint(&endpoint)?;

        let timeout = match std::env::var("VOX_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self::builder().endpoint(endpoint).timeout(timeout).build())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create request helper for internal use
    fn request_helper(&self) -> VoxRequestHelper {
        VoxRequestHelper::new(self.client.clone(), &self.endpoint, self.timeout)
    }
}

impl VoxBridge {
    /// POST a payload and return the decoded 200 body.
    pub async fn submit(
        &self,
        payload: &RequestPayload,
    ) -> Result<ResponsePayload, VoxRequestError> {
        validate_endpoint(&self.endpoint)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            kind = %payload.kind(),
            timeout_secs = self.timeout.as_secs(),
            "submitting payload"
        );

        let result = self.request_helper().post_json(payload).await;

        if let Err(ref e) = result {
            tracing::warn!(error = %e, "endpoint request failed");
        }

        result
    }

    /// Shape `selection` into a payload and submit it.
    pub async fn process(
        &self,
        selection: &InputSelection,
    ) -> Result<ResponsePayload, VoxRequestError> {
        let payload = build_payload(selection)?;
        self.submit(&payload).await
    }
}

impl fmt::Debug for VoxBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoxBridge")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Accept only absolute http(s) URLs.
pub fn validate_endpoint(endpoint: &str) -> Result<url::Url, VoxRequestError> {
    let url = url::Url::parse(endpoint)
        .map_err(|e| VoxRequestError::InvalidConfig(format!("endpoint {endpoint:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(VoxRequestError::InvalidConfig(format!(
            "endpoint {endpoint:?}: unsupported scheme {other:?}"
        ))),
    }
}

/// Parse a whole number of seconds; zero is rejected.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, VoxRequestError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(VoxRequestError::InvalidConfig(format!(
            "timeout {raw:?}: expected a positive number of seconds"
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}
