use thiserror::Error;

/// Errors that can occur while shaping, sending or rendering a submission.
#[derive(Error, Debug)]
pub enum VoxRequestError {
    /// Text was empty or whitespace-only, or no audio bytes were supplied
    #[error("nothing to send: write some text or upload an audio file")]
    EmptyInput,

    /// The endpoint did not answer within the configured timeout
    #[error("the request timed out")]
    Timeout,

    /// The endpoint could not be reached
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other transport-level fault
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a status other than 200
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A 200 response whose body is not the expected JSON object
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// `audio_base64` in the response could not be decoded
    #[error("could not decode audio: {0}")]
    AudioDecode(String),

    /// Uploaded file has an extension other than mp3 or wav
    #[error("unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Endpoint URL or timeout setting is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A submission is already in flight on this session
    #[error("a submission is already in progress")]
    Busy,
}

impl VoxRequestError {
    /// Map a reqwest failure onto the transport-level variants.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Build a `Server` error from a non-200 status and its raw body.
pub fn parse_error_response(status: reqwest::StatusCode, body: &bytes::Bytes) -> VoxRequestError {
    let code = status.as_u16();

    let message = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => extract_error_message(&json)
            .unwrap_or_else(|| format!("Unknown error (status {code})")),
        Err(_) => format!("Server error (status {code}): response body is not valid JSON"),
    };

    VoxRequestError::Server {
        status: code,
        message,
    }
}

/// Pull a human readable reason out of an error body.
///
/// `error` takes precedence over `message`. Gateway style bodies of the form
/// `{"error": {"message": "..."}}` are unwrapped.
fn extract_error_message(json: &serde_json::Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| json.get(key))
        .find(|value| !value.is_null())
        .map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(obj) => match obj.get("message") {
                Some(serde_json::Value::String(s)) => s.clone(),
                _ => value.to_string(),
            },
            other => other.to_string(),
        })
}
