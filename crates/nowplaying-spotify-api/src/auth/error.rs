use http::StatusCode;

/// Terminal failures of the browser handshake.
#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    #[error("State mismatch: {received:?} != {expected:?}")]
    StateMismatch {
        expected: String,
        received: Option<String>,
    },
    #[error("Authorization was denied: {0}")]
    Denied(String),
    #[error("Redirect did not carry an authorization code")]
    MissingCode,
    #[error("Couldn't get token: {0:#}")]
    Exchange(eyre::Report),
}

impl HandshakeError {
    /// Status shown to the browser that hit the callback.
    pub fn status(&self) -> StatusCode {
        match self {
            HandshakeError::StateMismatch { .. } => StatusCode::NOT_FOUND,
            HandshakeError::Denied(_)
            | HandshakeError::MissingCode
            | HandshakeError::Exchange(_) => StatusCode::FORBIDDEN,
        }
    }
}
