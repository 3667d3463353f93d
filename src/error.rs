//! Error types for the dashboard's outbound HTTP calls.

use thiserror::Error;

/// Failure of a call to the REST backend or the feed relay.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request completed but the server rejected it
    #[error("HTTP error! status: {status}")]
    Status {
        status: u16,
        /// `error` field of the response body, when the server sent one
        message: Option<String>,
    },

    /// The response body could not be decoded
    #[error("malformed response body: {0}")]
    Body(#[source] reqwest::Error),

    /// A configured base URL could not be parsed
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ClientError {
    /// The message to show a user: the server's own words when it gave any.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}
