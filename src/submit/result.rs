//! Mapping of remote status codes to user-facing outcomes

use std::fmt;

/// Outcome of one shared-cart submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Cart created, with the URL that opens it
    Success(String),
    /// Request rejected because of its content or credentials
    ClientError(u16, String),
    /// Remote side failed
    ServerError(u16, String),
    /// Status code with no known meaning
    UnknownError(u16),
    /// Request never produced a usable response
    TransportException(String),
}

/// Explanation for the status codes NBIA is known to return
pub const fn status_message(code: u16) -> Option<&'static str> {
    match code {
        400 => Some("malformed request: bad formatting, invalid identifier, or missing permission"),
        401 => Some("unauthorized, bad credentials"),
        403 => Some("access denied to some requested data"),
        404 => Some("one or more identifiers not found"),
        408 => Some("request timed out, safe to retry manually"),
        502 => Some("upstream unreachable"),
        _ => None,
    }
}

/// URL of the search page with the saved cart loaded
pub fn cart_url(cart_search_url: &str, name: &str) -> String {
    format!("{cart_search_url}?saved-cart={}", urlencoding::encode(name))
}

impl SubmissionResult {
    /// Classify a create-cart status code
    pub fn from_status(code: u16, cart_url: &str) -> Self {
        match (code, status_message(code)) {
            (200, _) => Self::Success(cart_url.to_string()),
            (502, Some(message)) => Self::ServerError(code, message.to_string()),
            (_, Some(message)) => Self::ClientError(code, message.to_string()),
            (_, None) => Self::UnknownError(code),
        }
    }

    /// Classify a rejected login
    ///
    /// Always a client error: the credentials given were not accepted.
    pub fn from_auth_status(code: u16) -> Self {
        let message = status_message(code).unwrap_or("authentication failed");
        Self::ClientError(code, message.to_string())
    }

    /// Wrap a failure to reach the service
    pub fn transport(error: &impl fmt::Display) -> Self {
        Self::TransportException(error.to_string())
    }

    /// Whether the cart was created
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Status code reported by the remote, if any
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::Success(_) => Some(200),
            Self::ClientError(code, _) | Self::ServerError(code, _) | Self::UnknownError(code) => {
                Some(*code)
            }
            Self::TransportException(_) => None,
        }
    }
}

impl fmt::Display for SubmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(url) => write!(f, "Shared cart created successfully: {url}"),
            Self::ClientError(code, message) => write!(f, "Client error ({code}): {message}"),
            Self::ServerError(code, message) => write!(f, "Server error ({code}): {message}"),
            Self::UnknownError(code) => write!(f, "Unexpected response from NBIA (status {code})"),
            Self::TransportException(details) => write!(f, "Failed to reach NBIA: {details}"),
        }
    }
}
