use thiserror::Error;

pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Upgrade your plan at https://iplocate.io/account";

#[derive(Debug, Error)]
pub enum IpLocateError {
    /// Bad construction input. Never returned from a lookup.
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    InvalidIp(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    RateLimit(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    /// Timeouts, transport failures and undecodable responses.
    #[error("{0}")]
    Client(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    InvalidIp,
    Authentication,
    NotFound,
    RateLimit,
    Api,
    Client,
}

impl IpLocateError {
    pub fn invalid_ip(ip: &str) -> Self {
        Self::InvalidIp(format!("Invalid IP address: {ip}"))
    }

    /// Maps a non-success status to its error kind.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::InvalidIp(message),
            403 => Self::Authentication(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimit(message),
            _ => Self::Api { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidIp(_) => ErrorKind::InvalidIp,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Api { .. } => ErrorKind::Api,
            Self::Client(_) => ErrorKind::Client,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::InvalidIp(message)
            | Self::Authentication(message)
            | Self::NotFound(message)
            | Self::RateLimit(message)
            | Self::Client(message)
            | Self::Api { message, .. } => message,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IpLocateError {
    /// The request URL carries the API key, so it never reaches the message.
    fn from(err: reqwest::Error) -> Self {
        Self::Client(format!("Request failed: {}", err.without_url()))
    }
}
