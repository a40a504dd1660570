use thiserror::Error;

/// Failure of a single round trip to the employee resource.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error. Status: {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid {name} header value: {reason}")]
    InvalidHeader { name: &'static str, reason: String },
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Request(err) => err.status().map(|status| status.as_u16()),
            Self::InvalidHeader { .. } => None,
        }
    }
}
