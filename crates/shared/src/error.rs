use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid employee status code {0}; expected 0 (active) or 1 (inactive)")]
    InvalidStatus(i64),
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}
