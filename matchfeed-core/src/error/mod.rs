use thiserror::Error;

use crate::types::JobKind;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The job kind name is not one of the supported variants.
    ///
    /// This is a programming error on the caller's side; it is never retried.
    #[error("unknown job kind: {0}")]
    UnknownKind(String),
    #[error("invalid payload for {kind}: {message}")]
    InvalidPayload { kind: JobKind, message: String },
}

impl BuildError {
    pub fn invalid_payload(kind: JobKind, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteamIdError {
    #[error("not a decimal steam id: {0:?}")]
    Parse(String),
    #[error("steam id out of range: {0}")]
    OutOfRange(String),
}
