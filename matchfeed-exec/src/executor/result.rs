use std::fmt;

use serde_json::Value as JsonValue;

use crate::executor::http::HttpError;

/// What a completed fetch hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub data: JsonValue,
    /// Host (and port, if any) the final attempt was sent to.
    pub hostname: String,
    pub status: FetchStatus,
    /// Attempts made, including the successful one.
    pub attempts: usize,
}

impl Fetched {
    pub fn is_unavailable(&self) -> bool {
        matches!(self.status, FetchStatus::Unavailable(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    /// The upstream answered with a permanent "this match cannot be fetched" state.
    /// `data` holds the raw envelope so callers can branch on it.
    Unavailable(UnavailableReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// `result.status == 15`: the player's match history is private.
    PrivateMatch,
    PracticeMatch,
    NoMatchId,
    MatchNotFound,
}

impl UnavailableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnavailableReason::PrivateMatch => "private_match",
            UnavailableReason::PracticeMatch => "practice_match",
            UnavailableReason::NoMatchId => "no_match_id",
            UnavailableReason::MatchNotFound => "match_not_found",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single attempt failed in a way that may be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryCause {
    Transport(HttpError),
    Status(u16),
    EmptyBody,
    MalformedBody,
    MissingEnvelope,
    /// `result.error` set on an otherwise well-formed envelope.
    UpstreamError(String),
    /// `result.status` reported a generic failure code.
    UpstreamStatus(i64),
}

impl RetryCause {
    /// Failures of the call or of the response shape, as opposed to errors the API reported.
    pub fn is_shape_failure(&self) -> bool {
        !matches!(self, RetryCause::UpstreamError(_) | RetryCause::UpstreamStatus(_))
    }
}

impl fmt::Display for RetryCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryCause::Transport(e) => write!(f, "{e}"),
            RetryCause::Status(s) => write!(f, "unexpected HTTP status {s}"),
            RetryCause::EmptyBody => f.write_str("empty response body"),
            RetryCause::MalformedBody => f.write_str("response body is not JSON"),
            RetryCause::MissingEnvelope => f.write_str("no known response envelope"),
            RetryCause::UpstreamError(e) => write!(f, "upstream error: {e}"),
            RetryCause::UpstreamStatus(s) => write!(f, "upstream status {s}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid fetch request: {0}")]
    InvalidRequest(String),
    #[error("invalid url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("transport failure on attempt {attempts}: {source}")]
    Transport { attempts: usize, source: HttpError },
    #[error("invalid response on attempt {attempts}: {cause}")]
    InvalidResponse { attempts: usize, cause: RetryCause },
    #[error("invalid data on attempt {attempts}: {cause}")]
    InvalidData { attempts: usize, cause: RetryCause },
    #[error("gave up after {attempts} attempts: {last}")]
    AttemptsExhausted { attempts: usize, last: RetryCause },
}

impl FetchError {
    pub(crate) fn from_cause(cause: RetryCause, attempts: usize) -> Self {
        match cause {
            RetryCause::Transport(source) => FetchError::Transport { attempts, source },
            cause if cause.is_shape_failure() => FetchError::InvalidResponse { attempts, cause },
            cause => FetchError::InvalidData { attempts, cause },
        }
    }

    /// Attempts made before the error surfaced, if any request went out.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            FetchError::Transport { attempts, .. }
            | FetchError::InvalidResponse { attempts, .. }
            | FetchError::InvalidData { attempts, .. }
            | FetchError::AttemptsExhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}
