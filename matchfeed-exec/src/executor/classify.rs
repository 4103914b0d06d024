use serde_json::Value as JsonValue;

use crate::executor::http::HttpResponse;
use crate::executor::result::{RetryCause, UnavailableReason};

/// Top-level keys a well-formed Steam Web API response is wrapped in.
pub const ENVELOPES: [&str; 4] = ["result", "response", "player_infos", "teams"];

const PRIVATE_MATCH_STATUS: i64 = 15;
const GENERIC_FAILURE_STATUS: i64 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Success(JsonValue),
    Unavailable {
        reason: UnavailableReason,
        body: JsonValue,
    },
    Retryable(RetryCause),
}

/// Classify one HTTP response.
///
/// `steam_api` enables the envelope check and JSON requirement; other hosts only need a
/// 200 with a body that is not falsy JSON (`null`, `false`, `0`, `""`), and a body that is
/// not JSON is handed back as a string.
pub fn classify_response(resp: &HttpResponse, steam_api: bool) -> Classification {
    if resp.status != 200 {
        return Classification::Retryable(RetryCause::Status(resp.status));
    }
    if resp.body.iter().all(u8::is_ascii_whitespace) {
        return Classification::Retryable(RetryCause::EmptyBody);
    }

    let body = match serde_json::from_slice::<JsonValue>(&resp.body) {
        Ok(v) if !is_truthy(&v) => return Classification::Retryable(RetryCause::EmptyBody),
        Ok(v) => v,
        Err(_) if steam_api => return Classification::Retryable(RetryCause::MalformedBody),
        Err(_) => JsonValue::String(String::from_utf8_lossy(&resp.body).into_owned()),
    };

    if steam_api && !has_envelope(&body) {
        return Classification::Retryable(RetryCause::MissingEnvelope);
    }

    classify_envelope(body)
}

/// Apply the `result` envelope rules to an already validated body.
pub fn classify_envelope(body: JsonValue) -> Classification {
    let Some(result) = body.get("result").filter(|r| !r.is_null()) else {
        return Classification::Success(body);
    };

    let status = result.get("status").and_then(JsonValue::as_i64);
    let error = result.get("error").filter(|e| is_truthy(e));

    if let Some(reason) = unavailable_reason(status, error.and_then(JsonValue::as_str)) {
        return Classification::Unavailable { reason, body };
    }
    if let Some(e) = error {
        let message = e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string());
        return Classification::Retryable(RetryCause::UpstreamError(message));
    }
    if status == Some(GENERIC_FAILURE_STATUS) {
        return Classification::Retryable(RetryCause::UpstreamStatus(GENERIC_FAILURE_STATUS));
    }
    Classification::Success(body)
}

fn unavailable_reason(status: Option<i64>, error: Option<&str>) -> Option<UnavailableReason> {
    if status == Some(PRIVATE_MATCH_STATUS) {
        return Some(UnavailableReason::PrivateMatch);
    }
    match error? {
        "Practice matches are not available via GetMatchDetails" => {
            Some(UnavailableReason::PracticeMatch)
        }
        "No Match ID specified" => Some(UnavailableReason::NoMatchId),
        "Match ID not found" => Some(UnavailableReason::MatchNotFound),
        _ => None,
    }
}

fn has_envelope(body: &JsonValue) -> bool {
    ENVELOPES
        .iter()
        .any(|k| body.get(k).is_some_and(is_truthy))
}

// The upstream pads absent fields with "", 0 or false as often as it omits them.
fn is_truthy(v: &JsonValue) -> bool {
    match v {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
