use crate::types::JobKind;

/// A fully specified request for one job, ready to hand to a fetcher.
///
/// `url` carries an empty `key=` placeholder for API kinds; the fetcher fills it in.
/// `title` is a display label only and must not be parsed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestDescriptor {
    pub kind: JobKind,
    pub url: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}
