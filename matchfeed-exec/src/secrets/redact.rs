use url::Url;

/// Query parameter that carries the Steam Web API credential.
pub const KEY_PARAM: &str = "key";

const REDACTED: &str = "<redacted>";

/// Render a URL for logs and events with the credential value replaced.
///
/// Only the `key` parameter is touched; every other pair is kept byte-for-byte.
pub fn redact_url(url: &Url) -> String {
    let Some(query) = url.query() else {
        return url.to_string();
    };

    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if name == KEY_PARAM => format!("{KEY_PARAM}={REDACTED}"),
            None if pair == KEY_PARAM => format!("{KEY_PARAM}={REDACTED}"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    match url.fragment() {
        Some(fragment) => format!("{base}?{query}#{fragment}"),
        None => format!("{base}?{query}"),
    }
}
