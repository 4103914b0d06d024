use std::sync::Arc;

use zeroize::Zeroizing;

/// A Steam Web API key. Not `Display`, redacted in `Debug`, zeroized on drop.
#[derive(Clone)]
pub struct ApiKey(Arc<Zeroizing<String>>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::new(Zeroizing::new(key.into())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Split a comma-separated key list, skipping blanks.
pub fn parse_key_list(list: &str) -> Vec<ApiKey> {
    list.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ApiKey::new)
        .collect()
}
