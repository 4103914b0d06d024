mod key;
mod redact;

pub use key::{parse_key_list, ApiKey};
pub use redact::{redact_url, KEY_PARAM};
