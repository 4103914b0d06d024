use std::fmt::{Display, Write};

use crate::types::NumericId;

pub const STEAM_API_BASE: &str = "http://api.steampowered.com";
pub const STEAM_API_HOST: &str = "api.steampowered.com";

/// Appends query parameters to a Steam API endpoint.
///
/// Every URL starts with an empty `key=` placeholder. Optional parameters are only
/// written when a value is present, so absent fields never leave `&name=` behind.
pub(crate) struct ApiUrl {
    buf: String,
}

impl ApiUrl {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            buf: format!("{STEAM_API_BASE}{path}?key="),
        }
    }

    pub(crate) fn param(mut self, name: &str, value: impl Display) -> Self {
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "&{name}={value}");
        self
    }

    pub(crate) fn opt(self, name: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    pub(crate) fn text(self, name: &str, value: &str) -> Self {
        let encoded = urlencoding::encode(value).into_owned();
        self.param(name, encoded)
    }

    pub(crate) fn build(self) -> String {
        self.buf
    }
}

/// The match API treats 0 as "not set"; so do we.
pub(crate) fn present(id: Option<NumericId>) -> Option<NumericId> {
    id.filter(|v| v.get() != 0)
}
