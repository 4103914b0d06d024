#![forbid(unsafe_code)]

//! Resilient fetching from the Steam Web API.
//!
//! A [`Fetcher`] takes a URL (usually the `url` of a
//! [`RequestDescriptor`](matchfeed_core::RequestDescriptor)), attaches a key and host from its
//! [`ApiPool`], paces and sends the request, validates the response and retries until it has
//! data or a terminal answer.

pub mod executor;
pub mod pool;
pub mod retry;
pub mod secrets;

pub use crate::executor::{
    FetchConfig, FetchError, FetchRequest, FetchStatus, Fetched, Fetcher, FetcherConfig,
    HttpClient, HttpError, HttpResponse, ReqwestHttpClient, UnavailableReason,
};
pub use crate::pool::{ApiHost, ApiPool, PoolError};
pub use crate::secrets::ApiKey;
