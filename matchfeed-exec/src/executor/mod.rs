pub mod classify;
pub mod events;
mod fetcher;
pub mod http;
pub mod metrics;
mod request;
mod result;
mod types;

pub use classify::{classify_envelope, classify_response, Classification, ENVELOPES};
pub use events::{CompositeEventSink, EventSink, FetchEvent, NoOpEventSink, StdoutEventSink};
pub use fetcher::Fetcher;
pub use http::{HttpClient, HttpError, HttpResponse, ReqwestHttpClient};
pub use metrics::{FetchMetrics, MetricsCollector, MetricsEventSink};
pub use request::{FetchConfig, FetchRequest};
pub use result::{FetchError, FetchStatus, Fetched, RetryCause, UnavailableReason};
pub use types::FetcherConfig;
