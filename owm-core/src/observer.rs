use tracing::debug;

use crate::{query::BuiltQuery, transport::RawResponse};

/// Receives the wire-level view of a call: the URL about to be fetched and
/// the raw answer before it is classified.
pub trait Observer: Send + Sync {
    fn on_request(&self, _endpoint: &'static str, _query: &BuiltQuery) {}

    fn on_response(&self, _endpoint: &'static str, _response: &RawResponse) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Emits the masked URL and the response body as `tracing` debug events
/// under the `owm::wire` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_request(&self, endpoint: &'static str, query: &BuiltQuery) {
        debug!(target: "owm::wire", endpoint, url = %query, "request");
    }

    fn on_response(&self, endpoint: &'static str, response: &RawResponse) {
        debug!(
            target: "owm::wire",
            endpoint,
            status = response.status,
            body = %String::from_utf8_lossy(&response.body),
            "response"
        );
    }
}
