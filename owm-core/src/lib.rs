//! Core library for the `owm` CLI.
//!
//! This crate defines:
//! - Typed requests for the OpenWeatherMap one-call, air pollution,
//!   geocoding and find endpoints, and the URLs they encode to
//! - A single-attempt HTTP transport with per-call deadline and cancellation
//! - Status-driven classification of answers into typed results or errors
//! - Configuration & credentials handling
//!
//! ```no_run
//! # async fn demo() -> Result<(), owm_core::Error> {
//! use owm_core::{CallContext, Client, OneCallRequest, Units};
//!
//! let client = Client::new("my-api-key")?;
//! let report = client
//!     .one_call(&OneCallRequest::new(45.07, 7.69).units(Units::Metric), &CallContext::new())
//!     .await?;
//! println!("{}", report.timezone);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod observer;
pub mod params;
pub mod query;
pub mod transport;

pub use client::Client;
pub use config::Config;
pub use context::{CallContext, CancelToken};
pub use endpoint::{
    Endpoint,
    air_pollution::{AirPollutionReport, AirPollutionRequest},
    find::{FindReport, FindRequest},
    geocoding::{DirectGeocodingRequest, Place, ReverseGeocodingRequest},
    onecall::{OneCallRequest, WeatherReport},
};
pub use error::{ApiError, ApiErrorCode, DecodeError, Error, QueryError, TransportError};
pub use model::Presence;
pub use observer::{NoopObserver, Observer, TracingObserver};
pub use params::{Exclude, Lang, Units};
pub use query::BuiltQuery;
pub use transport::{RawResponse, ReqwestTransport, Transport};
