use reqwest::Url;
use tracing::{debug, warn};

use crate::{
    classify::classify,
    context::CallContext,
    endpoint::{
        Endpoint,
        air_pollution::{AirPollutionReport, AirPollutionRequest},
        find::{FindReport, FindRequest},
        geocoding::{DirectGeocodingRequest, Place, ReverseGeocodingRequest},
        onecall::{OneCallRequest, WeatherReport},
    },
    error::{Error, QueryError},
    query::{DEFAULT_BASE_URL, parse_base_url},
    transport::{ReqwestTransport, Transport},
};

/// Entry point for all endpoints.
///
/// Holds only the API key, the base URL and a transport, so a client can be
/// cloned freely and shared between tasks. Each call runs the same pipeline:
/// build the query, fetch it once, classify the answer.
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    api_key: String,
    base_url: Url,
    transport: T,
}

impl Client<ReqwestTransport> {
    pub fn new(api_key: impl Into<String>) -> Result<Self, QueryError> {
        Self::with_transport(api_key, DEFAULT_BASE_URL, ReqwestTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(
        api_key: impl Into<String>,
        base_url: &str,
        transport: T,
    ) -> Result<Self, QueryError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(QueryError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            base_url: parse_base_url(base_url)?,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one request through the build → fetch → classify pipeline.
    pub async fn execute<E>(&self, request: &E, ctx: &CallContext) -> Result<E::Success, Error>
    where
        E: Endpoint + Sync,
    {
        let query = request.build(&self.base_url, &self.api_key)?;
        debug!(endpoint = E::NAME, url = %query, "sending request");
        ctx.observer().on_request(E::NAME, &query);

        let response = ctx.run(self.transport.get(query.url())).await?;
        ctx.observer().on_response(E::NAME, &response);

        if response.status != 200 {
            warn!(
                endpoint = E::NAME,
                status = response.status,
                "request answered with a non-success status"
            );
        } else {
            debug!(endpoint = E::NAME, bytes = response.body.len(), "received response");
        }

        classify::<E>(response)
    }

    pub async fn one_call(
        &self,
        request: &OneCallRequest,
        ctx: &CallContext,
    ) -> Result<WeatherReport, Error> {
        self.execute(request, ctx).await
    }

    pub async fn air_pollution(
        &self,
        request: &AirPollutionRequest,
        ctx: &CallContext,
    ) -> Result<AirPollutionReport, Error> {
        self.execute(request, ctx).await
    }

    pub async fn direct_geocoding(
        &self,
        request: &DirectGeocodingRequest,
        ctx: &CallContext,
    ) -> Result<Vec<Place>, Error> {
        self.execute(request, ctx).await
    }

    pub async fn reverse_geocoding(
        &self,
        request: &ReverseGeocodingRequest,
        ctx: &CallContext,
    ) -> Result<Vec<Place>, Error> {
        self.execute(request, ctx).await
    }

    pub async fn find(&self, request: &FindRequest, ctx: &CallContext) -> Result<FindReport, Error> {
        self.execute(request, ctx).await
    }
}
