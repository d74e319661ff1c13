use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{ApiError, ApiErrorCode, QueryError},
    query::BuiltQuery,
};

pub mod air_pollution;
pub mod find;
pub mod geocoding;
pub mod onecall;

/// One API endpoint: how its request is encoded and which schemas its
/// answers decode into.
///
/// The HTTP status alone selects the schema. A `200` body is decoded as
/// [`Endpoint::Success`], anything else as [`Endpoint::Failure`].
pub trait Endpoint {
    type Success: DeserializeOwned;
    type Failure: DeserializeOwned + Into<ApiError>;

    /// Short name used in logs and error messages.
    const NAME: &'static str;

    fn build(&self, base: &Url, api_key: &str) -> Result<BuiltQuery, QueryError>;
}

/// Failure body with an integer code: `{"cod": 401, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FailureBody {
    pub cod: i64,
    pub message: String,
}

impl From<FailureBody> for ApiError {
    fn from(body: FailureBody) -> Self {
        ApiError::new(ApiErrorCode::Numeric(body.cod), body.message)
    }
}
