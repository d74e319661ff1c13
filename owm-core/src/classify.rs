use crate::{
    endpoint::Endpoint,
    error::{ApiError, DecodeError, Error},
    transport::RawResponse,
};

/// Turn a raw answer into the endpoint's success value or a typed error.
///
/// The status code alone picks the schema: `200` decodes as
/// [`Endpoint::Success`], anything else as [`Endpoint::Failure`]. A body that
/// does not match the selected schema is a [`DecodeError`]; the other schema
/// is never tried.
pub fn classify<E: Endpoint>(response: RawResponse) -> Result<E::Success, Error> {
    if response.status != 200 {
        let failure: E::Failure =
            serde_json::from_slice(&response.body).map_err(|reason| DecodeError::Failure {
                status: response.status,
                status_text: response.status_text(),
                reason,
            })?;
        let api_error: ApiError = failure.into();
        return Err(api_error.into());
    }

    serde_json::from_slice(&response.body).map_err(|reason| {
        DecodeError::Success {
            endpoint: E::NAME,
            reason,
        }
        .into()
    })
}
