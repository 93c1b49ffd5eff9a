use serde::{de::DeserializeOwned, Serialize};

use crate::{BaasError, Result, ServerError};

/// Turns a non-2xx body into an error.
///
/// A body that is not itself a `{code, error}` object is reported as the
/// decode failure, never masked behind a synthetic server error.
pub(crate) fn decode_server_error(status: u16, body: &str) -> BaasError {
    match serde_json::from_str::<ServerError>(body) {
        Ok(mut error) => {
            error.status = status;
            BaasError::Server(error)
        }
        Err(err) => BaasError::Decode(err),
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(BaasError::Decode)
}

pub(crate) fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(BaasError::Encode)
}
