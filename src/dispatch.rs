use reqwest::{header, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    decode::{decode_body, decode_server_error, encode_body},
    BaasError, Result,
};

/// Sends a decorated request and decodes the success body into `T`.
///
/// Decision order:
/// 1. transport failure → [`BaasError::Transport`], no retry;
/// 2. status outside `200..300` → [`BaasError::Server`], or
///    [`BaasError::Decode`] if the body is not an error object;
/// 3. otherwise the body is decoded into `T`.
///
/// # Example
///
/// ```no_run
/// use baas_http::{execute, AuthMode, Method, Session};
///
/// # async fn run(session: &Session) -> baas_http::Result<()> {
/// let request = session.request(Method::GET, "/config", AuthMode::Master)?;
/// let config: serde_json::Value = execute(request).await?;
/// # Ok(())
/// # }
/// ```
pub async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let body = send(request).await?;
    decode_body(&body)
}

/// Like [`execute`], but discards the success body.
pub async fn execute_discard(request: RequestBuilder) -> Result<()> {
    send(request).await.map(drop)
}

pub(crate) fn with_json<B: Serialize + ?Sized>(
    request: RequestBuilder,
    body: &B,
) -> Result<RequestBuilder> {
    let bytes = encode_body(body)?;
    Ok(request
        .header(header::CONTENT_TYPE, "application/json")
        .body(bytes))
}

async fn send(request: RequestBuilder) -> Result<String> {
    let response = request.send().await.map_err(BaasError::Transport)?;
    let status = response.status();
    let body = response.text().await.map_err(BaasError::Transport)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(status = status.as_u16(), "received response");

    if !status.is_success() {
        return Err(decode_server_error(status.as_u16(), &body));
    }
    Ok(body)
}
