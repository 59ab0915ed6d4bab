//! Shared request dispatch and error mapping.

use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

/// Send a request and decode the JSON body, mapping non-success statuses to
/// [`ClientError::Service`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> ClientResult<T> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(service_error(status.as_u16(), body))
    }
}

/// Send a request and return the raw body bytes.
pub(crate) async fn send_bytes(request: reqwest::RequestBuilder) -> ClientResult<Vec<u8>> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response.bytes().await?.to_vec())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(service_error(status.as_u16(), body))
    }
}

/// Send a request and return the body text.
pub(crate) async fn send_text(request: reqwest::RequestBuilder) -> ClientResult<String> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response.text().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(service_error(status.as_u16(), body))
    }
}

/// Build a [`ClientError::Service`], lifting the message out of a JSON error
/// body when the service sent one.
fn service_error(status: u16, body: String) -> ClientError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    ClientError::Service { status, message }
}
