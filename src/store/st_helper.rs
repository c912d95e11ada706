use reqwest::{Error, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::constants::PERMISSION_DENIED;
use crate::raw_types::{RawPushResponse, RawStoreError};
use crate::types;
use crate::types::BoardError;

/// Converts an unsuccessful response into the matching error. The store sends its error
/// message as `{"error": "..."}`; if it is there, it is kept as context.
///
/// # Parameters
/// - `status`: The status code.
/// - `body`: The response body.
///
/// # Returns
/// The error.
pub(crate) fn status_error(status: StatusCode, body: &str) -> BoardError {
    let message = serde_json::from_str::<RawStoreError>(body)
        .ok()
        .map(|e| e.error);

    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || message.as_deref() == Some(PERMISSION_DENIED)
    {
        return BoardError::PermissionDenied;
    }

    BoardError::BadStatusCode(status.as_u16(), message)
}

/// Extracts text from the given response, handling the possibility that a bad status code
/// occurs.
///
/// # Parameters
/// - `res`: The initial response.
///
/// # Returns
/// The result of processing the response.
pub(crate) async fn extract_text(res: Result<Response, Error>) -> types::Result<String> {
    let r = res?;
    let status = r.status();
    let text = r.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &text));
    }

    Ok(text)
}

/// Processes a GET response from the resulting text representing JSON, if any.
///
/// # Parameters
/// - `res`: The string containing JSON to convert.
///
/// # Returns
/// The result of converting the JSON to the deserialized form.
pub(crate) fn process_get_text<T: DeserializeOwned>(res: String) -> types::Result<T> {
    serde_json::from_str::<T>(&res).map_err(BoardError::SerdeError)
}

/// Processes a GET response from the resulting JSON, if any. This is equivalent to calling
/// - `extract_text`, followed by
/// - `process_get_text`.
///
/// # Parameters
/// - `res`: The initial response.
///
/// # Returns
/// The result of processing the response.
pub(crate) async fn process_get_result<T: DeserializeOwned>(
    res: Result<Response, Error>,
) -> types::Result<T> {
    let r = extract_text(res).await?;
    process_get_text(r)
}

/// Processes the response to a `POST`, which creates a new child with a generated key.
///
/// # Parameters
/// - `res`: The initial response.
///
/// # Returns
/// The generated key.
pub(crate) async fn process_push_response(res: Result<Response, Error>) -> types::Result<String> {
    process_get_result::<RawPushResponse>(res)
        .await
        .map(|r| r.name)
}

/// Processes the response to a `PATCH` or `DELETE`. The body is ignored.
///
/// A `404` is treated as success for a delete, since the item is gone either way.
///
/// # Parameters
/// - `res`: The initial response.
/// - `is_delete`: Whether the request was a delete.
///
/// # Returns
/// Nothing if the write went through, or the error.
pub(crate) async fn process_write_response(
    res: Result<Response, Error>,
    is_delete: bool,
) -> types::Result<()> {
    match extract_text(res).await {
        Ok(_) => Ok(()),
        Err(BoardError::BadStatusCode(404, _)) if is_delete => Ok(()),
        Err(e) => Err(e),
    }
}
