/**
 * Streamed Responses
 *
 * Once the first body chunk has been handed to the transport the status line
 * and headers are gone, so an error can no longer become an envelope. This
 * module draws that line explicitly: an error before the first chunk is
 * returned as an `ApiError`; an error after it is logged and forwarded to the
 * transport, which aborts the body. A request never gets two responses.
 */

use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::{stream, Stream, StreamExt};

use crate::backend::error::conversion::normalize;
use crate::backend::error::types::ApiError;

/// Build a streamed response, or fail before anything is written
pub async fn stream_response<S>(chunks: S) -> Result<Response, ApiError>
where
    S: Stream<Item = Result<Bytes, ApiError>> + Send + 'static,
{
    let mut chunks = Box::pin(chunks);

    let first = match chunks.next().await {
        None => return Ok(Body::empty().into_response()),
        Some(Err(error)) => return Err(error),
        Some(Ok(first)) => first,
    };

    let rest = chunks.map(|chunk| {
        chunk.map_err(|error| {
            let (status, envelope) = normalize(&error);
            tracing::error!(
                status = status.as_u16(),
                message = %envelope.message,
                chain = %error.diagnostic(),
                "response already committed, aborting body"
            );
            error
        })
    });

    let body = Body::from_stream(stream::once(async move { Ok::<_, ApiError>(first) }).chain(rest));
    Ok(body.into_response())
}
