use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::web::BytesMut;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Largest request body any room or game command needs.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body extractor whose failures render as problem+json `400 BAD_REQUEST`
/// instead of actix's plain-text default.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let path = req.path().to_string();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_ctx::trace_id(), path = %path, error = %e, "body read failed");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    debug!(path = %path, limit = MAX_BODY_BYTES, "body too large");
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(path = %path, body_size = body.len(), error = %e, "JSON body rejected");
                    AppError::bad_request(ErrorCode::BadRequest, describe(&e))
                })
        })
    }
}

/// Client-facing summary of a JSON error. Data errors carry serde's message
/// (unknown variant, missing field) since it names only schema, never input.
fn describe(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!(
            "Invalid JSON at line {} column {}",
            error.line(),
            error.column()
        ),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => format!("Invalid JSON: {}", strip_position(&error.to_string())),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

fn strip_position(message: &str) -> &str {
    message
        .rfind(" at line ")
        .map_or(message, |cut| &message[..cut])
}
