use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::state::PlayerId;
use crate::error::AppError;

/// Header carrying the acting user's id. Identity itself is established
/// upstream; the backend trusts this value.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The acting user of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub PlayerId);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| CurrentUser(v.to_string()))
            .ok_or_else(AppError::unauthorized);
        ready(user)
    }
}
