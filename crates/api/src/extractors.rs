//! Request identity extraction.
//!
//! Authentication happens at the gateway, which forwards the verified caller
//! in `x-user-*` headers. Handlers that need an actor take [`CurrentActor`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use staybook_domain::{Actor, Role};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_FIRST_NAME_HEADER: &str = "x-user-first-name";
pub const USER_LAST_NAME_HEADER: &str = "x-user-last-name";

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers).map(Self)
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim).filter(|v| !v.is_empty())
}

/// Build an [`Actor`] from gateway headers.
///
/// A missing user id is a 401; an unknown role is a 400.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, ApiError> {
    let id = header(headers, USER_ID_HEADER)
        .ok_or_else(|| ApiError::unauthorized("Not authorized to access this route"))?;

    let role = match header(headers, USER_ROLE_HEADER) {
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| ApiError::bad_request(format!("Unknown role '{raw}'")))?,
        None => Role::default(),
    };

    let mut actor = Actor::new(id, role);
    actor.email = header(headers, USER_EMAIL_HEADER).map(str::to_string);
    actor.first_name = header(headers, USER_FIRST_NAME_HEADER).map(str::to_string);
    actor.last_name = header(headers, USER_LAST_NAME_HEADER).map(str::to_string);
    Ok(actor)
}
