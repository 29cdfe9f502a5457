//! Request extractors that hand handlers a cleaned copy of their input.
//!
//! - [`SanitizedQuery`]: query-string map with every value HTML-escaped.
//! - [`JsonBody`]: decoded JSON object, as sent.
//! - [`SanitizedJson`]: decoded JSON object with top-level strings escaped.
//!
//! Bodies that are empty, not JSON, or not a JSON object decode to an empty
//! map, so handlers report the missing parameters instead of a parse error.

use crate::error::ServerError;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use catalog::sanitize::{sanitize_body, sanitize_params};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub struct SanitizedQuery(pub HashMap<String, String>);

impl<S> FromRequestParts<S> for SanitizedQuery
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
        Ok(Self(sanitize_params(raw)))
    }
}

pub struct JsonBody(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(body_rejection)?;
        Ok(Self(decode_object(&bytes)))
    }
}

pub struct SanitizedJson(pub Map<String, Value>);

impl<S> FromRequest<S> for SanitizedJson
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(body) = JsonBody::from_request(request, state).await?;
        Ok(Self(sanitize_body(body)))
    }
}

fn decode_object(bytes: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(object)) => object,
        _ => Map::new(),
    }
}

fn body_rejection(rejection: BytesRejection) -> ServerError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge(rejection.body_text())
    } else {
        ServerError::BadRequest(rejection.body_text())
    }
}
