//! Lenient JSON request bodies.
//!
//! Bodies are read regardless of `Content-Type`. An empty body or a JSON value
//! that is not an object reads as `{}`, and request types mark their fields
//! with [`non_empty_string`] so a wrongly typed field reads as missing.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::AppError;

/// JSON body extractor that reports failures as [`AppError`].
///
/// Put it last in the handler's argument list so authentication extractors
/// run before the body is read.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::InternalError(format!("Failed to read request body: {rejection}"))
            }
        })?;

        parse_body(&bytes).map(JsonBody)
    }
}

/// Decode raw body bytes into `T`.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let value = if bytes.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(bytes).map_err(|_| AppError::InvalidJson)?
    };

    let object = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    serde_json::from_value(Value::Object(object)).map_err(|_| AppError::InvalidJson)
}

/// Read a field as a non-empty string. Any other JSON value reads as `None`.
///
/// Use together with `#[serde(default)]` so an absent field is also `None`.
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}
