//! JSON/XML content negotiation for request and response bodies.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        request::Parts,
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use std::convert::Infallible;
use tracing::error;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFormat {
    #[default]
    Json,
    Xml,
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("body is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ContentFormat {
    /// Maps a single media type (parameters already stripped) onto a format.
    fn from_media_type(media_type: &str) -> Option<Self> {
        let media_type = media_type.trim().to_ascii_lowercase();
        match media_type.as_str() {
            "application/json" | "text/json" | "application/*" | "*/*" => Some(ContentFormat::Json),
            "application/xml" | "text/xml" => Some(ContentFormat::Xml),
            other if other.ends_with("+json") => Some(ContentFormat::Json),
            other if other.ends_with("+xml") => Some(ContentFormat::Xml),
            _ => None,
        }
    }

    /// Picks the response format from an `Accept` header value. Entries are ranked by q-value,
    /// equal weights keep header order, and anything unsupported falls back to JSON.
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return ContentFormat::Json;
        };

        let mut ranges: Vec<(&str, f32)> = accept
            .split(',')
            .filter_map(|range| {
                let mut parts = range.split(';');
                let media_type = parts.next()?.trim();
                let quality = parts
                    .filter_map(|param| {
                        let (name, value) = param.split_once('=')?;
                        (name.trim() == "q").then(|| value.trim().parse::<f32>().ok())?
                    })
                    .next()
                    .unwrap_or(1.0);
                (!media_type.is_empty() && quality > 0.0).then_some((media_type, quality))
            })
            .collect();
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges
            .into_iter()
            .find_map(|(media_type, _)| Self::from_media_type(media_type))
            .unwrap_or_default()
    }

    /// Format of a request body, or `None` when the content type is missing or unsupported.
    pub fn from_content_type(content_type: Option<&str>) -> Option<Self> {
        let media_type = content_type?.split(';').next()?;
        match Self::from_media_type(media_type)? {
            // Wildcards only make sense in Accept.
            _ if media_type.contains('*') => None,
            format => Some(format),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ContentFormat::Json => "application/json; charset=utf-8",
            ContentFormat::Xml => "application/xml; charset=utf-8",
        }
    }

    /// Serializes `value`. XML output is wrapped in a `root` element.
    pub fn encode<T: Serialize>(&self, root: &str, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            ContentFormat::Json => Ok(serde_json::to_vec(value)?),
            ContentFormat::Xml => quick_xml::se::to_string_with_root(root, value)
                .map(String::into_bytes)
                .map_err(|e| CodecError::Xml(e.to_string())),
        }
    }

    /// Deserializes a body. A JSON `null` decodes to `None`.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<Option<T>, CodecError> {
        match self {
            ContentFormat::Json => Ok(serde_json::from_slice(body)?),
            ContentFormat::Xml => quick_xml::de::from_str(std::str::from_utf8(body)?)
                .map(Some)
                .map_err(|e| CodecError::Xml(e.to_string())),
        }
    }
}

/// Response format negotiated from the request's `Accept` header.
impl<S: Send + Sync> FromRequestParts<S> for ContentFormat {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts.headers.get(ACCEPT).and_then(|v| v.to_str().ok());
        Ok(ContentFormat::from_accept(accept))
    }
}

/// Reads the raw body and its declared format. Blank bodies yield `None`.
async fn read_body<S: Send + Sync>(
    req: Request,
    state: &S,
) -> Result<Option<(ContentFormat, Bytes)>, ApiError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = Bytes::from_request(req, state)
        .await
        .map_err(|_| ApiError::MalformedRequest)?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let format = ContentFormat::from_content_type(content_type.as_deref())
        .ok_or(ApiError::UnsupportedMediaType)?;
    Ok(Some((format, body)))
}

/// A request body decoded as JSON or XML according to `Content-Type`.
/// Holds `None` when the body is empty or a JSON `null`.
#[derive(Debug)]
pub struct Payload<T>(pub Option<T>);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Some((format, body)) = read_body(req, state).await? else {
            return Ok(Payload(None));
        };
        format.decode(&body).map(Payload).map_err(|e| {
            error!("Failed to decode request body: {}", e);
            ApiError::MalformedRequest
        })
    }
}

/// A JSON-only request body, as used for patch documents.
#[derive(Debug)]
pub struct JsonPayload<T>(pub Option<T>);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match read_body(req, state).await? {
            None => Ok(JsonPayload(None)),
            Some((ContentFormat::Json, body)) => ContentFormat::Json
                .decode(&body)
                .map(JsonPayload)
                .map_err(|e| {
                    error!("Failed to decode JSON body: {}", e);
                    ApiError::MalformedRequest
                }),
            Some((ContentFormat::Xml, _)) => Err(ApiError::UnsupportedMediaType),
        }
    }
}

/// A response body rendered in the negotiated format.
#[derive(Debug)]
pub struct Formatted<T> {
    format: ContentFormat,
    root: &'static str,
    value: T,
}

impl<T> Formatted<T> {
    pub fn new(format: ContentFormat, root: &'static str, value: T) -> Self {
        Formatted {
            format,
            root,
            value,
        }
    }
}

impl<T: Serialize> IntoResponse for Formatted<T> {
    fn into_response(self) -> Response {
        match self.format.encode(self.root, &self.value) {
            Ok(body) => (
                [(CONTENT_TYPE, HeaderValue::from_static(self.format.mime()))],
                body,
            )
                .into_response(),
            Err(e) => {
                error!("Failed to encode {} response: {}", self.root, e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
