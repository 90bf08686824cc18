use std::{borrow::Cow, sync::OnceLock};

use bytes::Bytes;
use serde_json::Value;

use crate::http_client::{request::RequestHeaders, response::Response};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("response body is not valid JSON: {0}")]
pub struct BodyParseError(pub String);

/// Snapshot of one completed response. The body is parsed as JSON on first
/// use and the result is kept for every later expectation.
#[derive(Debug, Clone)]
pub struct ResponseCapture {
    status: u16,
    headers: RequestHeaders,
    body: Bytes,
    json: OnceLock<Result<Value, BodyParseError>>,
}

impl ResponseCapture {
    pub fn new(status: u16, headers: RequestHeaders, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            json: OnceLock::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.find(name).map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json(&self) -> Result<&Value, BodyParseError> {
        self.json
            .get_or_init(|| {
                serde_json::from_slice(&self.body).map_err(|e| BodyParseError(e.to_string()))
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl From<Response> for ResponseCapture {
    fn from(response: Response) -> Self {
        ResponseCapture::new(response.status, response.headers, response.body)
    }
}
