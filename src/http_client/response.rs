use bytes::Bytes;

use crate::http_client::request::RequestHeaders;

/// Wire-level response as returned by an [`HttpClient`](crate::http_client::http_client::HttpClient).
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: RequestHeaders,
    pub body: Bytes,
}
