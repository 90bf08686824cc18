//! Declarative HTTP assertion harness.
//!
//! A [`RequestSpec`](harness::request_spec::RequestSpec) is sent once through a
//! [`Harness`](harness::harness::Harness), producing a
//! [`ResponseCapture`](harness::response_capture::ResponseCapture) that is
//! checked against a list of [`Expectation`](expectation::expectation::Expectation)s.
//! Every unmet expectation is reported, not only the first.

pub mod expectation;
pub mod harness;
pub mod http_client;
pub mod json_path;
pub mod scenarios;
