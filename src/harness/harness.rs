use std::{io::Write, sync::Arc};

use bytes::Bytes;
use tracing::warn;

use crate::{
    expectation::{assertion::assert_all, expectation::Expectation},
    harness::{
        harness_config::HarnessConfig,
        harness_error::HarnessError,
        request_spec::RequestSpec,
        response_capture::ResponseCapture,
        response_printer::print_response,
    },
    http_client::{
        error::TransportError, http_client::HttpClient, request::Request,
        reqwest_http_client::ReqwestHttpClient,
    },
};

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Sends one request per call and checks the response. Holds nothing but
/// immutable configuration and a client, so it can be shared between tests.
#[derive(Clone)]
pub struct Harness {
    config: HarnessConfig,
    client: Arc<dyn HttpClient>,
}

impl Harness {
    pub fn new(config: HarnessConfig, client: Arc<dyn HttpClient>) -> Self {
        Self { config, client }
    }

    /// Builds a harness backed by reqwest, honoring the configured timeout.
    pub fn from_config(config: HarnessConfig) -> Result<Self, TransportError> {
        let client = ReqwestHttpClient::with_timeout(config.timeout)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub async fn execute(&self, spec: &RequestSpec) -> Result<ResponseCapture, TransportError> {
        let request = self.build_request(spec)?;
        let response = self.client.execute(request).await?;
        Ok(response.into())
    }

    /// Executes `spec` and evaluates every expectation against the response.
    /// The capture is handed back on success for any further inspection.
    pub async fn verify(
        &self,
        spec: &RequestSpec,
        expectations: &[Expectation],
    ) -> Result<ResponseCapture, HarnessError> {
        self.verify_with_output(spec, expectations, &mut std::io::stdout())
            .await
    }

    /// Like [`Harness::verify`], printing to `out` when `print_responses` is
    /// set. A failed write is logged and never changes the result.
    pub async fn verify_with_output<W: Write>(
        &self,
        spec: &RequestSpec,
        expectations: &[Expectation],
        out: &mut W,
    ) -> Result<ResponseCapture, HarnessError> {
        let capture = self.execute(spec).await?;

        if self.config.print_responses {
            if let Err(e) = print_response(&capture, out) {
                warn!(error = %e, "Failed to print response");
            }
        }

        if let Err(failure) = assert_all(&capture, expectations) {
            warn!(
                method = %spec.method(),
                path = spec.path(),
                failed = failure.failures.len(),
                "Expectations not met"
            );
            return Err(failure.into());
        }

        Ok(capture)
    }

    fn build_request(&self, spec: &RequestSpec) -> Result<Request, TransportError> {
        let mut headers = spec.headers().clone();

        if let Some(token) = &self.config.bearer_token {
            if !headers.contains_name(AUTHORIZATION) {
                headers.set(AUTHORIZATION, format!("Bearer {}", token));
            }
        }

        let body = match spec.body() {
            Some(json) => {
                if !headers.contains_name(CONTENT_TYPE) {
                    headers.set(CONTENT_TYPE, APPLICATION_JSON);
                }
                let bytes = serde_json::to_vec(json)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                Bytes::from(bytes)
            }
            None => Bytes::new(),
        };

        Ok(Request {
            method: spec.method(),
            url: self.config.url_for(spec.path()),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{self, Write},
        sync::Arc,
    };

    use bytes::Bytes;
    use serde_json::json;

    use crate::{
        expectation::{expectation::Expectation, value_matcher::ValueMatcher},
        harness::{
            harness::Harness, harness_config::HarnessConfig, harness_error::HarnessError,
            request_spec::RequestSpec,
        },
        http_client::{
            error::TransportError,
            http_client::MockHttpClient,
            request::{RequestHeaders, RequestMethod},
            response::Response,
        },
    };

    fn json_response(status: u16, body: serde_json::Value) -> Response {
        Response {
            status,
            headers: RequestHeaders::from([(
                "content-type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )]),
            body: Bytes::from(body.to_string()),
        }
    }

    #[tokio::test]
    async fn joins_the_path_onto_the_base_url() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                request.url == "http://jsonplaceholder.typicode.com/posts/1"
                    && request.method == RequestMethod::Get
                    && request.body.is_empty()
                    && !request.headers.contains_name("authorization")
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "id": 1 }))));

        let harness = Harness::new(
            HarnessConfig::new("http://jsonplaceholder.typicode.com/"),
            Arc::new(mock),
        );

        let capture = harness.execute(&RequestSpec::get("/posts/1")).await.unwrap();

        assert_eq!(capture.status(), 200);
        assert_eq!(capture.json().unwrap(), &json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn attaches_the_configured_bearer_token() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                request.headers.find("authorization") == Some(&"Bearer ghp_secret".to_string())
            })
            .returning(|_| Ok(json_response(200, json!([]))));

        let harness = Harness::new(
            HarnessConfig::new("https://api.github.com").with_bearer_token("ghp_secret"),
            Arc::new(mock),
        );

        assert!(harness.execute(&RequestSpec::get("/users/octocat/repos")).await.is_ok());
    }

    #[tokio::test]
    async fn explicit_authorization_header_wins_over_the_token() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                request.headers.len() == 1
                    && request.headers.find("authorization") == Some(&"token other".to_string())
            })
            .returning(|_| Ok(json_response(200, json!([]))));

        let harness = Harness::new(
            HarnessConfig::new("https://api.github.com").with_bearer_token("ghp_secret"),
            Arc::new(mock),
        );
        let spec = RequestSpec::get("/user").with_header("authorization", "token other");

        assert!(harness.execute(&spec).await.is_ok());
    }

    #[tokio::test]
    async fn serializes_json_bodies_with_a_json_content_type() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                request.method == RequestMethod::Post
                    && request.headers.find("content-type") == Some(&"application/json".to_string())
                    && body == json!({ "title": "test title", "body": "test body", "userId": 1 })
            })
            .returning(|_| Ok(json_response(201, json!({ "id": 101 }))));

        let harness = Harness::new(
            HarnessConfig::new("http://jsonplaceholder.typicode.com"),
            Arc::new(mock),
        );
        let spec = RequestSpec::post("/posts")
            .with_json_body(json!({ "title": "test title", "body": "test body", "userId": 1 }));

        let capture = harness.execute(&spec).await.unwrap();

        assert_eq!(capture.status(), 201);
    }

    #[tokio::test]
    async fn transport_errors_surface_immediately() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Err(TransportError::Network("connection refused".to_string())));

        let harness = Harness::new(HarnessConfig::new("http://127.0.0.1:1"), Arc::new(mock));

        let result = harness
            .verify(&RequestSpec::get("/posts/1"), &[Expectation::status(200)])
            .await;

        assert!(matches!(
            result,
            Err(HarnessError::Transport(TransportError::Network(_)))
        ));
    }

    #[tokio::test]
    async fn verify_collects_all_failed_expectations() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(json_response(404, json!({}))));

        let harness = Harness::new(
            HarnessConfig::new("http://jsonplaceholder.typicode.com"),
            Arc::new(mock),
        );

        let result = harness
            .verify(
                &RequestSpec::get("/posts/1"),
                &[
                    Expectation::status(200),
                    Expectation::content_type("application/json"),
                    Expectation::body("id", ValueMatcher::equal_to(1)),
                ],
            )
            .await;

        match result {
            Err(HarnessError::Assertion(failure)) => {
                let indexes: Vec<usize> = failure.failures.iter().map(|f| f.index).collect();
                assert_eq!(indexes, vec![0, 2]);
            }
            other => panic!("expected an assertion failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn printing_does_not_change_the_outcome() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(json_response(200, json!({ "id": 1 }))));

        let harness = Harness::new(
            HarnessConfig::new("http://jsonplaceholder.typicode.com").with_print_responses(true),
            Arc::new(mock),
        );

        let capture = harness
            .verify(&RequestSpec::get("/posts/1"), &[Expectation::status(200)])
            .await
            .unwrap();

        assert_eq!(capture.status(), 200);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[tokio::test]
    async fn failing_output_does_not_change_the_outcome() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(json_response(200, json!({ "id": 1 }))));

        let harness = Harness::new(
            HarnessConfig::new("http://jsonplaceholder.typicode.com").with_print_responses(true),
            Arc::new(mock),
        );
        let spec = RequestSpec::get("/posts/1");

        let passed = harness
            .verify_with_output(&spec, &[Expectation::status(200)], &mut BrokenPipe)
            .await;
        let failed = harness
            .verify_with_output(&spec, &[Expectation::status(404)], &mut BrokenPipe)
            .await;

        assert_eq!(passed.unwrap().status(), 200);
        assert!(matches!(failed, Err(HarnessError::Assertion(_))));
    }

    #[tokio::test]
    async fn prints_to_the_given_output_only_when_enabled() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(json_response(200, json!({ "id": 1 }))));
        let client: Arc<MockHttpClient> = Arc::new(mock);

        let silent = Harness::new(
            HarnessConfig::new("http://jsonplaceholder.typicode.com"),
            client.clone(),
        );
        let printing = Harness::new(
            HarnessConfig::new("http://jsonplaceholder.typicode.com").with_print_responses(true),
            client,
        );
        let spec = RequestSpec::get("/posts/1");
        let mut silent_out = Vec::new();
        let mut printed_out = Vec::new();

        silent
            .verify_with_output(&spec, &[], &mut silent_out)
            .await
            .unwrap();
        printing
            .verify_with_output(&spec, &[], &mut printed_out)
            .await
            .unwrap();

        assert!(silent_out.is_empty());
        assert!(
            String::from_utf8(printed_out)
                .unwrap()
                .starts_with("Response Headers:\ncontent-type: application/json; charset=utf-8\n")
        );
    }
}
