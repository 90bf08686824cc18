use std::{fmt, time::Duration};

/// Fixed settings shared by every request a [`Harness`](crate::harness::harness::Harness) makes.
#[derive(Clone, Default)]
pub struct HarnessConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub timeout: Option<Duration>,
    pub print_responses: bool,
}

impl HarnessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_print_responses(mut self, print_responses: bool) -> Self {
        self.print_responses = print_responses;
        self
    }

    /// Joins the base URL and `path` with exactly one `/` between them.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');

        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}

impl fmt::Debug for HarnessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarnessConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("print_responses", &self.print_responses)
            .finish()
    }
}
