use crate::{expectation::expectation::Expectation, harness::request_spec::RequestSpec};

/// A named request together with everything its response must satisfy.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub request: RequestSpec,
    pub expectations: Vec<Expectation>,
}

impl Scenario {
    pub fn new(name: &'static str, request: RequestSpec, expectations: Vec<Expectation>) -> Self {
        Self {
            name,
            request,
            expectations,
        }
    }
}
