//! Repository listing checks against the GitHub REST API.

use crate::{
    expectation::{expectation::Expectation, value_matcher::ValueMatcher},
    harness::request_spec::RequestSpec,
    scenarios::scenario::Scenario,
};

pub const GITHUB_BASE_URL: &str = "https://api.github.com";

/// Lists `user`'s repositories. The bearer token comes from the harness
/// configuration, never from the scenario.
pub fn repositories_for_user(user: &str) -> Scenario {
    Scenario::new(
        "repositories_for_user",
        RequestSpec::get(format!("/users/{}/repos", user))
            .with_header("Accept", "application/vnd.github+json"),
        vec![
            Expectation::status(200),
            Expectation::content_type("application/json"),
            Expectation::body("$", ValueMatcher::NotEmpty),
            Expectation::body("[0].name", ValueMatcher::NotNull),
            Expectation::body("[0].id", ValueMatcher::greater_than(0)),
            Expectation::body("[0].owner.login", ValueMatcher::equal_to(user)),
        ],
    )
}

pub fn all(user: &str) -> Vec<Scenario> {
    vec![repositories_for_user(user)]
}
