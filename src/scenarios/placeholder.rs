//! Blog-post CRUD checks against the JSONPlaceholder fake REST API.

use serde_json::json;

use crate::{
    expectation::{expectation::Expectation, value_matcher::ValueMatcher},
    harness::request_spec::RequestSpec,
    scenarios::scenario::Scenario,
};

pub const PLACEHOLDER_BASE_URL: &str = "http://jsonplaceholder.typicode.com";

pub fn get_post_by_id() -> Scenario {
    Scenario::new(
        "get_post_by_id",
        RequestSpec::get("/posts/1"),
        vec![
            Expectation::status(200),
            Expectation::content_type("application/json"),
            Expectation::body("id", ValueMatcher::equal_to(1)),
            Expectation::body("title", ValueMatcher::NotNull),
            Expectation::body("body", ValueMatcher::NotNull),
            Expectation::body("userId", ValueMatcher::greater_than(0)),
            Expectation::body("title", ValueMatcher::matches_pattern("sunt aut facere.*")),
        ],
    )
}

pub fn create_post() -> Scenario {
    Scenario::new(
        "create_post",
        RequestSpec::post("/posts").with_json_body(json!({
            "title": "test title",
            "body": "test body",
            "userId": 1
        })),
        vec![
            Expectation::status(201),
            Expectation::body("title", ValueMatcher::equal_to("test title")),
            Expectation::body("body", ValueMatcher::equal_to("test body")),
            Expectation::body("userId", ValueMatcher::equal_to(1)),
            Expectation::body("id", ValueMatcher::greater_than(0)),
            Expectation::body(
                "$",
                ValueMatcher::equal_to(json!({
                    "title": "test title",
                    "body": "test body",
                    "userId": 1,
                    "id": 101
                })),
            ),
        ],
    )
}

pub fn update_post() -> Scenario {
    Scenario::new(
        "update_post",
        RequestSpec::put("/posts/1").with_json_body(json!({
            "id": 1,
            "title": "updated title",
            "body": "updated body",
            "userId": 1
        })),
        vec![
            Expectation::status(200),
            Expectation::body("title", ValueMatcher::equal_to("updated title")),
            Expectation::body("body", ValueMatcher::equal_to("updated body")),
            Expectation::body("id", ValueMatcher::equal_to(1)),
            Expectation::body("userId", ValueMatcher::equal_to(1)),
        ],
    )
}

pub fn patch_post() -> Scenario {
    Scenario::new(
        "patch_post",
        RequestSpec::patch("/posts/1").with_json_body(json!({ "title": "patched title" })),
        vec![
            Expectation::status(200),
            Expectation::body("title", ValueMatcher::equal_to("patched title")),
            Expectation::body("id", ValueMatcher::equal_to(1)),
            Expectation::body("userId", ValueMatcher::greater_than(0)),
        ],
    )
}

pub fn delete_post() -> Scenario {
    Scenario::new(
        "delete_post",
        RequestSpec::delete("/posts/1"),
        vec![Expectation::status(200)],
    )
}

pub fn head_post() -> Scenario {
    Scenario::new(
        "head_post",
        RequestSpec::head("/posts/1"),
        vec![
            Expectation::status(200),
            Expectation::header_contains("Content-Type", "application/json"),
        ],
    )
}

pub fn all() -> Vec<Scenario> {
    vec![
        get_post_by_id(),
        create_post(),
        update_post(),
        patch_post(),
        delete_post(),
        head_post(),
    ]
}
