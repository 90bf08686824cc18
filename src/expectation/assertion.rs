use std::fmt::{self, Display};

use tracing::debug;

use crate::{expectation::expectation::Expectation, harness::response_capture::ResponseCapture};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationFailure {
    /// Position of the expectation in the list that was evaluated.
    pub index: usize,
    pub description: String,
    pub expected: String,
    pub actual: String,
}

impl Display for ExpectationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: expected {}, but was {}",
            self.index, self.description, self.expected, self.actual
        )
    }
}

/// Every unmet expectation of one response, in declaration order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct AssertionFailure {
    pub failures: Vec<ExpectationFailure>,
}

impl Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} expectation(s) failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {}", failure)?;
        }
        Ok(())
    }
}

/// Evaluates all `expectations` against `capture`. One failing expectation
/// never prevents the others from being checked.
pub fn assert_all(
    capture: &ResponseCapture,
    expectations: &[Expectation],
) -> Result<(), AssertionFailure> {
    let failures: Vec<ExpectationFailure> = expectations
        .iter()
        .enumerate()
        .filter_map(|(index, expectation)| {
            expectation.evaluate(capture).err().map(|mismatch| ExpectationFailure {
                index,
                description: expectation.to_string(),
                expected: mismatch.expected,
                actual: mismatch.actual,
            })
        })
        .collect();

    debug!(
        checked = expectations.len(),
        failed = failures.len(),
        "Evaluated expectations"
    );

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AssertionFailure { failures })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;

    use crate::{
        expectation::{
            assertion::assert_all, expectation::Expectation, value_matcher::ValueMatcher,
        },
        harness::response_capture::ResponseCapture,
        http_client::request::RequestHeaders,
    };

    fn created_post() -> ResponseCapture {
        ResponseCapture::new(
            201,
            RequestHeaders::from([(
                "content-type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )]),
            Bytes::from(
                json!({ "title": "test title", "body": "test body", "userId": 1, "id": 101 })
                    .to_string(),
            ),
        )
    }

    #[test]
    fn empty_expectation_list_always_succeeds() {
        let capture = ResponseCapture::new(500, RequestHeaders::default(), Bytes::from("boom"));

        assert_eq!(assert_all(&capture, &[]), Ok(()));
    }

    #[test]
    fn succeeds_when_every_expectation_holds() {
        let expectations = [
            Expectation::status(201),
            Expectation::content_type("application/json"),
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
        ];

        assert_eq!(assert_all(&created_post(), &expectations), Ok(()));
    }

    #[test]
    fn reports_one_failure_per_unmet_expectation_in_order() {
        let expectations = [
            Expectation::status(200),
            Expectation::body("title", ValueMatcher::equal_to("test title")),
            Expectation::body("id", ValueMatcher::equal_to(1)),
            Expectation::body("author", ValueMatcher::NotNull),
            Expectation::status(200),
        ];

        let failure = assert_all(&created_post(), &expectations).unwrap_err();
        let indexes: Vec<usize> = failure.failures.iter().map(|f| f.index).collect();

        assert_eq!(indexes, vec![0, 2, 3, 4]);
        assert_eq!(failure.failures[0].description, "status code 200");
        assert_eq!(failure.failures[0].actual, "201");
        assert_eq!(failure.failures[1].expected, "equal to 1");
        assert_eq!(failure.failures[1].actual, "101");
    }

    #[test]
    fn failure_message_lists_every_failure() {
        let expectations = [Expectation::status(200), Expectation::body("id", ValueMatcher::equal_to(1))];

        let message = assert_all(&created_post(), &expectations)
            .unwrap_err()
            .to_string();

        assert_eq!(
            message,
            "2 expectation(s) failed\n  \
             [0] status code 200: expected 200, but was 201\n  \
             [1] body 'id' equal to 1: expected equal to 1, but was 101"
        );
    }
}
