use tracing::{error, info};

use crate::{
    harness::{harness::Harness, harness_error::HarnessError},
    scenarios::scenario::Scenario,
};

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub passed: Vec<&'static str>,
    pub failed: Vec<(&'static str, HarnessError)>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }
}

/// Runs each scenario once, in order. A failing scenario, whether from
/// transport or assertions, does not stop the ones after it.
pub async fn run_suite(harness: &Harness, scenarios: Vec<Scenario>) -> SuiteReport {
    let mut report = SuiteReport::default();

    for scenario in scenarios {
        match harness.verify(&scenario.request, &scenario.expectations).await {
            Ok(capture) => {
                info!(scenario = scenario.name, status = capture.status(), "Scenario passed");
                report.passed.push(scenario.name);
            }
            Err(e) => {
                error!(scenario = scenario.name, "Scenario failed: {}", e);
                report.failed.push((scenario.name, e));
            }
        }
    }

    report
}
