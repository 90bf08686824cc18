mod cli_arguments;

use std::process::ExitCode;

use clap::Parser;
use http_expect::{
    harness::harness::Harness,
    scenarios::{github, placeholder, suite_runner::run_suite},
};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli_arguments::{CliArguments, Suite};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: CliArguments = CliArguments::parse();

    let scenarios = match args.suite {
        Suite::Placeholder => placeholder::all(),
        Suite::Github => {
            let Some(user) = args.user.as_deref() else {
                error!("The github suite needs a user: pass --user or set GITHUB_USER");
                return ExitCode::FAILURE;
            };
            if args.token.is_none() {
                warn!("No token configured, requests are sent unauthenticated");
            }
            github::all(user)
        }
    };

    let harness = match Harness::from_config(args.harness_config()) {
        Ok(harness) => harness,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(suite = ?args.suite, base_url = %harness.config().base_url, "Running suite");

    let report = run_suite(&harness, scenarios).await;

    info!(
        passed = report.passed.len(),
        failed = report.failed.len(),
        "Suite finished"
    );

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
