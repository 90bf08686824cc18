use std::time::Duration;

use clap::{Parser, ValueEnum};
use http_expect::{
    harness::harness_config::HarnessConfig,
    scenarios::{github::GITHUB_BASE_URL, placeholder::PLACEHOLDER_BASE_URL},
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Suite {
    Placeholder,
    Github,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub(crate) struct CliArguments {
    #[arg(short, long, value_enum, default_value_t = Suite::Placeholder)]
    pub suite: Suite,

    /// Overrides the suite's default base URL
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Bearer token sent in the Authorization header
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Account whose repositories the github suite lists
    #[arg(short, long, env = "GITHUB_USER")]
    pub user: Option<String>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Print response headers and bodies
    #[arg(short, long)]
    pub print: bool,
}

impl CliArguments {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(match self.suite {
            Suite::Placeholder => PLACEHOLDER_BASE_URL,
            Suite::Github => GITHUB_BASE_URL,
        })
    }

    pub fn harness_config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::new(self.base_url()).with_print_responses(self.print);

        if let Some(token) = &self.token {
            config = config.with_bearer_token(token.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(timeout_ms));
        }

        config
    }
}
