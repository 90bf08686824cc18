pub mod github;
pub mod placeholder;
pub mod scenario;
pub mod suite_runner;
