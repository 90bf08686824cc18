pub mod harness;
pub mod harness_config;
pub mod harness_error;
pub mod request_spec;
pub mod response_capture;
pub mod response_printer;
