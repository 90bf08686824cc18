use crate::{expectation::assertion::AssertionFailure, http_client::error::TransportError};

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
}
