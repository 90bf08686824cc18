pub mod assertion;
pub mod expectation;
pub mod value_matcher;
