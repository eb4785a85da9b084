//! Argument schema validation for tool invocations

pub mod validation;

pub use validation::{parse_arguments, validate_arguments};
