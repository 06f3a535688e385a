// Core types and response validation for ExpenseLM

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{validate_json, Validate, ValidationError};
