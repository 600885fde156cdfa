//! CLI command handlers

pub mod generate;
pub mod validate;

pub use generate::{GenerateArgs, handle_generate, load_configuration};
pub use validate::{ValidateArgs, ValidationSummary, handle_validate};
