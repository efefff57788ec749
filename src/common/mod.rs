// Common utilities and abstractions module
pub mod constants;
