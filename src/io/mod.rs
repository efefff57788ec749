// External I/O operations module
pub mod signals; // Unix signal handling
