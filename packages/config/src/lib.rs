// ABOUTME: Configuration constants for the todo service
// ABOUTME: Environment variable names and their defaults, shared by the server and tests

pub mod constants;

pub use constants::*;
