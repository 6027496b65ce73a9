// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names and defaults

// Server Configuration
pub const PORT: &str = "PORT";
pub const HOST: &str = "HOST";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

// CORS Configuration
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Database Configuration
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const QUERY_TIMEOUT_SECS: &str = "QUERY_TIMEOUT_SECS";

// Logging (read by tracing-subscriber's EnvFilter)
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:todos.db";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
