//! Default configuration values

pub struct HttpDefaults;

impl HttpDefaults {
    pub const HOST: &'static str = "0.0.0.0";
    pub const PORT: u16 = 3000;
    pub const MAX_REQUEST_SIZE: usize = 16 * 1024 * 1024;
    /// Milliseconds; 0 disables the per-handler timeout
    pub const HANDLER_TIMEOUT_MS: u64 = 0;
    pub const STRIP_QUERY_STRING: bool = false;
    pub const NORMALIZE_TRAILING_SLASH: bool = false;
    pub const ENABLE_TRACING: bool = true;
}
