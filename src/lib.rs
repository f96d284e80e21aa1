/// Spreadsheet and pasted-text readers that produce products.
pub mod ingest;
/// Product model and the HTTP client for the objects resource.
pub mod objects;
/// End-to-end create/read/update/patch/delete scenario.
pub mod scenario;

/// Default collection endpoint of the public objects API.
pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev/objects";

/// Logging verbosity for client operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit verbose debug output.
    Debug,
    /// Emit standard informational output.
    Information,
}

impl Default for LogLevel {
    /// Defaults to `Information` logging.
    fn default() -> Self {
        LogLevel::Information
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Information => log::LevelFilter::Info,
        }
    }
}
