use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "WEBSERV_CONFIG";

/// Server settings. The listening port always comes from the command line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Interface the listener binds to
    pub host: String,
    /// Directory the fallback handler serves files from
    pub static_root: PathBuf,
    /// How many exact-path routes the router accepts
    pub max_routes: usize,
    /// How long each readiness poll waits for a client, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            static_root: PathBuf::from("game"),
            max_routes: 2,
            poll_interval_ms: 10,
        }
    }
}

impl Config {
    /// Loads the file named by `WEBSERV_CONFIG`, or the defaults.
    ///
    /// An unreadable or invalid file is logged and ignored.
    pub fn load() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(%path, error = %err, "failed to read config, using defaults");
                return Self::default();
            }
        };

        match Self::from_yaml(&content) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(%path, error = %err, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn listen_addr(&self, port: u16) -> String {
        format!("{}:{}", self.host, port)
    }
}

/// Parses the single `<port>` argument of the server binary.
///
/// # Returns
///
/// The port, or a usage message when the argument count is wrong or the
/// value is not a valid port number.
pub fn parse_port_arg<I>(args: I) -> Result<u16, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "webserv".to_string());
    let usage = format!("USAGE:  {program} <server port>");

    match (args.next(), args.next()) {
        (Some(port), None) => port.parse().map_err(|_| usage),
        _ => Err(usage),
    }
}
