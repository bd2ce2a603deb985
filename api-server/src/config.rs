//! Server configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_ARTIFACT_DIR: &str = "static/generated_files";
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifact_dir: PathBuf,
    /// Base URL for links handed back to callers; the request's Host
    /// header is used when unset
    pub public_url: Option<String>,
    pub agent_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            public_url: None,
            agent_timeout: Some(Duration::from_secs(DEFAULT_AGENT_TIMEOUT_SECS)),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("FILEGEN_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or("FILEGEN_PORT", lookup("FILEGEN_PORT"), defaults.port);
        let artifact_dir = lookup("FILEGEN_ARTIFACT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.artifact_dir);
        let public_url = lookup("FILEGEN_PUBLIC_URL").filter(|v| !v.trim().is_empty());
        let timeout_secs = parse_or(
            "FILEGEN_AGENT_TIMEOUT_SECS",
            lookup("FILEGEN_AGENT_TIMEOUT_SECS"),
            DEFAULT_AGENT_TIMEOUT_SECS,
        );

        Self {
            host,
            port,
            artifact_dir,
            public_url,
            agent_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Base URL of this server as seen by a caller, always ending in `/`
    pub fn host_url(&self, request_host: Option<&str>) -> String {
        let base = match (&self.public_url, request_host) {
            (Some(url), _) => url.clone(),
            (None, Some(host)) => format!("http://{}", host),
            (None, None) => format!("http://{}:{}", self.host, self.port),
        };
        format!("{}/", base.trim_end_matches('/'))
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", name, raw);
            default
        }),
        None => default,
    }
}
