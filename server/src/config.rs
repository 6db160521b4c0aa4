//! Command-line and environment configuration for the relay server.

use std::net::SocketAddr;

use clap::Parser;
use llmable_core::client::GITHUB_API_BASE;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "llmable-server",
    version,
    about = "Relay a GitHub issue and its comments as a compact JSON document"
)]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_BASE", default_value = GITHUB_API_BASE)]
    pub github_api_base: String,

    /// Bearer token sent with upstream requests.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_are_used() {
        let config = Config::try_parse_from([
            "llmable-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--github-api-base",
            "http://localhost:4000",
            "--github-token",
            "t0ken",
            "-vv",
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.github_api_base, "http://localhost:4000");
        assert_eq!(config.github_token.as_deref(), Some("t0ken"));
        assert_eq!(config.verbose, 2);
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(Config::try_parse_from(["llmable-server", "--port", "http"]).is_err());
    }

    #[test]
    fn bad_host_fails_bind_addr() {
        let config =
            Config::try_parse_from(["llmable-server", "--host", "not a host", "--port", "1"])
                .unwrap();
        assert!(config.bind_addr().is_err());
    }
}
