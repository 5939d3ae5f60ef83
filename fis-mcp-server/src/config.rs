//! Command-line arguments and the resolved server configuration.

use clap::Parser;
use fis_mcp_core::WriteAccess;
use fis_mcp_tools::aws::AwsSettings;

use crate::error::{ServerError, ServerResult};

pub const APP_NAME: &str = "fis-mcp-server";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable consulted for the log level before `RUST_LOG`
pub const LOG_LEVEL_ENV: &str = "FIS_MCP_LOG_LEVEL";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fis-mcp-server")]
#[command(about = "MCP server for AWS Fault Injection Simulator experiments", version)]
pub struct Cli {
    /// AWS profile to use for credentials
    #[arg(long, value_name = "PROFILE")]
    pub aws_profile: Option<String>,

    /// AWS region (default: AWS_REGION, then us-east-1)
    #[arg(long, value_name = "REGION")]
    pub aws_region: Option<String>,

    /// Allow operations that start experiments or create and update resources
    #[arg(long)]
    pub allow_writes: bool,

    /// Log filter directive, e.g. `info` or `fis_mcp_tools=debug`
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// List available tools and exit
    #[arg(long)]
    pub list_tools: bool,
}

/// Settings resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub region: String,
    pub profile: Option<String>,
    pub write_access: WriteAccess,
    pub log_level: String,
    pub list_tools: bool,
}

impl ServerConfig {
    /// Resolve from parsed arguments and the process environment
    pub fn from_env(cli: Cli) -> ServerResult<Self> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Resolve from parsed arguments, reading the environment through `env`.
    ///
    /// Command-line values win over environment values. Empty values count
    /// as unset.
    pub fn resolve<F>(cli: Cli, env: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let region = non_empty(cli.aws_region)
            .or_else(|| non_empty(env("AWS_REGION")))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        if region.chars().any(char::is_whitespace) {
            return Err(ServerError::Config(format!(
                "invalid AWS region '{}'",
                region
            )));
        }

        let log_level = non_empty(cli.log_level)
            .or_else(|| non_empty(env(LOG_LEVEL_ENV)))
            .or_else(|| non_empty(env("RUST_LOG")))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            region,
            profile: non_empty(cli.aws_profile),
            write_access: WriteAccess::from_flag(cli.allow_writes),
            log_level,
            list_tools: cli.list_tools,
        })
    }

    pub fn aws_settings(&self) -> AwsSettings {
        AwsSettings {
            region: self.region.clone(),
            profile: self.profile.clone(),
            app_name: APP_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fis-mcp-server").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::resolve(parse(&[]), env_of(&[])).unwrap();

        assert_eq!(
            config,
            ServerConfig {
                region: "us-east-1".into(),
                profile: None,
                write_access: WriteAccess::Disabled,
                log_level: "warn".into(),
                list_tools: false,
            }
        );
    }

    #[test]
    fn test_region_precedence() {
        let env = env_of(&[("AWS_REGION", "eu-west-1")]);

        let from_env = ServerConfig::resolve(parse(&[]), &env).unwrap();
        assert_eq!(from_env.region, "eu-west-1");

        let from_cli = ServerConfig::resolve(parse(&["--aws-region", "ap-south-1"]), &env).unwrap();
        assert_eq!(from_cli.region, "ap-south-1");
    }

    #[test]
    fn test_empty_region_falls_back() {
        let config =
            ServerConfig::resolve(parse(&[]), env_of(&[("AWS_REGION", "")])).unwrap();
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_invalid_region() {
        let err = ServerConfig::resolve(parse(&["--aws-region", "us east 1"]), env_of(&[]))
            .unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_log_level_precedence() {
        let env = env_of(&[("FIS_MCP_LOG_LEVEL", "info"), ("RUST_LOG", "trace")]);
        assert_eq!(
            ServerConfig::resolve(parse(&[]), &env).unwrap().log_level,
            "info"
        );
        assert_eq!(
            ServerConfig::resolve(parse(&["--log-level", "debug"]), &env)
                .unwrap()
                .log_level,
            "debug"
        );
        assert_eq!(
            ServerConfig::resolve(parse(&[]), env_of(&[("RUST_LOG", "trace")]))
                .unwrap()
                .log_level,
            "trace"
        );
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::resolve(
            parse(&["--allow-writes", "--aws-profile", "chaos", "--list-tools"]),
            env_of(&[]),
        )
        .unwrap();

        assert_eq!(config.write_access, WriteAccess::Enabled);
        assert_eq!(config.profile.as_deref(), Some("chaos"));
        assert!(config.list_tools);

        let settings = config.aws_settings();
        assert_eq!(settings.app_name, "fis-mcp-server");
        assert_eq!(settings.profile.as_deref(), Some("chaos"));
    }
}
