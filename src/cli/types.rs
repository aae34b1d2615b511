//! CLI type definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::enrich::EnrichArgs;

#[derive(Parser, Debug)]
#[command(name = "lbenrich")]
#[command(about = "Enrich ranked leaderboard members with player profiles", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .lbenrich/config.yaml)
    #[arg(short, long, global = true, env = "LBENRICH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enrich a JSON array of members through the cache and profile store
    Enrich(EnrichArgs),

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enrich() {
        let cli = Cli::try_parse_from([
            "lbenrich",
            "--json",
            "enrich",
            "--tenant",
            "t1",
            "--leaderboard",
            "lb1",
            "--input",
            "members.json",
            "--timeout-ms",
            "250",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Enrich(args) = cli.command else {
            panic!("expected enrich command");
        };
        assert_eq!(args.tenant, "t1");
        assert_eq!(args.leaderboard, "lb1");
        assert_eq!(args.input, PathBuf::from("members.json"));
        assert_eq!(args.timeout_ms, Some(250));
    }

    #[test]
    fn test_parse_config_with_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["lbenrich", "config", "--config", "custom.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_enrich_requires_tenant() {
        let result = Cli::try_parse_from(["lbenrich", "enrich", "--leaderboard", "lb1", "--input", "m.json"]);
        assert!(result.is_err());
    }
}
