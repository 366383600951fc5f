//! # dfs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dfs_cli::config::DocsConfig;
use dfs_cli::docs::{run_docs, DocsArgs};
use dfs_cli::validate::{run_validate, ValidateArgs};
use dfs_cli::EXIT_OPERATIONAL_ERROR;

/// Dragonfly schema toolchain.
///
/// Validates Dragonfly building documents and publishes the OpenAPI
/// document describing them.
#[derive(Parser, Debug)]
#[command(name = "dfs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against the Dragonfly records.
    Validate(ValidateArgs),

    /// Generate the OpenAPI model document.
    Docs(DocsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dfs CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Docs(args) => DocsConfig::load_optional(cli.config.as_deref())
            .context("failed to load configuration")
            .and_then(|config| run_docs(&args, &config)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfs_cli::validate::RecordKind;

    #[test]
    fn cli_parse_validate_with_kind() {
        let cli = Cli::try_parse_from([
            "dfs",
            "validate",
            "room.json",
            "--kind",
            "room2d",
            "--schema-check",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.path, PathBuf::from("room.json"));
                assert_eq!(args.kind, RecordKind::Room2D);
                assert!(args.schema_check);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_validate_defaults_to_auto() {
        let cli = Cli::try_parse_from(["dfs", "validate", "model.dfjson"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.kind, RecordKind::Auto);
            assert!(!args.schema_check);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_context_shade_kind() {
        let cli =
            Cli::try_parse_from(["dfs", "validate", "s.json", "--kind", "context-shade"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate(ValidateArgs { kind: RecordKind::ContextShade, .. })
        ));
    }

    #[test]
    fn cli_parse_docs_flags() {
        let cli = Cli::try_parse_from([
            "dfs",
            "-vv",
            "docs",
            "--output-dir",
            "out",
            "--version",
            "1.2.3",
            "--inheritance",
            "--no-discriminator",
            "--mapper",
            "--config",
            "docs.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("docs.yaml")));
        match cli.command {
            Commands::Docs(args) => {
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
                assert_eq!(args.version.as_deref(), Some("1.2.3"));
                assert!(args.inheritance && args.no_discriminator && args.mapper);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_opposing_layout_flags_conflict() {
        assert!(Cli::try_parse_from(["dfs", "docs", "--inheritance", "--no-inheritance"]).is_err());
        assert!(
            Cli::try_parse_from(["dfs", "docs", "--discriminator", "--no-discriminator"]).is_err()
        );
        let cli = Cli::try_parse_from(["dfs", "docs", "--no-inheritance"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Docs(DocsArgs { no_inheritance: true, inheritance: false, .. })
        ));
    }

    #[test]
    fn cli_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["dfs", "validate", "x.json", "--kind", "roof"]).is_err());
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["dfs"]).is_err());
    }
}
