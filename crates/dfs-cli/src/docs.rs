//! # Docs Subcommand
//!
//! Generates the OpenAPI document of the Dragonfly `Model` and writes it,
//! optionally with the class mapper, to an output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dfs_schema::{
    emit, generate_document, package_version, validate_version, ClassMapper, DocumentMetadata,
    EmitRequest, GeneratorOptions, MODEL_ROOT,
};

use crate::config::DocsConfig;

/// Output directory used when neither the flag nor the config sets one.
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Arguments for the `dfs docs` subcommand.
#[derive(Args, Debug, Default)]
pub struct DocsArgs {
    /// Directory the documents are written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Document title.
    #[arg(long)]
    pub title: Option<String>,

    /// Document description.
    #[arg(long)]
    pub description: Option<String>,

    /// Document version (MAJOR.MINOR.PATCH). Defaults to the package version.
    #[arg(long)]
    pub version: Option<String>,

    /// Reference base schemas with `allOf` instead of merging their fields.
    #[arg(long, conflicts_with = "no_inheritance")]
    pub inheritance: bool,

    /// Merge base fields into each schema, even if the config asks for
    /// the inheritance layout.
    #[arg(long)]
    pub no_inheritance: bool,

    /// Add `discriminator` objects to the inheritance layout, even if the
    /// config turns them off.
    #[arg(long, conflicts_with = "no_discriminator")]
    pub discriminator: bool,

    /// Leave `discriminator` objects out of the inheritance layout.
    #[arg(long)]
    pub no_discriminator: bool,

    /// Also write the class mapper.
    #[arg(long)]
    pub mapper: bool,
}

/// Fully resolved settings of one `dfs docs` run.
#[derive(Debug, Clone, PartialEq)]
pub struct DocsPlan {
    /// Where the documents go.
    pub output_dir: PathBuf,
    /// Title, description and version.
    pub metadata: DocumentMetadata,
    /// Layout and info-block settings.
    pub options: GeneratorOptions,
    /// Write the class mapper too.
    pub mapper: bool,
}

impl DocsPlan {
    /// Merge flags over config over defaults.
    pub fn resolve(args: &DocsArgs, config: &DocsConfig) -> Result<Self> {
        let version = match args.version.as_ref().or(config.version.as_ref()) {
            Some(v) => validate_version(v)?,
            None => package_version(),
        };
        let mut metadata = DocumentMetadata::dragonfly_model(version);
        if let Some(title) = args.title.as_ref().or(config.title.as_ref()) {
            metadata.title = title.clone();
        }
        if let Some(description) = args.description.as_ref().or(config.description.as_ref()) {
            metadata.description = description.clone();
        }

        let options = GeneratorOptions {
            inheritance: switch(args.inheritance, args.no_inheritance, config.inheritance, false),
            add_discriminator: switch(
                args.discriminator,
                args.no_discriminator,
                config.add_discriminator,
                true,
            ),
            external_docs: Some(config.external_docs()),
            info: Some(config.info_extras()),
            ..GeneratorOptions::default()
        };

        Ok(Self {
            output_dir: args
                .output_dir
                .clone()
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            metadata,
            options,
            mapper: args.mapper || config.mapper.unwrap_or(false),
        })
    }
}

/// Resolve an on/off setting: an explicit flag, then the config, then the
/// default.
fn switch(on: bool, off: bool, config: Option<bool>, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        config.unwrap_or(default)
    }
}

/// Execute the docs subcommand. Returns exit code 0; any failure is
/// returned as an error before a file is written.
pub fn run_docs(args: &DocsArgs, config: &DocsConfig) -> Result<u8> {
    let plan = DocsPlan::resolve(args, config)?;
    let registry = dfs_model::registry().context("failed to build type registry")?;
    let document = generate_document(&registry, &[MODEL_ROOT], &plan.metadata, &plan.options)
        .context("failed to generate model document")?;
    tracing::info!(
        schemas = document.components.schemas.len(),
        version = %document.info.version,
        "generated model document"
    );

    let mapper = plan
        .mapper
        .then(|| ClassMapper::from_document(&registry, &document));
    let mut request = EmitRequest::new(&document, plan.options.inheritance);
    if let Some(mapper) = &mapper {
        request = request.with_mapper(mapper);
    }

    let written = emit(&plan.output_dir, &request)
        .with_context(|| format!("failed to write documents to {}", plan.output_dir.display()))?;
    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfs_schema::{SchemaError, FLATTENED_FILE, INHERITANCE_FILE, MAPPER_FILE};

    #[test]
    fn flags_win_over_config() {
        let config = DocsConfig {
            title: Some("From config".to_string()),
            version: Some("3.0.0".to_string()),
            inheritance: Some(true),
            ..DocsConfig::default()
        };
        let args = DocsArgs {
            title: Some("From flag".to_string()),
            no_discriminator: true,
            ..DocsArgs::default()
        };
        let plan = DocsPlan::resolve(&args, &config).unwrap();
        assert_eq!(plan.metadata.title, "From flag");
        assert_eq!(plan.metadata.version, "3.0.0");
        assert_eq!(
            plan.metadata.description,
            "This is the documentation for Dragonfly model schema."
        );
        assert!(plan.options.inheritance);
        assert!(!plan.options.add_discriminator);
        assert_eq!(plan.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn flags_turn_config_switches_off_and_on() {
        let config = DocsConfig {
            inheritance: Some(true),
            add_discriminator: Some(false),
            ..DocsConfig::default()
        };
        let plan = DocsPlan::resolve(&DocsArgs::default(), &config).unwrap();
        assert!(plan.options.inheritance);
        assert!(!plan.options.add_discriminator);

        let args = DocsArgs {
            no_inheritance: true,
            discriminator: true,
            ..DocsArgs::default()
        };
        let plan = DocsPlan::resolve(&args, &config).unwrap();
        assert!(!plan.options.inheritance);
        assert!(plan.options.add_discriminator);
    }

    #[test]
    fn defaults_use_package_version() {
        let plan = DocsPlan::resolve(&DocsArgs::default(), &DocsConfig::default()).unwrap();
        assert_eq!(plan.metadata.version, package_version());
        assert_eq!(plan.metadata.title, "Dragonfly Model Schema");
        assert!(!plan.mapper);
    }

    #[test]
    fn bad_version_is_rejected() {
        let args = DocsArgs {
            version: Some("1.2".to_string()),
            ..DocsArgs::default()
        };
        let err = DocsPlan::resolve(&args, &DocsConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn writes_flattened_document() {
        let dir = tempfile::tempdir().unwrap();
        let args = DocsArgs {
            output_dir: Some(dir.path().to_path_buf()),
            version: Some("1.8.0".to_string()),
            ..DocsArgs::default()
        };
        assert_eq!(run_docs(&args, &DocsConfig::default()).unwrap(), 0);
        let text = std::fs::read_to_string(dir.path().join(FLATTENED_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["info"]["version"], "1.8.0");
        assert_eq!(
            value["components"]["schemas"]["Model"]["properties"]["version"]["default"],
            "1.8.0"
        );
        assert!(!dir.path().join(MAPPER_FILE).exists());
    }

    #[test]
    fn writes_inheritance_document_and_mapper() {
        let dir = tempfile::tempdir().unwrap();
        let args = DocsArgs {
            output_dir: Some(dir.path().join("out")),
            inheritance: true,
            mapper: true,
            ..DocsArgs::default()
        };
        assert_eq!(run_docs(&args, &DocsConfig::default()).unwrap(), 0);
        assert!(dir.path().join("out").join(INHERITANCE_FILE).is_file());
        assert!(dir.path().join("out").join(MAPPER_FILE).is_file());
    }
}
