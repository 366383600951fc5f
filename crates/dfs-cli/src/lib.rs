//! # dfs-cli — Command-Line Interface for the Dragonfly Schema
//!
//! Provides the `dfs` command.
//!
//! ## Subcommands
//!
//! - `dfs validate` — decode and validate a Model, Room2D, Story, Building
//!   or ContextShade document, optionally also against the generated
//!   JSON schema.
//! - `dfs docs` — write the OpenAPI model document and class mapper.
//!
//! ```bash
//! dfs validate samples/model_complete_simple.dfjson --schema-check
//! dfs validate room.json --kind room2d
//! dfs docs --output-dir docs --mapper
//! dfs --config docs.yaml docs --inheritance
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` the document is invalid, `2` operational error
//! (missing or unreadable input, bad configuration, failed write).

pub mod config;
pub mod docs;
pub mod validate;

/// Exit code of a run that failed before reaching a verdict.
pub const EXIT_OPERATIONAL_ERROR: u8 = 2;
