use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ApugError;
use crate::ApugResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["apug.toml", ".apug.toml", ".config/apug.toml"];

/// Default value of the `lang` attribute that marks the template region.
pub const DEFAULT_TEMPLATE_LANG: &str = "pug";

/// Default element used for attribute lists written without a tag name.
pub const DEFAULT_FRAGMENT_TAG: &str = "svelte:fragment";

/// Block kinds whose closing statement is dropped by default.
pub const DEFAULT_CLOSING_BLOCKS: [&str; 4] = ["if", "await", "key", "each"];

/// Configuration loaded from an `apug.toml` file.
///
/// ```toml
/// template_lang = "pug"
/// fragment_tag = "svelte:fragment"
/// closing_blocks = ["if", "await", "key", "each"]
///
/// [exports]
/// prefix = "__export_"
/// suffix = "__"
/// ```
///
/// Every field is optional and falls back to the defaults shown above.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApugConfig {
	/// The `lang` attribute value of the `<template>` region that is
	/// expanded.
	#[serde(default = "default_template_lang")]
	pub template_lang: String,
	/// The element inserted in front of an attribute list that starts a line
	/// without a tag name.
	#[serde(default = "default_fragment_tag")]
	pub fragment_tag: String,
	/// Block kinds whose `{/kind}` closing statement is removed.
	#[serde(default = "default_closing_blocks")]
	pub closing_blocks: Vec<String>,
	/// Naming of the local bindings synthesized for exported attributes.
	#[serde(default)]
	pub exports: ExportNaming,
}

impl Default for ApugConfig {
	fn default() -> Self {
		Self {
			template_lang: default_template_lang(),
			fragment_tag: default_fragment_tag(),
			closing_blocks: default_closing_blocks(),
			exports: ExportNaming::default(),
		}
	}
}

/// Controls the local binding name generated for an exported attribute:
/// `{prefix}{name}{suffix}`.
///
/// ```toml
/// [exports]
/// prefix = "__export_"
/// suffix = "__"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportNaming {
	#[serde(default = "default_export_prefix")]
	pub prefix: String,
	#[serde(default = "default_export_suffix")]
	pub suffix: String,
}

impl Default for ExportNaming {
	fn default() -> Self {
		Self {
			prefix: default_export_prefix(),
			suffix: default_export_suffix(),
		}
	}
}

impl ExportNaming {
	/// The local binding name for the exported attribute `name`.
	pub fn binding(&self, name: &str) -> String {
		format!("{}{name}{}", self.prefix, self.suffix)
	}
}

fn default_template_lang() -> String {
	DEFAULT_TEMPLATE_LANG.to_string()
}

fn default_fragment_tag() -> String {
	DEFAULT_FRAGMENT_TAG.to_string()
}

fn default_closing_blocks() -> Vec<String> {
	DEFAULT_CLOSING_BLOCKS.map(String::from).to_vec()
}

fn default_export_prefix() -> String {
	"__export_".to_string()
}

fn default_export_suffix() -> String {
	"__".to_string()
}

impl ApugConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> ApugResult<Option<ApugConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;

		Self::parse(&content).map(Some)
	}

	/// Parse a config from TOML text.
	pub fn parse(content: &str) -> ApugResult<ApugConfig> {
		toml::from_str(content).map_err(|e| ApugError::ConfigParse(e.to_string()))
	}

	/// Whether `kind` is one of the configured closing block kinds.
	pub fn closes_block(&self, kind: &str) -> bool {
		self.closing_blocks.iter().any(|block| block == kind)
	}
}
