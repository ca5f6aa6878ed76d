use crate::ApugConfig;
use crate::ApugResult;
use crate::EditBuffer;
use crate::ExportTable;
use crate::component_edits;
use crate::element_edits;
use crate::find_template_region;
use crate::inject_exports;
use crate::rewrite_tag_namespaces;
use crate::statement_edits;

/// Output of a pass, handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
	pub code: String,
}

impl Processed {
	fn new(code: impl Into<String>) -> Self {
		Self { code: code.into() }
	}
}

/// Runs both passes with a fixed configuration.
///
/// A `Preprocessor` holds no state between calls, so one value can serve
/// every file of a build.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
	config: ApugConfig,
}

impl Preprocessor {
	pub fn new(config: ApugConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ApugConfig {
		&self.config
	}

	/// Pass 1: expand the shorthand inside the template region of `content`.
	///
	/// Documents without a template region of the configured language are
	/// returned unchanged. Exported attributes found in the region are
	/// declared and exported in the document's script block, which is created
	/// when missing.
	#[tracing::instrument(level = "debug", skip_all, fields(filename = filename))]
	pub fn pre(&self, content: &str, filename: &str) -> ApugResult<Processed> {
		let Some(region) = find_template_region(content, &self.config.template_lang) else {
			tracing::debug!(lang = %self.config.template_lang, "no template region found");
			return Ok(Processed::new(content));
		};

		let mut exports = ExportTable::default();
		let mut buffer = EditBuffer::new(region.slice(content));

		let components = component_edits(buffer.snapshot(), &self.config.fragment_tag);
		tracing::debug!(count = components.len(), "qualifying components");
		buffer.extend(components);
		buffer.apply();

		let elements = element_edits(buffer.snapshot(), &mut exports, &self.config.exports)?;
		tracing::debug!(count = elements.len(), "rewriting attribute lists");
		buffer.extend(elements);
		buffer.apply();

		let statements = statement_edits(buffer.snapshot(), |kind| {
			self.config.closes_block(kind)
		});
		tracing::debug!(count = statements.len(), "rewriting block statements");
		buffer.extend(statements);

		let template = buffer.into_string();
		let code = format!(
			"{}{template}{}",
			&content[..region.begins],
			&content[region.ends..]
		);

		if exports.is_empty() {
			return Ok(Processed::new(code));
		}

		tracing::debug!(count = exports.len(), "injecting exports");
		Ok(Processed::new(inject_exports(
			&code,
			&exports,
			&self.config.exports,
		)))
	}

	/// Pass 2: turn colon-qualified component tags in rendered output back
	/// into dot-qualified ones.
	#[tracing::instrument(level = "debug", skip_all, fields(filename = filename))]
	pub fn post(&self, content: &str, filename: &str) -> Processed {
		Processed::new(rewrite_tag_namespaces(content))
	}
}

/// Run pass 1 with the default configuration.
pub fn transform_pre(content: &str, filename: &str) -> ApugResult<Processed> {
	Preprocessor::default().pre(content, filename)
}

/// Run pass 2 with the default configuration.
pub fn transform_post(content: &str, filename: &str) -> Processed {
	Preprocessor::default().post(content, filename)
}
