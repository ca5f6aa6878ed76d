use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ApugError {
	#[error(transparent)]
	#[diagnostic(code(apug::io_error))]
	Io(#[from] std::io::Error),

	#[error("no opening `{opening}` found at or after offset {offset}")]
	#[diagnostic(
		code(apug::unmatched_open),
		help("the delimited region must start at or after the search offset")
	)]
	UnmatchedOpen { opening: char, offset: usize },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(apug::config_parse),
		help(
			"check that apug.toml is valid TOML with optional `template_lang`, `fragment_tag`, \
			 `closing_blocks` and [exports] entries"
		)
	)]
	ConfigParse(String),
}

pub type ApugResult<T> = Result<T, ApugError>;
