use std::borrow::Cow;

use crate::AttributeToken;
use crate::ExportNaming;
use crate::ExportTable;
use crate::Operator;

/// Value given to a `class` or `style` attribute written without one.
const EMPTY_STRING: &str = "''";

/// Accumulated state of a `class` or `style` directive for one element.
#[derive(Debug, Default)]
struct Directive {
	/// The value of the attribute itself, after rewriting.
	value: Option<String>,
	/// Whether following `:name` attributes fold into this directive.
	open: bool,
	/// Fragments appended to the value.
	fragments: String,
}

impl Directive {
	fn is_used(&self) -> bool {
		self.value.is_some() || !self.fragments.is_empty()
	}

	/// The single attribute value combining the original value with every
	/// fragment, as a quoted string.
	fn consolidate(&self) -> String {
		let value = self.value.as_deref().unwrap_or(EMPTY_STRING);
		let (value, quote) = match leading_quote(value) {
			Some(quote) => (value.to_string(), quote),
			None => (template_literal(&format!("{{{value}}}")), '`'),
		};

		let body = value.strip_suffix(quote).unwrap_or(&value);
		let fragments = self.fragments.replace(quote, &format!("\\{quote}"));

		format!("{body} {fragments}{quote}")
	}
}

/// Folds an element's attribute tokens into the attribute text of the
/// expanded dialect.
///
/// Tokens are pushed in source order. `--name` attributes, and `:name`
/// attributes that follow a `style`, become style declarations; `:name`
/// attributes that follow a `class` become conditional classes. Everything
/// else closes both directives and is emitted as a regular attribute.
/// [`AttributeRewriter::finish`] appends the consolidated `class` and `style`
/// attributes, so each appears at most once.
pub struct AttributeRewriter<'a> {
	exports: &'a mut ExportTable,
	naming: &'a ExportNaming,
	output: String,
	class: Directive,
	style: Directive,
}

impl<'a> AttributeRewriter<'a> {
	pub fn new(exports: &'a mut ExportTable, naming: &'a ExportNaming) -> Self {
		Self {
			exports,
			naming,
			output: String::new(),
			class: Directive::default(),
			style: Directive::default(),
		}
	}

	pub fn push(&mut self, token: &AttributeToken) {
		if token.escape_mark {
			self.output.push_str(&format!(" {token}"));
			return;
		}

		let name = token.name.as_str();
		let conditional = name.strip_prefix(':');

		if name.starts_with("--") || (self.style.open && conditional.is_some()) {
			let property = conditional.unwrap_or(name);
			self.style
				.fragments
				.push_str(&format!(";{property}: {};", style_value(token)));
			return;
		}

		if let (true, Some(class_name)) = (self.class.open, conditional) {
			let condition = token.value.as_ref().map_or(class_name, |value| value.inner());
			self.class
				.fragments
				.push_str(&format!(" {{{condition} ? ' {class_name}' : ''}}"));
			return;
		}

		self.class.open = false;
		self.style.open = false;

		let is_class = name == "class";
		let is_style = name == "style";
		let name = normalize_name(name);

		let mut value = token.value.as_ref().map(|value| value.raw.clone());
		if (is_class || is_style) && value.is_none() {
			value = Some(EMPTY_STRING.to_string());
		}

		if token.exported {
			value = self.export(&name, value, is_style);
		}

		let value = value.map(rewrap_value);
		let operator = token.operator.map(Operator::inverted);

		if is_class {
			self.class.value = value;
			self.class.open = true;
		} else if is_style {
			self.style.value = value;
			self.style.open = true;
		} else {
			match (operator, value) {
				(Some(operator), Some(value)) => {
					self.output.push_str(&format!(" {name}{operator}{value}"));
				}
				_ => {
					self.output.push_str(&format!(" {name}"));
				}
			}
		}
	}

	/// Record `name` as an export and return the value that references its
	/// local binding.
	fn export(&mut self, name: &str, value: Option<String>, is_style: bool) -> Option<String> {
		let binding = self.naming.binding(name);
		tracing::trace!(name, binding, "exporting attribute");

		let Some(value) = value else {
			self.exports.insert(name, None);
			return None;
		};

		if let Some(quote) = leading_quote(&value) {
			let separator = if is_style { ";" } else { "" };
			let body = value.strip_suffix(quote).unwrap_or(&value);
			self.exports.insert(name, Some("\"\"".to_string()));

			return Some(format!("{body} {separator}{{{binding}}}{separator}{quote}"));
		}

		let default = match value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
			Some(expression) => expression.to_string(),
			None => value,
		};
		self.exports.insert(name, Some(default));

		Some(format!("{{{binding}}}"))
	}

	/// The rewritten attribute text, each attribute preceded by a space.
	pub fn finish(self) -> String {
		let Self {
			mut output,
			class,
			style,
			..
		} = self;

		for (name, directive) in [("class", class), ("style", style)] {
			if directive.is_used() {
				output.push_str(&format!(" {name}!={}", directive.consolidate()));
			}
		}

		output
	}
}

/// Rewrite a whole attribute list at once.
pub fn rewrite_attributes(
	tokens: &[AttributeToken],
	exports: &mut ExportTable,
	naming: &ExportNaming,
) -> String {
	let mut rewriter = AttributeRewriter::new(exports, naming);
	for token in tokens {
		rewriter.push(token);
	}

	rewriter.finish()
}

/// The declaration value of a style fragment: quoted values lose their
/// quotes, everything else is used as written.
fn style_value(token: &AttributeToken) -> &str {
	match &token.value {
		Some(value) if value.delimiter.is_quote() => value.inner(),
		Some(value) => &value.raw,
		None => "",
	}
}

/// Spreads and brace expressions used as names are turned into string
/// attribute names.
fn normalize_name(name: &str) -> Cow<'_, str> {
	if name.starts_with("...") {
		Cow::Owned(format!("'{{{name}}}'"))
	} else if name.starts_with('{') && name.ends_with('}') {
		Cow::Owned(format!("'{name}'"))
	} else {
		Cow::Borrowed(name)
	}
}

/// Values that are literals in the shorthand dialect but would read as text
/// in the expanded dialect are wrapped into template literals holding an
/// expression.
fn rewrap_value(value: String) -> String {
	if value.starts_with('[') || is_numeric(&value) {
		template_literal(&format!("{{{value}}}"))
	} else if value.starts_with('{') {
		template_literal(&value)
	} else if value == "true" || value == "false" {
		format!("`{{{value}}}`")
	} else {
		value
	}
}

fn template_literal(text: &str) -> String {
	format!("`{}`", text.replace('`', "\\`"))
}

/// Matches `\d+(\.\d+)?`.
fn is_numeric(value: &str) -> bool {
	let (integer, fraction) = match value.split_once('.') {
		Some((integer, fraction)) => (integer, Some(fraction)),
		None => (value, None),
	};
	let digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());

	digits(integer) && fraction.is_none_or(digits)
}

fn leading_quote(value: &str) -> Option<char> {
	value
		.chars()
		.next()
		.filter(|&first| matches!(first, '\'' | '"' | '`'))
}
