use std::fmt::Display;

use crate::ApugResult;
use crate::EditBuffer;
use crate::Span;
use crate::delimiter::find_closing;
use crate::lexer::indentation;
use crate::lexer::is_blank;
use crate::lexer::line_end;

/// Prefix that marks an attribute as an exported binding.
pub const EXPORT_PREFIX: &str = "export:";

/// Marker that comments out an attribute line together with its indented
/// block.
pub const COMMENT_MARKER: &str = "//-";

/// How an attribute value is delimited in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDelimiter {
	/// `'value'`
	SingleQuote,
	/// `"value"`
	DoubleQuote,
	/// `` `value` ``
	Backtick,
	/// `{expression}`
	Brace,
	/// `[items]`
	Bracket,
	/// `value`, a run of non-blank bytes.
	Bare,
}

impl ValueDelimiter {
	fn from_opening(byte: u8) -> Self {
		match byte {
			b'\'' => Self::SingleQuote,
			b'"' => Self::DoubleQuote,
			b'`' => Self::Backtick,
			b'{' => Self::Brace,
			b'[' => Self::Bracket,
			_ => Self::Bare,
		}
	}

	/// The byte that closes a value opened with this delimiter.
	pub fn closing(self) -> Option<u8> {
		match self {
			Self::SingleQuote => Some(b'\''),
			Self::DoubleQuote => Some(b'"'),
			Self::Backtick => Some(b'`'),
			Self::Brace => Some(b'}'),
			Self::Bracket => Some(b']'),
			Self::Bare => None,
		}
	}

	pub fn is_quote(self) -> bool {
		matches!(self, Self::SingleQuote | Self::DoubleQuote | Self::Backtick)
	}
}

/// The position of an attribute value found by [`get_attribute_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMatch {
	/// The value including its delimiters.
	pub span: Span,
	pub delimiter: ValueDelimiter,
	/// Whether the value was assigned with `!=`.
	pub escape_mark: bool,
}

/// The assignment operator between an attribute name and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	/// `=`
	Assign,
	/// `!=`
	Unescaped,
}

impl Operator {
	/// The operator with the opposite escaping.
	#[must_use]
	pub fn inverted(self) -> Self {
		match self {
			Self::Assign => Self::Unescaped,
			Self::Unescaped => Self::Assign,
		}
	}
}

impl Display for Operator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Assign => write!(f, "="),
			Self::Unescaped => write!(f, "!="),
		}
	}
}

/// An attribute value as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
	/// The value text including its delimiters.
	pub raw: String,
	pub delimiter: ValueDelimiter,
}

impl AttributeValue {
	pub fn new(raw: impl Into<String>, delimiter: ValueDelimiter) -> Self {
		Self {
			raw: raw.into(),
			delimiter,
		}
	}

	/// The value without its delimiters. Bare values are returned unchanged.
	pub fn inner(&self) -> &str {
		if self.delimiter == ValueDelimiter::Bare || self.raw.len() < 2 {
			return &self.raw;
		}

		&self.raw[1..self.raw.len() - 1]
	}
}

/// A single attribute from an element's attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeToken {
	/// The attribute name with any [`EXPORT_PREFIX`] removed.
	pub name: String,
	pub operator: Option<Operator>,
	pub value: Option<AttributeValue>,
	/// The name carried the [`EXPORT_PREFIX`].
	pub exported: bool,
	/// The value was assigned with `!=` and is passed through untouched.
	pub escape_mark: bool,
}

impl AttributeToken {
	/// An attribute without a value, e.g. `disabled`.
	pub fn bare(name: &str) -> Self {
		let (name, exported) = split_export(name);
		Self {
			name: name.to_string(),
			operator: None,
			value: None,
			exported,
			escape_mark: false,
		}
	}

	/// An attribute assigned with `=`.
	pub fn assigned(name: &str, value: AttributeValue) -> Self {
		let (name, exported) = split_export(name);
		Self {
			name: name.to_string(),
			operator: Some(Operator::Assign),
			value: Some(value),
			exported,
			escape_mark: false,
		}
	}

	/// An attribute assigned with `!=`. The name is kept verbatim.
	pub fn escaped(name: &str, value: AttributeValue) -> Self {
		Self {
			name: name.to_string(),
			operator: Some(Operator::Unescaped),
			value: Some(value),
			exported: false,
			escape_mark: true,
		}
	}
}

impl Display for AttributeToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match (&self.operator, &self.value) {
			(Some(operator), Some(value)) => write!(f, "{}{operator}{}", self.name, value.raw),
			_ => write!(f, "{}", self.name),
		}
	}
}

fn split_export(name: &str) -> (&str, bool) {
	match name.strip_prefix(EXPORT_PREFIX) {
		Some(name) => (name, true),
		None => (name, false),
	}
}

/// Find the value of the attribute whose name starts at `pos`.
///
/// Scans forward to the first `=`; reaching a blank or the end of the text
/// first means the attribute has no value. A `!` directly before the `=`
/// marks the value as escaped. The byte after the `=` decides how far the
/// value reaches: quotes match up to their next unescaped twin, `{` and `[`
/// are matched with nesting, and anything else runs until the next blank.
pub fn get_attribute_value(text: &str, pos: usize) -> ApugResult<Option<ValueMatch>> {
	let bytes = text.as_bytes();
	let mut pos = pos;

	while pos < bytes.len() && bytes[pos] != b'=' {
		if is_blank(bytes[pos]) {
			return Ok(None);
		}
		pos += 1;
	}

	if pos >= bytes.len() {
		return Ok(None);
	}

	let escape_mark = pos > 0 && bytes[pos - 1] == b'!';
	let start = pos + 1;
	let delimiter = bytes
		.get(start)
		.map_or(ValueDelimiter::Bare, |&byte| ValueDelimiter::from_opening(byte));

	let Some(closing) = delimiter.closing() else {
		let length = bytes[start..]
			.iter()
			.position(|&byte| is_blank(byte))
			.unwrap_or(bytes.len() - start);

		if length == 0 {
			return Ok(None);
		}

		return Ok(Some(ValueMatch {
			span: Span::new(start, start + length),
			delimiter,
			escape_mark,
		}));
	};

	let span = find_closing(text, start, bytes[start], closing)?;
	Ok(span.map(|span| {
		ValueMatch {
			span,
			delimiter,
			escape_mark,
		}
	}))
}

/// A `//-` comment line inside an attribute list.
struct Comment {
	/// Offset of the newline in front of the comment line.
	newline: usize,
	/// Indentation of the comment line.
	depth: usize,
	/// Offset right after the marker and the non-blank run glued to it.
	marker_end: usize,
}

fn find_comment(text: &str, from: usize) -> Option<Comment> {
	let bytes = text.as_bytes();
	let mut cursor = from;

	while let Some(offset) = text.get(cursor..)?.find('\n') {
		let newline = cursor + offset;
		let depth = indentation(bytes, newline + 1);
		let marker = newline + 1 + depth;

		if text[marker..].starts_with(COMMENT_MARKER) {
			let after = marker + COMMENT_MARKER.len();
			let run = bytes[after..]
				.iter()
				.take_while(|&&byte| !is_blank(byte))
				.count();

			return Some(Comment {
				newline,
				depth,
				marker_end: after + run,
			});
		}

		cursor = newline + 1;
	}

	None
}

/// Remove commented attributes from an attribute list.
///
/// A comment line removes itself and every following line indented deeper
/// than it. When a value can be read one byte past the marker, that value is
/// removed as well, wherever it ends.
pub fn strip_commented_attributes(attributes: &str) -> ApugResult<String> {
	let bytes = attributes.as_bytes();
	let mut buffer = EditBuffer::new(attributes);
	let mut cursor = 0;

	while let Some(comment) = find_comment(attributes, cursor) {
		let continuation = get_attribute_value(attributes, comment.marker_end + 1)?
			.map(|found| found.span.ends)
			.filter(|&ends| ends > comment.marker_end);

		let mut last = line_end(bytes, continuation.unwrap_or(comment.marker_end));

		while last < bytes.len() {
			let next = last + 1;
			let depth = indentation(bytes, next);

			if depth <= comment.depth {
				break;
			}

			last = line_end(bytes, next + depth);
		}

		if let Some(ends) = continuation {
			last = last.max(ends);
		}

		tracing::trace!(
			from = comment.newline,
			to = last,
			"removing commented attribute block"
		);
		buffer.add(comment.newline, last, "");
		cursor = last;
	}

	Ok(buffer.into_string())
}

/// Split an attribute list into tokens, in source order.
pub fn scan_attributes(attributes: &str) -> ApugResult<Vec<AttributeToken>> {
	let bytes = attributes.as_bytes();
	let mut tokens = Vec::new();
	let mut pos = 0;

	loop {
		pos += bytes[pos..]
			.iter()
			.take_while(|&&byte| is_blank(byte))
			.count();

		if pos >= bytes.len() {
			break;
		}

		let start = pos;
		let run_end = bytes[start..]
			.iter()
			.position(|&byte| is_blank(byte))
			.map_or(bytes.len(), |offset| start + offset);

		match get_attribute_value(attributes, start)? {
			Some(found) => {
				let value = AttributeValue::new(found.span.slice(attributes), found.delimiter);
				let equals = found.span.begins - 1;

				let token = if found.escape_mark {
					AttributeToken::escaped(&attributes[start..equals - 1], value)
				} else {
					AttributeToken::assigned(&attributes[start..equals], value)
				};

				tokens.push(token);
				pos = found.span.ends;
			}
			None => {
				tokens.push(AttributeToken::bare(&attributes[start..run_end]));
				pos = run_end;
			}
		}
	}

	Ok(tokens)
}
