use crate::ApugError;
use crate::ApugResult;

/// Byte that keeps the delimiter directly after it from opening or closing a
/// region.
pub const ESCAPE: u8 = b'\\';

/// A half-open byte region `[begins, ends)` within a scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
	/// Offset of the first byte of the region.
	pub begins: usize,
	/// Offset one past the last byte of the region.
	pub ends: usize,
}

impl Span {
	pub const fn new(begins: usize, ends: usize) -> Self {
		Self { begins, ends }
	}

	pub const fn len(&self) -> usize {
		self.ends - self.begins
	}

	pub const fn is_empty(&self) -> bool {
		self.begins == self.ends
	}

	/// The text covered by this span.
	pub fn slice<'a>(&self, text: &'a str) -> &'a str {
		&text[self.begins..self.ends]
	}

	/// The text covered by this span without its first and last byte, i.e.
	/// the content between a pair of delimiters.
	pub fn inner<'a>(&self, text: &'a str) -> &'a str {
		if self.len() < 2 {
			return "";
		}

		&text[self.begins + 1..self.ends - 1]
	}
}

/// Find the `{ ... }` region starting at the first `{` at or after `from`.
pub fn find_closing_brace(text: &str, from: usize) -> ApugResult<Option<Span>> {
	find_closing(text, from, b'{', b'}')
}

/// Find the nested region delimited by `opening` and `closing`.
///
/// The search first advances to the first `opening` byte at or after `from`.
/// Not finding one is a caller error and returns
/// [`ApugError::UnmatchedOpen`]. From there a depth counter tracks nesting;
/// delimiters directly preceded by [`ESCAPE`] are ignored. Closing is checked
/// before opening so that self-matching delimiters like quotes close on their
/// next unescaped occurrence.
///
/// Returns `Ok(None)` when the text ends before the region is closed.
pub fn find_closing(text: &str, from: usize, opening: u8, closing: u8) -> ApugResult<Option<Span>> {
	let bytes = text.as_bytes();
	let Some(offset) = bytes
		.get(from..)
		.and_then(|rest| rest.iter().position(|&byte| byte == opening))
	else {
		return Err(ApugError::UnmatchedOpen {
			opening: opening as char,
			offset: from,
		});
	};

	let begins = from + offset;
	let mut depth = 1usize;

	for (index, window) in bytes[begins..].windows(2).enumerate() {
		let escaped = window[0] == ESCAPE;
		let current = window[1];

		if current == closing && !escaped {
			depth -= 1;
		} else if current == opening && !escaped {
			depth += 1;
		}

		if depth == 0 {
			return Ok(Some(Span::new(begins, begins + index + 2)));
		}
	}

	Ok(None)
}
