use logos::Logos;

/// Shapes recognised at the start of a template line, after its indentation.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineHead {
	/// `Forms.Input`, a component reference qualified with dots.
	#[regex(r"[A-Z]+[^. \t\n\r(]*(\.[A-Z]+[^. \t\n\r(]*)+")]
	QualifiedComponent,
	/// `(`, an attribute list without a tag name.
	#[token("(")]
	BareAttributes,
}

/// An element name directly followed by the `(` of its attribute list.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementHead {
	#[regex(r"[A-Za-z_:#.\-][A-Za-z0-9_:#.\-]*\(")]
	Tag,
}

/// Block statements written on their own line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Statement {
	/// `{#if cond}`, `{#each items as item}`, `{@html raw}`
	#[regex(r"\{[#@][^} \t\n\r]+[ \t\n\r]+[^}]+\}")]
	Opening,
	/// `{/if}`
	#[regex(r"\{/[^} \t\n\r]+\}")]
	Closing,
}

/// An opening or closing tag whose name carries a colon-qualified chain, as
/// in `<Forms:Input` or `</Forms:Input`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagName {
	#[regex(r"</?[A-Z]+[^> :\t\n\r]*(:[A-Z]+[^> :\t\n\r]*)+")]
	Qualified,
}

/// Match a single token of type `T` anchored at the start of `text`.
///
/// Returns the token and the byte length of its match, or `None` when `text`
/// does not start with any of the token's shapes.
pub(crate) fn lex_at<'s, T>(text: &'s str) -> Option<(T, usize)>
where
	T: Logos<'s, Source = str>,
	T::Extras: Default,
{
	let mut lexer = T::lexer(text);
	match lexer.next() {
		Some(Ok(token)) => Some((token, lexer.span().end)),
		_ => None,
	}
}

/// The start of a line within a scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line {
	/// Offset of the first byte after the indentation.
	pub body: usize,
}

/// Every line that follows a `\n` in `text`, in order.
pub(crate) fn indented_lines(text: &str) -> impl Iterator<Item = Line> + '_ {
	text.match_indices('\n').map(|(newline, _)| {
		Line {
			body: newline + 1 + indentation(text.as_bytes(), newline + 1),
		}
	})
}

/// Count the tabs and spaces starting at `from`.
pub(crate) fn indentation(bytes: &[u8], from: usize) -> usize {
	bytes.get(from..).map_or(0, |rest| {
		rest.iter()
			.take_while(|&&byte| byte == b'\t' || byte == b' ')
			.count()
	})
}

/// Offset of the next `\n` at or after `from`, or the end of the text.
pub(crate) fn line_end(bytes: &[u8], from: usize) -> usize {
	bytes
		.get(from..)
		.and_then(|rest| rest.iter().position(|&byte| byte == b'\n'))
		.map_or(bytes.len(), |offset| from + offset)
}

pub(crate) fn is_blank(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}
