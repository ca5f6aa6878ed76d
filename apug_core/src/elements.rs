use crate::ApugResult;
use crate::Edit;
use crate::ExportNaming;
use crate::ExportTable;
use crate::Span;
use crate::delimiter::find_closing;
use crate::directives::rewrite_attributes;
use crate::lexer::ElementHead;
use crate::lexer::indentation;
use crate::lexer::lex_at;
use crate::scan_attributes;
use crate::strip_commented_attributes;

/// Opens an element embedded in a line of text, as in `p see #[a(href="/")]`.
const INLINE_ELEMENT: &str = "#[";

/// Find the next element name followed by `(` at or after `from`.
///
/// Elements start a line (after its indentation) or directly follow `#[`.
/// The returned span covers the tag name without the `(`.
fn find_element(template: &str, from: usize) -> Option<Span> {
	let bytes = template.as_bytes();
	let mut cursor = from;

	while let Some(offset) = template.get(cursor..)?.find(['\n', '#']) {
		let candidate = cursor + offset;
		let head = if bytes[candidate] == b'\n' {
			Some(candidate + 1 + indentation(bytes, candidate + 1))
		} else if template[candidate..].starts_with(INLINE_ELEMENT) {
			Some(candidate + INLINE_ELEMENT.len())
		} else {
			None
		};

		if let Some(head) = head {
			if let Some((ElementHead::Tag, length)) = lex_at::<ElementHead>(&template[head..]) {
				return Some(Span::new(head, head + length - 1));
			}
		}

		cursor = candidate + 1;
	}

	None
}

/// Collect the edits that expand the attribute list of every element in
/// `template`.
///
/// Each list is located with the delimiter matcher, stripped of commented
/// attributes, scanned and rewritten; the edit replaces the list including its
/// parentheses. Lists without a closing parenthesis are left alone. Exported
/// attributes are recorded in `exports`.
pub fn element_edits(
	template: &str,
	exports: &mut ExportTable,
	naming: &ExportNaming,
) -> ApugResult<Vec<Edit>> {
	let mut edits = Vec::new();
	let mut cursor = 0;

	while let Some(tag) = find_element(template, cursor) {
		let Some(list) = find_closing(template, tag.ends, b'(', b')')? else {
			tracing::trace!(tag = tag.slice(template), "attribute list is never closed");
			cursor = tag.ends;
			continue;
		};

		let attributes = strip_commented_attributes(list.inner(template))?;
		let tokens = scan_attributes(&attributes)?;
		let rewritten = rewrite_attributes(&tokens, exports, naming);

		tracing::trace!(
			tag = tag.slice(template),
			attributes = tokens.len(),
			"rewriting attribute list"
		);
		edits.push(Edit::new(list.begins, list.ends, format!("({rewritten})")));
		cursor = list.ends;
	}

	Ok(edits)
}
