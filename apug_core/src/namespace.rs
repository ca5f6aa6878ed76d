use crate::Edit;
use crate::EditBuffer;
use crate::lexer::LineHead;
use crate::lexer::TagName;
use crate::lexer::indented_lines;
use crate::lexer::lex_at;

/// Collect the edits of the first pass-1 layer.
///
/// A line starting with a dot-qualified component (`Forms.Input`) has the
/// dots of its qualifier chain replaced by colons, so the dots are not read as
/// class shorthand. A line starting with a bare attribute list gets
/// `fragment_tag` inserted in front of the `(`.
pub fn component_edits(template: &str, fragment_tag: &str) -> Vec<Edit> {
	let mut edits = Vec::new();

	for line in indented_lines(template) {
		match lex_at::<LineHead>(&template[line.body..]) {
			Some((LineHead::QualifiedComponent, length)) => {
				let component = &template[line.body..line.body + length];
				let Some(chain) = component.find('.') else {
					continue;
				};

				edits.push(Edit::new(
					line.body + chain,
					line.body + length,
					component[chain..].replace('.', ":"),
				));
			}
			Some((LineHead::BareAttributes, _)) => {
				edits.push(Edit::insert(line.body, fragment_tag));
			}
			None => {}
		}
	}

	edits
}

/// Rewrite colon-qualified tag names (`<Forms:Input>`, `</Forms:Input>`) into
/// dot-qualified ones (`<Forms.Input>`).
///
/// Only the qualifier chain after the base name changes; every qualifier
/// segment must start with an uppercase letter. Running this twice is the
/// same as running it once.
pub fn rewrite_tag_namespaces(content: &str) -> String {
	let mut buffer = EditBuffer::new(content);
	let mut cursor = 0;

	while let Some(offset) = content[cursor..].find('<') {
		let begins = cursor + offset;

		let Some((TagName::Qualified, length)) = lex_at::<TagName>(&content[begins..]) else {
			cursor = begins + 1;
			continue;
		};

		let tag = &content[begins..begins + length];
		if let Some(chain) = tag.find(':') {
			buffer.add(
				begins + chain,
				begins + length,
				tag[chain..].replace(':', "."),
			);
		}

		cursor = begins + length;
	}

	tracing::debug!(tags = buffer.pending(), "qualified tag names rewritten");
	buffer.into_string()
}
