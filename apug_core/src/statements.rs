use crate::Edit;
use crate::lexer::Statement;
use crate::lexer::indented_lines;
use crate::lexer::is_blank;
use crate::lexer::lex_at;

/// Collect the edits that rewrite block statements at line starts.
///
/// `{#kind args}` and `{@kind args}` become ``+kind(`args`)`` with any
/// back-ticks in `args` escaped. `{/kind}` is removed when `closes` accepts
/// `kind`; the call-style form is closed by indentation instead.
pub fn statement_edits(template: &str, closes: impl Fn(&str) -> bool) -> Vec<Edit> {
	let mut edits = Vec::new();
	let mut consumed = 0;

	for line in indented_lines(template) {
		if line.body < consumed {
			continue;
		}

		let Some((statement, length)) = lex_at::<Statement>(&template[line.body..]) else {
			continue;
		};

		let ends = line.body + length;
		let token = &template[line.body..ends];

		match statement {
			Statement::Opening => {
				let (kind, args) = split_statement(token);
				tracing::trace!(kind, "rewriting block statement");
				edits.push(Edit::new(
					line.body,
					ends,
					format!("+{kind}(`{}`)", args.replace('`', "\\`")),
				));
			}
			Statement::Closing => {
				let kind = &token[2..token.len() - 1];
				if !closes(kind) {
					continue;
				}

				edits.push(Edit::delete(line.body, ends));
			}
		}

		consumed = ends;
	}

	edits
}

/// Split `{#kind args}` into `kind` and `args`, dropping the blanks between
/// them.
fn split_statement(token: &str) -> (&str, &str) {
	let body = &token[2..token.len() - 1];
	let kind_length = body
		.bytes()
		.position(is_blank)
		.unwrap_or(body.len());
	let (kind, args) = body.split_at(kind_length);

	(kind, args.trim_start_matches([' ', '\t', '\n', '\r']))
}
