use derive_more::Deref;

use crate::EditBuffer;
use crate::ExportNaming;
use crate::Span;

/// Tag that closes a script block.
pub const SCRIPT_CLOSE: &str = "</script>";

/// An attribute promoted to an exported component property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBinding {
	/// The public property name.
	pub name: String,
	/// Initializer of the local binding. `None` leaves it uninitialized.
	pub default: Option<String>,
}

/// Exported bindings collected while rewriting one template region, in the
/// order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct ExportTable(Vec<ExportBinding>);

impl ExportTable {
	/// Record an export. Exporting a name again replaces its default but
	/// keeps its original position.
	pub fn insert(&mut self, name: impl Into<String>, default: Option<String>) {
		let name = name.into();

		if let Some(existing) = self.0.iter_mut().find(|binding| binding.name == name) {
			existing.default = default;
			return;
		}

		self.0.push(ExportBinding { name, default });
	}

	/// `;let binding = default;` declarations, one per line.
	pub fn declarations(&self, naming: &ExportNaming) -> String {
		let mut declarations = String::from(";");

		for binding in &self.0 {
			let local = naming.binding(&binding.name);
			match &binding.default {
				Some(default) => declarations.push_str(&format!("let {local} = {default};\n")),
				None => declarations.push_str(&format!("let {local};\n")),
			}
		}

		declarations
	}

	/// `binding as name` specifiers joined with `, `.
	pub fn specifiers(&self, naming: &ExportNaming) -> String {
		self.0
			.iter()
			.map(|binding| format!("{} as {}", naming.binding(&binding.name), binding.name))
			.collect::<Vec<_>>()
			.join(", ")
	}
}

/// Find the first `export {` statement opening, allowing any blanks between
/// the keyword and the brace. The span covers `export` through the `{`.
pub fn find_export_block(code: &str) -> Option<Span> {
	let mut cursor = 0;

	while let Some(offset) = code[cursor..].find("export") {
		let begins = cursor + offset;
		let after = begins + "export".len();
		let rest = &code[after..];
		let brace = after + (rest.len() - rest.trim_start().len());

		if code[brace..].starts_with('{') {
			return Some(Span::new(begins, brace + 1));
		}

		cursor = after;
	}

	None
}

/// Declare and export every binding of `table` in `code`.
///
/// The first match decides where the bindings go:
///
/// 1. an existing `export {` statement receives the specifiers, and the
///    declarations are placed in front of it;
/// 2. otherwise the declarations and a new `export { ... };` statement are
///    placed in front of the first `</script>`;
/// 3. otherwise a new `<script>` block holding both is prepended.
pub fn inject_exports(code: &str, table: &ExportTable, naming: &ExportNaming) -> String {
	if table.is_empty() {
		return code.to_string();
	}

	let declarations = table.declarations(naming);
	let specifiers = table.specifiers(naming);
	let mut buffer = EditBuffer::new(code);

	if let Some(block) = find_export_block(code) {
		tracing::debug!(offset = block.begins, "extending existing export statement");
		buffer.add(block.ends, block.ends, format!("{specifiers}, "));
		buffer.add(block.begins, block.begins, declarations);
	} else if let Some(index) = code.find(SCRIPT_CLOSE) {
		tracing::debug!(offset = index, "appending exports to script block");
		buffer.add(
			index,
			index,
			format!("\n{declarations}export {{ {specifiers} }};\n"),
		);
	} else {
		tracing::debug!("prepending script block for exports");
		buffer.add(
			0,
			0,
			format!("<script>\n{declarations}export {{ {specifiers} }};\n</script>\n"),
		);
	}

	buffer.into_string()
}
