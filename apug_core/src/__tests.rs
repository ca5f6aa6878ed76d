use rstest::rstest;
use similar_asserts::assert_eq;
use tracing_test::traced_test;

use super::*;

fn rewrite(list: &str) -> ApugResult<(String, ExportTable)> {
	let mut exports = ExportTable::default();
	let tokens = scan_attributes(list)?;
	let output = rewrite_attributes(&tokens, &mut exports, &ExportNaming::default());

	Ok((output, exports))
}

fn pug(template: &str) -> String {
	format!("<template lang=\"pug\">{template}</template>")
}

#[rstest]
#[case::nested("{a{b}c}", 0, Span::new(0, 7))]
#[case::escaped_closing(r"{a\}b}", 0, Span::new(0, 6))]
#[case::advances_to_opening("x = {a}", 0, Span::new(4, 7))]
#[case::from_offset("{a} {b}", 1, Span::new(4, 7))]
fn find_closing_brace_regions(
	#[case] text: &str,
	#[case] from: usize,
	#[case] expected: Span,
) -> ApugResult<()> {
	let span = find_closing_brace(text, from)?;
	assert_eq!(span, Some(expected));

	Ok(())
}

#[test]
fn find_closing_parentheses() -> ApugResult<()> {
	let text = "(a(b))c";
	let span = find_closing(text, 0, b'(', b')')?;
	assert_eq!(span, Some(Span::new(0, 6)));
	assert_eq!(span.map(|span| span.inner(text)), Some("a(b)"));

	Ok(())
}

#[test]
fn find_closing_unterminated_region() -> ApugResult<()> {
	assert_eq!(find_closing_brace("{a{b}", 0)?, None);
	Ok(())
}

#[test]
fn find_closing_without_opening_is_an_error() {
	let result = find_closing_brace("abc", 0);
	assert!(matches!(
		result,
		Err(ApugError::UnmatchedOpen {
			opening: '{',
			offset: 0
		})
	));
}

#[rstest]
#[case::descending(vec![Edit::new(2, 4, "X"), Edit::new(0, 2, "Y")])]
#[case::ascending(vec![Edit::new(0, 2, "Y"), Edit::new(2, 4, "X")])]
fn edit_buffer_order_independent(#[case] edits: Vec<Edit>) {
	let mut buffer = EditBuffer::new("abcdef");
	buffer.extend(edits);
	assert_eq!(buffer.get(), "YXef");
}

#[test]
fn edit_buffer_get_leaves_snapshot_untouched() {
	let mut buffer = EditBuffer::new("abcdef");
	buffer.add(0, 0, ">");
	assert_eq!(buffer.get(), ">abcdef");
	assert_eq!(buffer.snapshot(), "abcdef");
	assert_eq!(buffer.pending(), 1);
}

#[test]
fn edit_buffer_apply_starts_new_layer() {
	let mut buffer = EditBuffer::new("abcdef");
	buffer.add(0, 1, "xyz");
	assert_eq!(buffer.apply(), "xyzbcdef");
	assert_eq!(buffer.pending(), 0);

	buffer.add(3, 4, "B");
	assert_eq!(buffer.into_string(), "xyzBcdef");
}

#[rstest]
#[case::double_quote(r#"x="1""#, 2..5, ValueDelimiter::DoubleQuote, false)]
#[case::brace("y={2}", 2..5, ValueDelimiter::Brace, false)]
#[case::escape_mark("a!=b c", 3..4, ValueDelimiter::Bare, true)]
#[case::nested_bracket("list=[1, [2]]", 5..13, ValueDelimiter::Bracket, false)]
#[case::escaped_quote(r"s='it\'s'", 2..9, ValueDelimiter::SingleQuote, false)]
fn attribute_values(
	#[case] text: &str,
	#[case] range: std::ops::Range<usize>,
	#[case] delimiter: ValueDelimiter,
	#[case] escape_mark: bool,
) -> ApugResult<()> {
	let found = get_attribute_value(text, 0)?;
	assert_eq!(
		found,
		Some(ValueMatch {
			span: Span::new(range.start, range.end),
			delimiter,
			escape_mark,
		})
	);

	Ok(())
}

#[rstest]
#[case::no_equals("z")]
#[case::blank_before_equals("a =b")]
#[case::blank_after_equals("a= b")]
#[case::trailing_equals("a=")]
fn attribute_without_value(#[case] text: &str) -> ApugResult<()> {
	assert_eq!(get_attribute_value(text, 0)?, None);
	Ok(())
}

#[test]
fn scan_attribute_tokens_in_order() -> ApugResult<()> {
	let tokens = scan_attributes(r#"x="1" y={2} z"#)?;

	let names: Vec<&str> = tokens.iter().map(|token| token.name.as_str()).collect();
	let raws: Vec<Option<&str>> = tokens
		.iter()
		.map(|token| token.value.as_ref().map(|value| value.raw.as_str()))
		.collect();

	assert_eq!(names, vec!["x", "y", "z"]);
	assert_eq!(raws, vec![Some("\"1\""), Some("{2}"), None]);
	assert_eq!(tokens[2].operator, None);

	Ok(())
}

#[test]
fn scan_multiline_attribute_list() -> ApugResult<()> {
	let tokens = scan_attributes("\n\thref=\"/\"\n\ttitle='Home page'\n")?;
	assert_eq!(
		tokens,
		vec![
			AttributeToken::assigned("href", AttributeValue::new("\"/\"", ValueDelimiter::DoubleQuote)),
			AttributeToken::assigned(
				"title",
				AttributeValue::new("'Home page'", ValueDelimiter::SingleQuote)
			),
		]
	);

	Ok(())
}

#[test]
fn scan_export_and_escaped_tokens() -> ApugResult<()> {
	let tokens = scan_attributes("export:count=0 html!={raw}")?;

	assert_eq!(tokens[0].name, "count");
	assert!(tokens[0].exported);
	assert_eq!(tokens[1].name, "html");
	assert!(tokens[1].escape_mark);
	assert_eq!(tokens[1].operator, Some(Operator::Unescaped));

	Ok(())
}

#[rstest]
#[case::single_line("a=1\n\t//- b=2\n\tc=3", "a=1\n\tc=3")]
#[case::indented_block("a\n\t//-\n\t\tb=1\n\t\tc=2\n\td", "a\n\td")]
#[case::swallows_following_value("a\n\t//-\nb=\"x y\"", "a")]
#[case::no_comment("a=1\n\tb=2", "a=1\n\tb=2")]
fn strip_comments(#[case] attributes: &str, #[case] expected: &str) -> ApugResult<()> {
	assert_eq!(strip_commented_attributes(attributes)?, expected);
	Ok(())
}

#[test]
fn fold_conditional_classes() -> ApugResult<()> {
	let (output, exports) = rewrite(r#"class="base" :active=isActive :big"#)?;

	insta::assert_snapshot!(output.trim_start(), @r#"class!="base  {isActive ? ' active' : ''} {big ? ' big' : ''}""#);
	assert!(exports.is_empty());

	Ok(())
}

#[rstest]
#[case::class_without_value("class :on", r" class!='  {on ? \' on\' : \'\'}'")]
#[case::class_expression("class={cls} :on", " class!=`{cls}  {on ? ' on' : ''}`")]
#[case::style_fragments(
	"style :color=\"red\" --gap={gap}",
	" style!=' ;color: red;;--gap: {gap};'"
)]
#[case::variable_without_style(
	"--color=\"red\" :size=\"2px\"",
	" :size!=\"2px\" style!=' ;--color: red;'"
)]
#[case::regular_attribute_closes_class(
	"class=\"a\" href=\"/\" :on",
	" href!=\"/\" :on class!=\"a \""
)]
#[case::escaped_keeps_class_open(
	"class=\"a\" html!={raw} :on",
	" html!={raw} class!=\"a  {on ? ' on' : ''}\""
)]
#[case::escaped_keeps_style_open(
	"style html!={raw} :color=\"red\"",
	" html!={raw} style!=' ;color: red;'"
)]
fn fold_directives(#[case] list: &str, #[case] expected: &str) -> ApugResult<()> {
	let (output, _) = rewrite(list)?;
	assert_eq!(output, expected);

	Ok(())
}

#[rstest]
#[case::array("a=[1, 2]", " a!=`{[1, 2]}`")]
#[case::expression("a={b}", " a!=`{b}`")]
#[case::boolean("a=true", " a!=`{true}`")]
#[case::number("a=3.5", " a!=`{3.5}`")]
#[case::string("a=\"x\"", " a!=\"x\"")]
#[case::identifier("a=foo", " a!=foo")]
#[case::escaped("a!=\"x\"", " a!=\"x\"")]
#[case::spread("...rest", " '{...rest}'")]
#[case::shorthand("{value}", " '{value}'")]
#[case::flag("disabled", " disabled")]
fn rewrap_values(#[case] list: &str, #[case] expected: &str) -> ApugResult<()> {
	let (output, _) = rewrite(list)?;
	assert_eq!(output, expected);

	Ok(())
}

#[rstest]
#[case::literal("export:count=0", " count!=`{__export_count__}`", Some("0"))]
#[case::expression("export:items={[]}", " items!=`{__export_items__}`", Some("[]"))]
#[case::string("export:title=\"Hi\"", " title!=\"Hi {__export_title__}\"", Some("\"\""))]
#[case::flag("export:open", " open", None)]
fn export_attributes(
	#[case] list: &str,
	#[case] expected: &str,
	#[case] default: Option<&str>,
) -> ApugResult<()> {
	let (output, exports) = rewrite(list)?;

	assert_eq!(output, expected);
	assert_eq!(exports.len(), 1);
	assert_eq!(exports[0].default.as_deref(), default);

	Ok(())
}

#[test]
fn export_table_keeps_first_position() {
	let mut table = ExportTable::default();
	table.insert("a", Some("1".into()));
	table.insert("b", None);
	table.insert("a", Some("2".into()));

	let naming = ExportNaming::default();
	assert_eq!(table.len(), 2);
	assert_eq!(
		table.declarations(&naming),
		";let __export_a__ = 2;\nlet __export_b__;\n"
	);
	assert_eq!(
		table.specifiers(&naming),
		"__export_a__ as a, __export_b__ as b"
	);
}

fn count_table() -> ExportTable {
	let mut table = ExportTable::default();
	table.insert("count", Some("0".into()));
	table
}

#[rstest]
#[case::creates_script(
	"<p>hi</p>",
	"<script>\n;let __export_count__ = 0;\nexport { __export_count__ as count \
	 };\n</script>\n<p>hi</p>"
)]
#[case::appends_to_script(
	"<script>\nlet a = 1;\n</script>",
	"<script>\nlet a = 1;\n\n;let __export_count__ = 0;\nexport { __export_count__ as count \
	 };\n</script>"
)]
#[case::extends_export_statement(
	"<script>\nexport { a };\n</script>",
	"<script>\n;let __export_count__ = 0;\nexport {__export_count__ as count,  a };\n</script>"
)]
fn inject_export_bindings(#[case] code: &str, #[case] expected: &str) {
	let output = inject_exports(code, &count_table(), &ExportNaming::default());
	assert_eq!(output, expected);
}

#[test]
fn inject_nothing_without_exports() {
	let code = "<p>hi</p>";
	let output = inject_exports(code, &ExportTable::default(), &ExportNaming::default());
	assert_eq!(output, code);
}

#[rstest]
#[case::double_quotes("<template lang=\"pug\">\np\n</template>", Some("\np\n"))]
#[case::single_quotes("<template lang='pug'>\np\n</template>", Some("\np\n"))]
#[case::other_lang("<template lang=\"html\">\np\n</template>", None)]
#[case::unclosed("<template lang=\"pug\">\np\n", None)]
fn template_regions(#[case] content: &str, #[case] expected: Option<&str>) {
	let region = find_template_region(content, "pug");
	assert_eq!(region.map(|region| region.slice(content)), expected);
}

#[rstest]
#[case::component("\n\tForms.Input(type=\"text\")", "\n\tForms:Input(type=\"text\")")]
#[case::deep_chain("\nA.B.C", "\nA:B:C")]
#[case::fragment("\n(slot=\"header\")", "\nsvelte:fragment(slot=\"header\")")]
#[case::class_shorthand("\ndiv.big(x)", "\ndiv.big(x)")]
#[case::lowercase_qualifier("\nForms.input", "\nForms.input")]
fn qualify_components(#[case] template: &str, #[case] expected: &str) {
	let mut buffer = EditBuffer::new(template);
	buffer.extend(component_edits(template, DEFAULT_FRAGMENT_TAG));
	assert_eq!(buffer.into_string(), expected);
}

#[rstest]
#[case::blocks(
	"\n{#if a > b}\n\tp yes\n{/if}\n\t{#each items as item}\n{/each}",
	"\n+if(`a > b`)\n\tp yes\n\n\t+each(`items as item`)\n"
)]
#[case::escapes_backticks("\n{@html `x`}", "\n+html(`\\`x\\``)")]
#[case::unknown_closing("\n{/unknown}", "\n{/unknown}")]
#[case::missing_args("\n{#if}", "\n{#if}")]
#[case::not_line_start("\np {#if x}", "\np {#if x}")]
fn rewrite_statements(#[case] template: &str, #[case] expected: &str) {
	let config = ApugConfig::default();
	let mut buffer = EditBuffer::new(template);
	buffer.extend(statement_edits(template, |kind| config.closes_block(kind)));
	assert_eq!(buffer.into_string(), expected);
}

#[test]
fn rewrite_inline_elements() -> ApugResult<()> {
	let template = "\np Click #[a(href=\"/x\") here]\n";
	let mut exports = ExportTable::default();
	let edits = element_edits(template, &mut exports, &ExportNaming::default())?;

	let mut buffer = EditBuffer::new(template);
	buffer.extend(edits);
	assert_eq!(buffer.into_string(), "\np Click #[a( href!=\"/x\") here]\n");

	Ok(())
}

#[test]
fn transform_pre_exports_without_script() -> ApugResult<()> {
	let processed = transform_pre(&pug("\ndiv(export:count=0)\n"), "Counter.svelte")?;

	assert_eq!(
		processed.code,
		"<script>\n;let __export_count__ = 0;\nexport { __export_count__ as count };\n</script>\n<template \
		 lang=\"pug\">\ndiv( count!=`{__export_count__}`)\n</template>"
	);

	Ok(())
}

#[test]
fn transform_pre_components_fragments_and_statements() -> ApugResult<()> {
	let source = "<template lang='pug'>\n\tForms.Input(type=\"text\")\n\t(slot=\"header\")\n{#each items \
	              as item}\n\tp {item}\n{/each}\n</template>";
	let processed = transform_pre(source, "List.svelte")?;

	assert_eq!(
		processed.code,
		"<template lang='pug'>\n\tForms:Input( type!=\"text\")\n\tsvelte:fragment( \
		 slot!=\"header\")\n+each(`items as item`)\n\tp {item}\n\n</template>"
	);

	Ok(())
}

#[test]
fn transform_pre_strips_commented_attributes() -> ApugResult<()> {
	let processed = transform_pre(
		&pug("\na(\n\thref=\"/\"\n\t//- title=\"old\"\n\tclass=\"link\"\n)\n"),
		"Link.svelte",
	)?;

	assert_eq!(
		processed.code,
		pug("\na( href!=\"/\" class!=\"link \")\n")
	);

	Ok(())
}

#[test]
fn transform_pre_leaves_unclosed_attribute_list() -> ApugResult<()> {
	let source = pug("\ndiv(a=1\n");
	assert_eq!(transform_pre(&source, "Broken.svelte")?.code, source);

	Ok(())
}

#[test]
fn transform_pre_keeps_text_outside_region() -> ApugResult<()> {
	let source = format!(
		"<script>\nlet x = 1;\n</script>\n{}\n<style>\na {{ color: red; }}\n</style>",
		pug("\nA.B\n")
	);
	let processed = transform_pre(&source, "Page.svelte")?;

	assert_eq!(
		processed.code,
		format!(
			"<script>\nlet x = 1;\n</script>\n{}\n<style>\na {{ color: red; }}\n</style>",
			pug("\nA:B\n")
		)
	);

	Ok(())
}

#[rstest]
#[case::opening("<Foo:Bar>", "<Foo.Bar>")]
#[case::closing_chain("</Foo:Bar:Baz>", "</Foo.Bar.Baz>")]
#[case::attributes_untouched("<Foo:Bar x=\"a:b\">", "<Foo.Bar x=\"a:b\">")]
#[case::lowercase_qualifier("<Foo:bar>", "<Foo:bar>")]
#[case::lowercase_tag("<div:Foo>", "<div:Foo>")]
#[case::svelte_element("<svelte:fragment>", "<svelte:fragment>")]
fn rewrite_qualified_tags(#[case] content: &str, #[case] expected: &str) {
	assert_eq!(transform_post(content, "App.svelte").code, expected);
}

#[test]
fn transform_post_is_idempotent() {
	let content = "<Forms:Input value={x} />\n<Forms:Group>\n</Forms:Group>";
	let once = transform_post(content, "Form.svelte").code;
	let twice = transform_post(&once, "Form.svelte").code;

	insta::assert_snapshot!(once, @r"
	<Forms.Input value={x} />
	<Forms.Group>
	</Forms.Group>
	");
	assert_eq!(once, twice);
}

#[test]
fn plain_documents_round_trip() -> ApugResult<()> {
	let source = pug("\nmain\n\th1 Title\n\tp Some text\n");

	assert_eq!(transform_pre(&source, "Plain.svelte")?.code, source);
	assert_eq!(transform_post(&source, "Plain.svelte").code, source);

	Ok(())
}

#[test]
#[traced_test]
fn log_missing_template_region() {
	let source = "<div>plain</div>";
	let processed = transform_pre(source, "Plain.svelte")
		.unwrap_or_else(|e| panic!("transform failed: {e}"));

	assert_eq!(processed.code, source);
	assert!(logs_contain("no template region found"));
}

#[test]
fn preprocessor_is_shareable() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<Preprocessor>();
}

#[test]
fn default_config() {
	let config = ApugConfig::default();

	assert_eq!(config.template_lang, "pug");
	assert_eq!(config.fragment_tag, "svelte:fragment");
	assert!(config.closes_block("each"));
	assert!(!config.closes_block("snippet"));
	assert_eq!(config.exports.binding("count"), "__export_count__");
}

#[rstest]
#[case::root("apug.toml")]
#[case::hidden(".apug.toml")]
#[case::config_dir(".config/apug.toml")]
fn load_config_candidates(#[case] candidate: &str) -> ApugResult<()> {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	let path = tmp.path().join(candidate);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(&path, "template_lang = \"jade\"\n\n[exports]\nprefix = \"__prop_\"\n")?;

	let config = ApugConfig::load(tmp.path())?;
	let config = config.unwrap_or_else(|| panic!("config should load from {candidate}"));

	assert_eq!(config.template_lang, "jade");
	assert_eq!(config.fragment_tag, DEFAULT_FRAGMENT_TAG);
	assert_eq!(config.exports.prefix, "__prop_");
	assert_eq!(config.exports.suffix, "__");

	Ok(())
}

#[test]
fn load_config_missing_file() -> ApugResult<()> {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	assert_eq!(ApugConfig::load(tmp.path())?, None);

	Ok(())
}

#[test]
fn parse_invalid_config() {
	let result = ApugConfig::parse("template_lang = [");
	assert!(matches!(result, Err(ApugError::ConfigParse(_))));
}

#[test]
fn preprocessor_uses_configured_names() -> ApugResult<()> {
	let config = ApugConfig::parse(
		"template_lang = \"jade\"\nfragment_tag = \"slot\"\nclosing_blocks = [\"if\"]\n\n[exports]\nprefix \
		 = \"__prop_\"\n",
	)?;
	let preprocessor = Preprocessor::new(config);
	let source = "<template lang=\"jade\">\ndiv(export:x)\n(name=\"a\")\n{/each}\n</template>";

	assert_eq!(
		preprocessor.pre(source, "Custom.svelte")?.code,
		"<script>\n;let __prop_x__;\nexport { __prop_x__ as x };\n</script>\n<template \
		 lang=\"jade\">\ndiv( x)\nslot( name!=\"a\")\n{/each}\n</template>"
	);

	Ok(())
}
