use crate::Span;

/// Tag that ends the template region.
pub const TEMPLATE_CLOSE: &str = "</template>";

/// Locate the content of the `<template lang="{lang}">` region.
///
/// Both quote styles are accepted for the `lang` attribute; the earliest
/// opening tag wins. The returned span starts right after the opening tag and
/// ends at the first following [`TEMPLATE_CLOSE`]. Returns `None` when either
/// tag is missing.
pub fn find_template_region(content: &str, lang: &str) -> Option<Span> {
	let openings = [
		format!("<template lang=\"{lang}\">"),
		format!("<template lang='{lang}'>"),
	];

	let (index, opening) = openings
		.iter()
		.filter_map(|opening| content.find(opening.as_str()).map(|index| (index, opening)))
		.min_by_key(|(index, _)| *index)?;

	let begins = index + opening.len();
	let ends = begins + content[begins..].find(TEMPLATE_CLOSE)?;

	Some(Span::new(begins, ends))
}
