//! `apug_core` expands a terse pug shorthand for Svelte components into the
//! dialect understood by the pug renderer, and fixes up the rendered output
//! afterwards. The host calls it twice around its own template transform.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Component source
//!   → Template locator (finds the `<template lang="pug">` region)
//!   → Component qualifier (`Forms.Input` → `Forms:Input`, `(` → `svelte:fragment(`)
//!   → Element walker (attribute lists → scanner → directive rewriter → exports)
//!   → Statement rewriter (`{#if a}` → `+if(`a`)`, `{/if}` removed)
//!   → Export injection (declares and exports collected bindings in `<script>`)
//! Rendered markup
//!   → Tag namespace rewriter (`<Forms:Input>` → `<Forms.Input>`)
//! ```
//!
//! ## Shorthand
//!
//! - `:name` after `class` adds `name` when its condition (default: `name`) is
//!   truthy.
//! - `:prop` after `style` and any `--var` become style declarations.
//! - `export:name=value` exports `name` as a component property defaulting to
//!   `value`.
//! - `//-` inside an attribute list comments out the rest of the line and any
//!   more deeply indented lines.
//!
//! ## Quick Start
//!
//! ```rust
//! use apug_core::transform_post;
//! use apug_core::transform_pre;
//!
//! let source = "<template lang=\"pug\">\nForms.Input(export:value=\"\")\n</template>";
//! let processed = transform_pre(source, "Input.svelte").unwrap();
//! assert!(processed.code.contains("Forms:Input("));
//! assert!(processed.code.contains("export { __export_value__ as value };"));
//!
//! let rendered = transform_post("<Forms:Input value={x} />", "Input.svelte");
//! assert_eq!(rendered.code, "<Forms.Input value={x} />");
//! ```

pub use attributes::*;
pub use config::*;
pub use delimiter::*;
pub use directives::*;
pub use edit_buffer::*;
pub use elements::*;
pub use engine::*;
pub use error::*;
pub use exports::*;
pub use namespace::*;
pub use statements::*;
pub use template::*;

mod attributes;
pub mod config;
mod delimiter;
mod directives;
mod edit_buffer;
mod elements;
mod engine;
#[allow(unused_assignments)]
mod error;
mod exports;
pub(crate) mod lexer;
mod namespace;
mod statements;
mod template;

#[cfg(test)]
mod __tests;
