use askama::Template;

use super::options::OutputFormat;
use super::vars::TemplateVars;

/// Notice shown when a docstring could not be processed.
pub const RICH_HELP_UNAVAILABLE: &str = "It was not possible to get rich help for this object";

/// Notice shown when an object has no docstring.
pub const NO_DOCUMENTATION: &str = "No documentation available";

/// Final HTML page.
#[derive(Template)]
#[template(path = "rich_repr.html")]
pub struct RichReprPage<'a> {
	/// Assembled variables; `argspec` is already highlighted.
	pub vars: &'a TemplateVars,
}

/// Final plain-text page.
#[derive(Template)]
#[template(path = "rich_repr.txt")]
pub struct PlainReprPage<'a> {
	/// Assembled variables.
	pub vars: &'a TemplateVars,
}

#[derive(Template)]
#[template(path = "warning.html")]
struct WarningHtml<'a> {
	text: &'a str,
}

#[derive(Template)]
#[template(path = "warning.txt")]
struct WarningText<'a> {
	text: &'a str,
}

/// Render a warning fragment standing in for a docstring.
pub fn warning(message: &str, format: OutputFormat) -> askama::Result<String> {
	match format {
		OutputFormat::Html => WarningHtml { text: message }.render(),
		OutputFormat::Text => WarningText { text: message }.render(),
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::*;
	use crate::oinfo::ObjectInfo;
	use crate::render::options::RenderOptions;
	use crate::render::vars::GlobalVars;

	fn vars() -> TemplateVars {
		let seed = ObjectInfo::named("Foo<T>").with_type_name("function").template_seed();
		let mut vars = TemplateVars::new(
			seed,
			GlobalVars::new(&RenderOptions::default(), Path::new("/tmp")),
		);
		vars.docstring = "<p>A test</p>".to_string();
		vars
	}

	#[test]
	fn page_escapes_name_but_keeps_processed_markup() {
		let page = RichReprPage { vars: &vars() }.render().unwrap();
		assert!(page.contains("Foo&lt;T&gt;"));
		assert!(page.contains("<p>A test</p>"));
		assert!(page.contains("MathJax.js"));
		assert!(!page.contains("class-docstring\">"));
	}

	#[test]
	fn math_script_follows_flag() {
		let mut vars = vars();
		vars.globals.math_on = false;
		let page = RichReprPage { vars: &vars }.render().unwrap();
		assert!(!page.contains("MathJax.js"));
	}

	#[test]
	fn collapsed_sections_can_be_expanded() {
		let mut vars = vars();
		let page = RichReprPage { vars: &vars }.render().unwrap();
		assert!(!page.contains("classList.toggle(\"expanded\")"));

		vars.globals.collapse = true;
		let page = RichReprPage { vars: &vars }.render().unwrap();
		assert!(page.contains(r#"<body class="#));
		assert!(page.contains(" collapse"));
		assert!(page.contains("classList.toggle(\"expanded\")"));
		assert!(page.contains(".section:not(.expanded)"));
	}

	#[test]
	fn plain_page_is_not_escaped() {
		let page = PlainReprPage { vars: &vars() }.render().unwrap();
		assert!(page.starts_with("Foo<T>\nfunction\n"));
	}

	#[test]
	fn warning_fragment_carries_message() {
		let html = warning(RICH_HELP_UNAVAILABLE, OutputFormat::Html).unwrap();
		assert_eq!(html.trim(), format!(r#"<div class="warning">{RICH_HELP_UNAVAILABLE}</div>"#));
		let text = warning(NO_DOCUMENTATION, OutputFormat::Text).unwrap();
		assert!(text.contains(NO_DOCUMENTATION));
	}
}
