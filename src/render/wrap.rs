//! Wrap structured docstrings in a Python-domain directive.
//!
//! Sphinx only resolves `:param:`/`:return:` field lists into a parameter table when they sit
//! inside a `py:function` (or similar) declaration. Narrative docstrings are left untouched so
//! they render as plain prose.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::oinfo::{NO_DOCSTRING, ObjectInfo};

/// Indentation applied to the docstring body under the directive.
const BODY_INDENT: &str = "   ";

/// Declaration kinds Sphinx's Python domain accepts as-is; everything else is declared a class.
const LEAF_KINDS: [&str; 5] = ["function", "method", "property", "attribute", "module"];

static FIELD_LIST: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"\n\s*(?::param |:return: |:raise )").expect("field list pattern is valid")
});
static OPEN_PAREN_BREAK: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\(\n\s*").expect("open paren pattern is valid"));
static TRAILING_COMMA_CLOSE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r",\n\s*\)").expect("trailing comma pattern is valid"));
static COMMA_BREAK: Lazy<Regex> =
	Lazy::new(|| Regex::new(r",\n\s*").expect("comma break pattern is valid"));

/// Whether `docstring` uses Sphinx-style `:param`, `:return:` or `:raise` fields.
pub fn is_sphinx_markup(docstring: &str) -> bool {
	FIELD_LIST.is_match(docstring)
}

/// Wrap `docstring` in a `.. py:<kind>:: <name><definition>` directive.
///
/// The docstring comes back unchanged unless it is documented, uses field-list markup and both
/// `name` and `type_name` are non-empty. Introspectors usually format `definition` as
/// `name(args)`; a leading `name` is dropped so it is not declared twice.
pub fn wrap_docstring<'a>(
	docstring: &'a str,
	name: Option<&str>,
	type_name: Option<&str>,
	definition: Option<&str>,
) -> Cow<'a, str> {
	let (Some(name), Some(type_name)) = (
		name.filter(|n| !n.is_empty()),
		type_name.filter(|t| !t.is_empty()),
	) else {
		return Cow::Borrowed(docstring);
	};
	if docstring.is_empty() || docstring == NO_DOCSTRING || !is_sphinx_markup(docstring) {
		return Cow::Borrowed(docstring);
	}

	let kind = type_name.to_ascii_lowercase();
	let kind = if LEAF_KINDS.contains(&kind.as_str()) {
		kind
	} else {
		"class".to_string()
	};
	let definition = definition
		.map(|d| {
			let args = d
				.strip_prefix(name)
				.filter(|rest| rest.starts_with('('))
				.unwrap_or(d);
			collapse_definition(args)
		})
		.unwrap_or_default();

	Cow::Owned(format!(
		"\n.. py:{kind}:: {name}{definition}\n\n{}\n",
		indent(docstring, BODY_INDENT)
	))
}

/// Wrap the object's own docstring, declaring it with its definition or constructor signature.
pub fn wrap_main_docstring(oinfo: &ObjectInfo) -> Cow<'_, str> {
	let definition = oinfo
		.definition
		.as_deref()
		.filter(|d| !d.is_empty())
		.or(oinfo.init_definition.as_deref());

	wrap_docstring(
		oinfo.docstring.as_deref().unwrap_or_default(),
		oinfo.name.as_deref(),
		oinfo.type_name.as_deref(),
		definition,
	)
}

/// Wrap the docstring of an instance's class, or `None` when there is none.
///
/// For instances the introspector reports the class name as `type_name`, so that is the name the
/// class is declared under.
pub fn wrap_class_docstring(oinfo: &ObjectInfo) -> Option<Cow<'_, str>> {
	let docstring = oinfo.class_docstring.as_deref().filter(|d| !d.is_empty())?;
	Some(wrap_docstring(
		docstring,
		oinfo.type_name.as_deref(),
		Some("class"),
		None,
	))
}

/// Collapse a formatted, possibly multi-line signature onto one line.
pub fn collapse_definition(definition: &str) -> String {
	let collapsed = OPEN_PAREN_BREAK.replace_all(definition, "(");
	let collapsed = TRAILING_COMMA_CLOSE.replace_all(&collapsed, ")");
	let collapsed = COMMA_BREAK.replace_all(&collapsed, ", ");
	collapsed.replace('\n', " ")
}

/// Prefix every line that is not whitespace-only, keeping line endings.
fn indent(text: &str, prefix: &str) -> String {
	let mut out = String::with_capacity(text.len() + prefix.len() * 8);
	for line in text.split_inclusive('\n') {
		if !line.trim().is_empty() {
			out.push_str(prefix);
		}
		out.push_str(line);
	}
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const STRUCTURED: &str = "Add two numbers.\n\n:param a: first\n:param b: second\n:return: the sum\n:raise TypeError: on bad input\n";

	#[test]
	fn structured_docstring_is_wrapped_as_function() {
		let wrapped = wrap_docstring(STRUCTURED, Some("Foo"), Some("Function"), None);
		let first = wrapped.lines().find(|l| !l.trim().is_empty()).unwrap();
		assert_eq!(first, ".. py:function:: Foo");
		assert!(wrapped.contains("\n   :param a: first\n"));
		assert!(wrapped.contains("\n\n   Add two numbers.\n"));
	}

	#[test]
	fn narrative_docstring_is_returned_unchanged() {
		let doc = "Add two numbers.\n\nReturns their sum.";
		let wrapped = wrap_docstring(doc, Some("Foo"), Some("Function"), None);
		assert!(matches!(wrapped, Cow::Borrowed(_)));
		assert_eq!(wrapped, doc);
	}

	#[test]
	fn missing_metadata_skips_wrapping() {
		assert_eq!(wrap_docstring(STRUCTURED, None, Some("function"), None), STRUCTURED);
		assert_eq!(wrap_docstring(STRUCTURED, Some("Foo"), Some(""), None), STRUCTURED);
		assert_eq!(wrap_docstring(NO_DOCSTRING, Some("Foo"), Some("function"), None), NO_DOCSTRING);
	}

	#[test]
	fn unknown_kinds_become_classes() {
		let wrapped = wrap_docstring(STRUCTURED, Some("df"), Some("DataFrame"), None);
		assert!(wrapped.starts_with("\n.. py:class:: df\n\n"));
	}

	#[test]
	fn definition_is_collapsed_onto_the_directive_line() {
		let definition = "(\n    a,\n    b=2,\n)";
		let wrapped = wrap_docstring(STRUCTURED, Some("add"), Some("method"), Some(definition));
		assert!(wrapped.starts_with("\n.. py:method:: add(a, b=2)\n\n"));
	}

	#[test]
	fn collapse_handles_each_break_shape() {
		assert_eq!(collapse_definition("f(\n  x,\n  y)"), "f(x, y)");
		assert_eq!(collapse_definition("f(x,\n)"), "f(x)");
		assert_eq!(collapse_definition("f(x)\n-> int"), "f(x) -> int");
	}

	#[test]
	fn main_docstring_prefers_definition_over_init_definition() {
		let mut oinfo = ObjectInfo::named("Point")
			.with_type_name("function")
			.with_docstring(STRUCTURED)
			.with_definition("Point(x, y)");
		oinfo.init_definition = Some("Point(self, x, y)".into());
		assert!(wrap_main_docstring(&oinfo).contains(".. py:function:: Point(x, y)\n"));

		oinfo.definition = None;
		assert!(wrap_main_docstring(&oinfo).contains(".. py:function:: Point(self, x, y)\n"));
	}

	#[test]
	fn class_docstring_is_declared_under_the_type_name() {
		let oinfo = ObjectInfo::named("frame")
			.with_type_name("DataFrame")
			.with_class_docstring(STRUCTURED);
		let wrapped = wrap_class_docstring(&oinfo).unwrap();
		assert!(wrapped.starts_with("\n.. py:class:: DataFrame\n\n"));

		assert!(wrap_class_docstring(&ObjectInfo::named("frame")).is_none());
	}

	#[test]
	fn blank_lines_are_not_indented() {
		assert_eq!(indent("a\n\n  \nb", "   "), "   a\n\n  \n   b");
	}
}
