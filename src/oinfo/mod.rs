//! Typed view of an introspected Python object.
//!
//! Introspectors such as IPython's `Inspector().info(obj)` produce a loose mapping with optional
//! keys. [`ObjectInfo`] gives that mapping a fixed shape with documented defaults, and
//! [`ObjectInfo::template_seed`] turns it into the name, argument spec and kind label shown in the
//! page header.

mod argspec;
/// Heuristic signature scraping over free-form documentation text.
pub mod signature;

use serde::Deserialize;

pub use self::argspec::{ArgSpec, Defaults, python_repr};
pub use self::signature::recover_signature;

/// Docstring value introspectors emit for objects without documentation.
pub const NO_DOCSTRING: &str = "<no docstring>";

/// Argument spec shown when a structured argspec is malformed and nothing could be recovered.
pub const UNKNOWN_ARGSPEC: &str = "(...)";

/// Whether `docstring` carries actual documentation.
pub fn is_documented(docstring: Option<&str>) -> bool {
	matches!(docstring, Some(doc) if !doc.is_empty() && doc != NO_DOCSTRING)
}

/// Metadata describing one introspected symbol.
///
/// Unknown keys are ignored so a raw introspector record can be deserialized directly. Every field
/// is optional; `null` and a missing key mean the same thing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObjectInfo {
	/// Name the object was looked up under.
	pub name: Option<String>,
	/// Raw docstring, possibly the [`NO_DOCSTRING`] sentinel.
	pub docstring: Option<String>,
	/// Kind label such as `function`, `method` or a class name for instances.
	pub type_name: Option<String>,
	/// Structured parameter description; absent when it could not be extracted.
	pub argspec: Option<ArgSpec>,
	/// Formatted call signature, e.g. `run(*popenargs, **kwargs)`.
	pub definition: Option<String>,
	/// Constructor signature for classes.
	pub init_definition: Option<String>,
	/// Docstring of the object's class, for instances.
	pub class_docstring: Option<String>,
	/// Source file the object was defined in.
	pub file: Option<String>,
}

/// Header fields derived from an [`ObjectInfo`] before any markup processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSeed {
	/// Object name, empty when unknown.
	pub name: String,
	/// Formatted argument list including parentheses, or empty.
	pub argspec: String,
	/// One-line kind label.
	pub note: String,
}

impl ObjectInfo {
	/// Start a record for an object called `name`.
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}

	/// Set the raw docstring.
	pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
		self.docstring = Some(docstring.into());
		self
	}

	/// Set the kind label.
	pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
		self.type_name = Some(type_name.into());
		self
	}

	/// Set the structured argument spec.
	pub fn with_argspec(mut self, argspec: ArgSpec) -> Self {
		self.argspec = Some(argspec);
		self
	}

	/// Set the formatted definition.
	pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
		self.definition = Some(definition.into());
		self
	}

	/// Set the class docstring.
	pub fn with_class_docstring(mut self, docstring: impl Into<String>) -> Self {
		self.class_docstring = Some(docstring.into());
		self
	}

	/// Set the source file path.
	pub fn with_file(mut self, file: impl Into<String>) -> Self {
		self.file = Some(file.into());
		self
	}

	/// Parse a record from introspector JSON.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	/// Object name, or the empty string.
	pub fn name_or_empty(&self) -> &str {
		self.name.as_deref().unwrap_or_default()
	}

	/// Whether the record has a non-empty class docstring.
	pub fn has_class_docstring(&self) -> bool {
		self.class_docstring.as_deref().is_some_and(|doc| !doc.is_empty())
	}

	/// Compute the header fields shown above the rendered docstring.
	///
	/// A structured argspec is formatted with a leading `self` removed. When the argspec is
	/// missing the docstring is scanned for a signature; when it is present but has no positional
	/// parameter list the scan result falls back to [`UNKNOWN_ARGSPEC`].
	pub fn template_seed(&self) -> TemplateSeed {
		let argspec = match &self.argspec {
			None => recover_signature(self.docstring.as_deref(), self.name.as_deref()),
			Some(spec) => match spec.format_without_self() {
				Some(formatted) => formatted,
				None => {
					let recovered =
						recover_signature(self.docstring.as_deref(), self.name.as_deref());
					if recovered.is_empty() {
						UNKNOWN_ARGSPEC.to_string()
					} else {
						recovered
					}
				}
			},
		};

		TemplateSeed {
			name: self.name_or_empty().to_string(),
			argspec,
			note: self.type_name.clone().unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn spec(args: &[&str]) -> ArgSpec {
		ArgSpec {
			args: Some(args.iter().map(|a| a.to_string()).collect()),
			..ArgSpec::default()
		}
	}

	#[test]
	fn empty_record_yields_empty_seed() {
		assert_eq!(ObjectInfo::default().template_seed(), TemplateSeed::default());
	}

	#[test]
	fn self_is_dropped_from_structured_argspec() {
		let info = ObjectInfo::named("area").with_argspec(spec(&["self", "width", "height"]));
		assert_eq!(info.template_seed().argspec, "(width, height)");
	}

	#[test]
	fn parameters_without_self_are_kept_in_order() {
		let info = ObjectInfo::named("area").with_argspec(spec(&["width", "height", "depth"]));
		assert_eq!(info.template_seed().argspec, "(width, height, depth)");
	}

	#[test]
	fn malformed_argspec_falls_back_to_docstring() {
		let info = ObjectInfo::named("Foo")
			.with_argspec(ArgSpec::default())
			.with_docstring("Foo(a, b)\n\nBuild a foo.");
		assert_eq!(info.template_seed().argspec, "(a, b)");
	}

	#[test]
	fn malformed_argspec_without_signature_uses_placeholder() {
		let info = ObjectInfo::named("Foo")
			.with_argspec(ArgSpec::default())
			.with_docstring("A test");
		assert_eq!(info.template_seed().argspec, UNKNOWN_ARGSPEC);
	}

	#[test]
	fn missing_argspec_scans_docstring_or_stays_empty() {
		let found = ObjectInfo::named("sin").with_docstring("sin(x, /, out=None)\n\nTrig.");
		assert_eq!(found.template_seed().argspec, "(x, /, out=None)");

		let missing = ObjectInfo::named("sin").with_docstring("Trigonometric sine.");
		assert_eq!(missing.template_seed().argspec, "");
	}

	#[test]
	fn note_mirrors_type_name() {
		let info = ObjectInfo::named("Foo").with_type_name("Function");
		let seed = info.template_seed();
		assert_eq!(seed.name, "Foo");
		assert_eq!(seed.note, "Function");
	}

	#[test]
	fn deserializes_introspector_json() {
		let info = ObjectInfo::from_json(
			r#"{
				"name": "run",
				"docstring": "Run command with arguments.",
				"type_name": "function",
				"argspec": {"args": ["args"], "varargs": null, "varkw": "kwargs", "defaults": null},
				"found": true,
				"ismagic": false
			}"#,
		)
		.unwrap();
		assert_eq!(info.name.as_deref(), Some("run"));
		assert_eq!(info.template_seed().argspec, "(args, **kwargs)");
	}

	#[test]
	fn sentinel_docstring_is_not_documentation() {
		assert!(!is_documented(None));
		assert!(!is_documented(Some("")));
		assert!(!is_documented(Some(NO_DOCSTRING)));
		assert!(is_documented(Some("A test")));
	}
}
