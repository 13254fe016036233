//! Variables handed to the page template and to the engine's HTML context.

use std::path::Path;

use url::Url;

use super::options::RenderOptions;
use crate::oinfo::{ObjectInfo, TemplateSeed};

/// Base URL MathJax is loaded from unless a local copy is requested.
pub const MATHJAX_CDN: &str = "https://cdn.jsdelivr.net/npm/mathjax@2";

/// Tokens wrapped in a highlight span inside the argument spec, in replacement order.
///
/// Each replacement runs over the output of the previous one. Once `*` has been wrapped a literal
/// `**` no longer occurs, so the last entry never matches and each star is highlighted alone.
pub const HIGHLIGHTED_TOKENS: [&str; 6] = ["=", ",", "(", ")", "*", "**"];

/// Path fragments marking third-party install locations.
const LIBRARY_DIRS: [&str; 3] = ["site-packages", "dist-packages", "pymodules"];

/// Presentation flags shared by every template of one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVars {
	/// Whether MathJax is loaded.
	pub math_on: bool,
	/// Base URL of MathJax.
	pub mathjax_path: String,
	/// Whether sections start collapsed.
	pub collapse: bool,
	/// Whether the legacy Qt4 tweaks apply.
	pub use_qt4: bool,
	/// Whether the outline is shown.
	pub outline: bool,
	/// Host platform in Python's `sys.platform` spelling.
	pub platform: &'static str,
}

impl GlobalVars {
	/// Copy the flags out of `options`.
	///
	/// A local MathJax copy is looked up under `asset_dir/js/mathjax`. When that directory does not
	/// exist the CDN is used instead, so the page never points at a missing script.
	pub fn new(options: &RenderOptions, asset_dir: &Path) -> Self {
		let mathjax_path = if options.local_mathjax {
			local_mathjax(asset_dir).unwrap_or_else(|| MATHJAX_CDN.to_string())
		} else {
			MATHJAX_CDN.to_string()
		};

		Self {
			math_on: options.render_math,
			mathjax_path,
			collapse: options.collapse_sections,
			use_qt4: options.use_qt4,
			outline: options.outline,
			platform: python_platform(),
		}
	}

	/// Key/value pairs for the engine's HTML context. Flags are `"true"` or empty.
	pub fn context(&self) -> Vec<(String, String)> {
		vec![
			("math_on".to_string(), flag(self.math_on)),
			("mathjax_path".to_string(), self.mathjax_path.clone()),
			("platform".to_string(), self.platform.to_string()),
			("collapse".to_string(), flag(self.collapse)),
			("use_qt4".to_string(), flag(self.use_qt4)),
			("outline".to_string(), flag(self.outline)),
		]
	}
}

fn local_mathjax(asset_dir: &Path) -> Option<String> {
	let dir = asset_dir.join("js").join("mathjax");
	if !dir.is_dir() {
		tracing::debug!(dir = %dir.display(), "no local MathJax copy, using the CDN");
		return None;
	}
	Url::from_directory_path(&dir)
		.ok()
		.map(|url| url.as_str().trim_end_matches('/').to_string())
}

fn flag(enabled: bool) -> String {
	if enabled { "true".to_string() } else { String::new() }
}

fn python_platform() -> &'static str {
	match std::env::consts::OS {
		"macos" => "darwin",
		"windows" => "win32",
		other => other,
	}
}

/// Everything the rich page template renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
	/// Object name.
	pub name: String,
	/// Argument spec; escaped and highlighted before the page is rendered.
	pub argspec: String,
	/// Kind label.
	pub note: String,
	/// Processed main docstring.
	pub docstring: String,
	/// Processed class docstring, or empty.
	pub class_docstring: String,
	/// Link into the Python standard library docs, or empty.
	pub docs_link: String,
	/// Presentation flags.
	pub globals: GlobalVars,
}

impl TemplateVars {
	/// Seed the variables from the object header; docstrings start out empty.
	pub fn new(seed: TemplateSeed, globals: GlobalVars) -> Self {
		Self {
			name: seed.name,
			argspec: seed.argspec,
			note: seed.note,
			docstring: String::new(),
			class_docstring: String::new(),
			docs_link: String::new(),
			globals,
		}
	}
}

/// HTML-escape `argspec` and wrap its punctuation in highlight spans.
pub fn highlight_argspec(argspec: &str) -> String {
	let mut highlighted = html_escape::encode_text(argspec).into_owned();
	for token in HIGHLIGHTED_TOKENS {
		highlighted =
			highlighted.replace(token, &format!(r#"<span class="argspec-highlight">{token}</span>"#));
	}
	highlighted
}

/// Guess the docs.python.org entry for objects defined outside third-party library directories.
///
/// The module is the source file's base name up to its first dot. The link is not verified.
pub fn python_docs_link(oinfo: &ObjectInfo) -> String {
	let Some(file) = oinfo.file.as_deref().filter(|f| !f.is_empty()) else {
		return String::new();
	};
	if LIBRARY_DIRS.iter().any(|dir| file.contains(dir)) {
		return String::new();
	}

	let base = Path::new(file)
		.file_name()
		.and_then(|name| name.to_str())
		.unwrap_or(file);
	let module = base.split('.').next().unwrap_or(base);
	format!(
		"https://docs.python.org/3/library/{module}.html#{module}.{}",
		oinfo.name_or_empty()
	)
}
