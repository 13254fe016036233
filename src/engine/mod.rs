//! The external documentation engine.
//!
//! The render pipeline talks to the engine through [`RenderEngine`], one synchronous build per
//! docstring. [`SphinxBuild`] drives the real `sphinx-build`; tests substitute their own engine.

/// Engine configuration directories (`conf.py` and templates).
pub mod conf;
mod sphinx;

use std::path::{Path, PathBuf};

pub use self::sphinx::SphinxBuild;
use crate::render::OutputFormat;

/// Extension that lets scientific docstrings use autosummary tables.
pub const AUTOSUMMARY_EXTENSION: &str = "sphinx.ext.autosummary";
/// Extension that emits math for MathJax.
pub const MATHJAX_EXTENSION: &str = "sphinx.ext.mathjax";
/// Extension that executes `.. plot::` directives.
pub const PLOT_EXTENSION: &str = "matplotlib.sphinxext.plot_directive";

/// Everything one engine build needs.
#[derive(Debug, Clone)]
pub struct BuildRequest<'a> {
	/// Directory holding the source document.
	pub source_dir: &'a Path,
	/// The document to build.
	pub source_file: &'a Path,
	/// Directory holding `conf.py`.
	pub conf_dir: &'a Path,
	/// Directory the output is written to.
	pub dest_dir: &'a Path,
	/// Directory for the engine's pickled doctrees.
	pub doctree_dir: PathBuf,
	/// Requested output.
	pub format: OutputFormat,
	/// Values exposed to the engine's page templates.
	pub context: Vec<(String, String)>,
	/// Extensions to enable, replacing the configured list.
	pub extensions: Vec<String>,
}

impl BuildRequest<'_> {
	/// Where a successful build leaves its output.
	pub fn expected_output(&self) -> PathBuf {
		let stem = self
			.source_file
			.file_stem()
			.unwrap_or_else(|| self.source_file.as_os_str());
		self.dest_dir
			.join(stem)
			.with_extension(self.format.extension())
	}

	/// Look up a context value by key.
	pub fn context_value(&self, key: &str) -> Option<&str> {
		self.context
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}
}

/// Failure of a single engine build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	/// The engine ran and reported an error.
	#[error("documentation build failed ({status}): {stderr}")]
	Failed {
		/// Exit status description.
		status: String,
		/// Captured diagnostics.
		stderr: String,
	},
	/// The engine could not be started.
	#[error("failed to start documentation engine: {0}")]
	Spawn(#[from] std::io::Error),
}

/// A documentation engine turning one reStructuredText file into HTML or text.
pub trait RenderEngine {
	/// Build `request.source_file` and return the output file path.
	///
	/// A returned path is not guaranteed to exist; callers check.
	fn build_once(&self, request: &BuildRequest<'_>) -> Result<PathBuf, BuildError>;

	/// Whether plot directives can be executed.
	fn supports_plots(&self) -> bool {
		false
	}
}

impl<E: RenderEngine + ?Sized> RenderEngine for &E {
	fn build_once(&self, request: &BuildRequest<'_>) -> Result<PathBuf, BuildError> {
		(**self).build_once(request)
	}

	fn supports_plots(&self) -> bool {
		(**self).supports_plots()
	}
}

/// Extensions enabled for a build.
pub fn extensions(render_math: bool, plots: bool) -> Vec<String> {
	let mut extensions = vec![AUTOSUMMARY_EXTENSION.to_string()];
	if render_math {
		extensions.push(MATHJAX_EXTENSION.to_string());
	}
	if plots {
		extensions.push(PLOT_EXTENSION.to_string());
	}
	extensions
}
