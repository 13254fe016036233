use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;

use super::options::{OutputFormat, RenderOptions};
use super::templates::{
	NO_DOCUMENTATION, PlainReprPage, RICH_HELP_UNAVAILABLE, RichReprPage, warning,
};
use super::vars::{GlobalVars, TemplateVars, highlight_argspec, python_docs_link};
use super::wrap::{wrap_class_docstring, wrap_main_docstring};
use crate::core_api::Result;
use crate::engine::conf::ConfDir;
use crate::engine::{BuildRequest, RenderEngine, extensions};
use crate::oinfo::{ObjectInfo, is_documented};
use crate::scratch::merge_directories;

/// Name of the reStructuredText file written into the scratch directory.
pub const SOURCE_FILE_NAME: &str = "docstring.rst";

/// Base name of the assembled page inside the scratch directory.
pub const OUTPUT_FILE_STEM: &str = "rich_repr_output";

/// Where a pass gets its engine configuration from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfSource {
	/// Reuse (and lazily generate) the configuration in this directory.
	Shared(PathBuf),
	/// Generate a throwaway configuration for every pass.
	Temporary,
}

/// One render request's view of the engine, options and configuration.
pub struct Renderer<'a, E: RenderEngine> {
	/// Engine each docstring pass is built with.
	pub engine: &'a E,
	/// Options of this request.
	pub options: &'a RenderOptions,
	/// Configuration directory policy.
	pub conf: ConfSource,
	/// Directory local assets such as MathJax are loaded from.
	pub asset_dir: PathBuf,
}

impl<E: RenderEngine> Renderer<'_, E> {
	fn globals(&self) -> GlobalVars {
		GlobalVars::new(self.options, &self.asset_dir)
	}

	/// Run the engine over one docstring inside `srcdir` and return the processed markup.
	///
	/// Build failures and missing output are replaced by a warning fragment. Filesystem errors
	/// around the build propagate.
	pub fn sphinxify(&self, docstring: &str, srcdir: &Path, format: OutputFormat) -> Result<String> {
		let documented = is_documented(Some(docstring));
		let mut source = if documented {
			docstring.to_string()
		} else {
			String::new()
		};
		// LaTeX line breaks inside raw docstrings must survive reST unescaping.
		if self.options.render_math {
			source = source.replace(r"\\", r"\\\\");
		}

		let mut context = self.globals().context();
		if !documented {
			context.push(("warning".to_string(), "true".to_string()));
			context.push(("warn_message".to_string(), NO_DOCUMENTATION.to_string()));
		}

		let source_file = srcdir.join(SOURCE_FILE_NAME);
		fs::write(&source_file, &source)?;

		let conf = match &self.conf {
			ConfSource::Shared(dir) => ConfDir::shared(dir.clone())?,
			ConfSource::Temporary => ConfDir::temporary()?,
		};
		let dest = tempfile::Builder::new()
			.prefix("richdoc-build-")
			.tempdir()?;

		let request = BuildRequest {
			source_dir: srcdir,
			source_file: &source_file,
			conf_dir: conf.as_path(),
			dest_dir: dest.path(),
			doctree_dir: srcdir.join("doctrees"),
			format,
			context,
			extensions: extensions(self.options.render_math, self.engine.supports_plots()),
		};

		let output_path = match self.engine.build_once(&request) {
			Ok(path) => path,
			Err(err) => {
				tracing::warn!(%err, "docstring build failed");
				return Ok(warning(RICH_HELP_UNAVAILABLE, format)?);
			}
		};

		let output = if output_path.is_file() {
			let built = fs::read_to_string(&output_path)?
				.replace("<pre>", r#"<pre class="literal-block">"#);
			// The text builder has no layout template, so the notice is added here.
			if !documented && format == OutputFormat::Text {
				warning(NO_DOCUMENTATION, format)? + &built
			} else {
				built
			}
		} else {
			tracing::warn!(path = %output_path.display(), "build reported success without output");
			warning(RICH_HELP_UNAVAILABLE, format)?
		};

		// Generated images are referenced relative to the page, which lives in `srcdir`.
		merge_directories(dest.path(), srcdir)?;
		Ok(output)
	}

	/// Render the full page for `oinfo` into `srcdir` and return the written file.
	pub fn rich_repr(&self, oinfo: &ObjectInfo, srcdir: &Path, format: OutputFormat) -> Result<PathBuf> {
		let mut vars = TemplateVars::new(oinfo.template_seed(), self.globals());

		vars.docstring = self.sphinxify(&wrap_main_docstring(oinfo), srcdir, format)?;
		if let Some(class_docstring) = wrap_class_docstring(oinfo) {
			vars.class_docstring = self.sphinxify(&class_docstring, srcdir, format)?;
		}
		vars.docs_link = python_docs_link(oinfo);

		let page = match format {
			OutputFormat::Html => {
				vars.argspec = highlight_argspec(&vars.argspec);
				RichReprPage { vars: &vars }.render()?
			}
			OutputFormat::Text => PlainReprPage { vars: &vars }.render()?,
		};

		let path = srcdir
			.join(OUTPUT_FILE_STEM)
			.with_extension(format.extension());
		fs::write(&path, page)?;
		tracing::debug!(path = %path.display(), name = %vars.name, "wrote rich page");
		Ok(path)
	}
}
