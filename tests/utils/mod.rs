//! Shared helpers for integration tests: a scripted engine standing in for Sphinx.
#![allow(dead_code)]

use std::cell::{Ref, RefCell};
use std::fs;
use std::path::PathBuf;

use richdoc::{BuildError, BuildRequest, OutputFormat, RenderEngine, RichDoc};
use tempfile::TempDir;

/// What the fake engine does when asked to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// Write an output file derived from the source.
	Render,
	/// Report a build error.
	Fail,
	/// Report success without writing anything.
	NoOutput,
}

/// One recorded `build_once` call.
#[derive(Debug, Clone)]
pub struct RecordedBuild {
	pub source: String,
	pub conf_dir: PathBuf,
	pub format: OutputFormat,
	pub context: Vec<(String, String)>,
	pub extensions: Vec<String>,
}

impl RecordedBuild {
	pub fn context_value(&self, key: &str) -> Option<&str> {
		self.context
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}
}

/// Engine that mimics the page layout: a warning block when the context asks for one, then the
/// source text inside a `<pre>` block. Like the real text builder, text builds ignore the context
/// and copy the source verbatim.
#[derive(Debug)]
pub struct FakeEngine {
	outcome: Outcome,
	plots: bool,
	builds: RefCell<Vec<RecordedBuild>>,
}

impl FakeEngine {
	pub fn new() -> Self {
		Self {
			outcome: Outcome::Render,
			plots: false,
			builds: RefCell::new(Vec::new()),
		}
	}

	pub fn with_outcome(mut self, outcome: Outcome) -> Self {
		self.outcome = outcome;
		self
	}

	pub fn with_plots(mut self, plots: bool) -> Self {
		self.plots = plots;
		self
	}

	pub fn builds(&self) -> Ref<'_, Vec<RecordedBuild>> {
		self.builds.borrow()
	}
}

impl RenderEngine for FakeEngine {
	fn build_once(&self, request: &BuildRequest<'_>) -> Result<PathBuf, BuildError> {
		let source = fs::read_to_string(request.source_file)?;
		self.builds.borrow_mut().push(RecordedBuild {
			source: source.clone(),
			conf_dir: request.conf_dir.to_path_buf(),
			format: request.format,
			context: request.context.clone(),
			extensions: request.extensions.clone(),
		});

		match self.outcome {
			Outcome::Fail => Err(BuildError::Failed {
				status: "exit status: 2".to_string(),
				stderr: "docstring.rst:3: (SEVERE/4) Unexpected section title.".to_string(),
			}),
			Outcome::NoOutput => Ok(request.expected_output()),
			Outcome::Render => {
				let body = match request.format {
					OutputFormat::Html => html_body(request, &source),
					OutputFormat::Text => source.clone(),
				};
				if source.contains(".. plot::") {
					let images = request.dest_dir.join("_images");
					fs::create_dir_all(&images)?;
					fs::write(images.join("plot.png"), b"\x89PNG")?;
				}
				let output = request.expected_output();
				fs::write(&output, body)?;
				Ok(output)
			}
		}
	}

	fn supports_plots(&self) -> bool {
		self.plots
	}
}

fn html_body(request: &BuildRequest<'_>, source: &str) -> String {
	let mut body = String::new();
	if let Some(message) = request.context_value("warn_message") {
		body.push_str(&format!("<div class=\"warning\">{message}</div>\n"));
	}
	if !source.trim().is_empty() {
		body.push_str(&format!("<pre>{}</pre>\n", html_escape::encode_text(source)));
	}
	body
}

/// A RichDoc instance over `engine` whose cache lives in a fresh temporary directory.
pub fn test_richdoc(engine: FakeEngine) -> (TempDir, RichDoc<FakeEngine>) {
	let cache = TempDir::new().expect("create cache dir");
	let richdoc = RichDoc::new(engine).with_cache_dir(cache.path().join("cache"));
	(cache, richdoc)
}

/// Read a rendered artifact, checking it is a reasonably sized file.
pub fn read_page(path: &std::path::Path) -> String {
	assert!(path.is_file(), "expected {} to exist", path.display());
	let text = fs::read_to_string(path).expect("read rendered page");
	assert!(
		text.len() > 512,
		"page is suspiciously small ({} bytes):\n{text}",
		text.len()
	);
	text
}
