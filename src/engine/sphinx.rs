use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use once_cell::sync::OnceCell;
use which::which;

use super::{BuildError, BuildRequest, RenderEngine};
use crate::core_api::{Result, RichdocError};

/// Environment variable overriding the `sphinx-build` executable.
pub const SPHINX_BUILD_ENV: &str = "RICHDOC_SPHINX_BUILD";

/// Runs `sphinx-build` as a subprocess, one build per docstring.
#[derive(Debug)]
pub struct SphinxBuild {
	/// The `sphinx-build` executable.
	program: PathBuf,
	/// Interpreter probed for matplotlib; `None` disables plots.
	python: Option<PathBuf>,
	/// Cached result of the matplotlib probe.
	plots: OnceCell<bool>,
}

impl SphinxBuild {
	/// Use the given `sphinx-build` executable.
	pub fn new(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
			python: None,
			plots: OnceCell::new(),
		}
	}

	/// Find `sphinx-build` through [`SPHINX_BUILD_ENV`] or `PATH`, and a Python interpreter for the
	/// plot probe.
	pub fn locate() -> Result<Self> {
		let program = match std::env::var_os(SPHINX_BUILD_ENV) {
			Some(path) if !path.is_empty() => PathBuf::from(path),
			_ => which("sphinx-build").map_err(|err| {
				RichdocError::EngineUnavailable(format!(
					"cannot find sphinx-build on PATH ({err}); install Sphinx or set {SPHINX_BUILD_ENV}"
				))
			})?,
		};

		Ok(Self::new(program).with_python(Self::find_python()))
	}

	/// The first `python3` or `python` on `PATH`.
	pub fn find_python() -> Option<PathBuf> {
		which("python3").or_else(|_| which("python")).ok()
	}

	/// Probe `python` for matplotlib instead of the interpreter found on `PATH`.
	pub fn with_python(mut self, python: Option<PathBuf>) -> Self {
		self.python = python;
		self.plots = OnceCell::new();
		self
	}

	/// The executable this engine runs.
	pub fn program(&self) -> &PathBuf {
		&self.program
	}

	/// Arguments passed to `sphinx-build` for `request`.
	pub fn command_args(request: &BuildRequest<'_>) -> Vec<OsString> {
		let mut args: Vec<OsString> = vec![
			"-b".into(),
			request.format.builder_name().into(),
			"-c".into(),
			request.conf_dir.into(),
			"-d".into(),
			request.doctree_dir.clone().into(),
			"-E".into(),
			"-Q".into(),
			"-D".into(),
			format!("extensions={}", request.extensions.join(",")).into(),
		];
		for (key, value) in &request.context {
			args.push("-A".into());
			args.push(format!("{key}={value}").into());
		}
		args.push(request.source_dir.into());
		args.push(request.dest_dir.into());
		args.push(request.source_file.into());
		args
	}

	fn probe_plots(&self) -> bool {
		let Some(python) = &self.python else {
			return false;
		};
		let available = Command::new(python)
			.args(["-c", "import matplotlib"])
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.status()
			.map(|status| status.success())
			.unwrap_or(false);
		tracing::debug!(python = %python.display(), available, "probed matplotlib");
		available
	}
}

impl RenderEngine for SphinxBuild {
	fn build_once(&self, request: &BuildRequest<'_>) -> std::result::Result<PathBuf, BuildError> {
		let args = Self::command_args(request);
		tracing::debug!(program = %self.program.display(), ?args, "running sphinx-build");

		let output = Command::new(&self.program)
			.args(&args)
			.stdin(Stdio::null())
			.output()?;

		if !output.status.success() {
			return Err(BuildError::Failed {
				status: output.status.to_string(),
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}
		Ok(request.expected_output())
	}

	fn supports_plots(&self) -> bool {
		*self.plots.get_or_init(|| self.probe_plots())
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::*;
	use crate::render::OutputFormat;

	#[test]
	fn command_line_carries_overrides_in_order() {
		let request = BuildRequest {
			source_dir: Path::new("/scratch"),
			source_file: Path::new("/scratch/docstring.rst"),
			conf_dir: Path::new("/conf"),
			dest_dir: Path::new("/out"),
			doctree_dir: PathBuf::from("/scratch/doctrees"),
			format: OutputFormat::Html,
			context: vec![("math_on".into(), "true".into())],
			extensions: vec!["sphinx.ext.autosummary".into(), "sphinx.ext.mathjax".into()],
		};
		let args: Vec<String> = SphinxBuild::command_args(&request)
			.into_iter()
			.map(|arg| arg.to_string_lossy().into_owned())
			.collect();
		assert_eq!(
			args,
			vec![
				"-b",
				"html",
				"-c",
				"/conf",
				"-d",
				"/scratch/doctrees",
				"-E",
				"-Q",
				"-D",
				"extensions=sphinx.ext.autosummary,sphinx.ext.mathjax",
				"-A",
				"math_on=true",
				"/scratch",
				"/out",
				"/scratch/docstring.rst",
			]
		);
	}

	#[test]
	fn plots_are_disabled_without_python() {
		let engine = SphinxBuild::new("sphinx-build").with_python(None);
		assert!(!engine.supports_plots());
	}

	#[test]
	fn missing_executable_is_a_spawn_error() {
		let engine = SphinxBuild::new("/nonexistent/richdoc-sphinx-build");
		let request = BuildRequest {
			source_dir: Path::new("/scratch"),
			source_file: Path::new("/scratch/docstring.rst"),
			conf_dir: Path::new("/conf"),
			dest_dir: Path::new("/out"),
			doctree_dir: PathBuf::from("/scratch/doctrees"),
			format: OutputFormat::Html,
			context: Vec::new(),
			extensions: Vec::new(),
		};
		assert!(matches!(engine.build_once(&request), Err(BuildError::Spawn(_))));
	}
}
