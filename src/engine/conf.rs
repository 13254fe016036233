use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Sphinx configuration written into every configuration directory.
pub const CONF_PY: &str = include_str!("../../assets/sphinx/conf.py");

/// Page layout reducing Sphinx's output to an embeddable fragment.
pub const LAYOUT_HTML: &str = include_str!("../../assets/sphinx/layout.html");

/// A Sphinx configuration directory. This can be a long-lived shared directory or a temporary one.
#[derive(Debug)]
pub enum ConfDir {
	/// Directory generated once and reused across renders.
	Shared(PathBuf),
	/// Directory generated for one build and removed when dropped.
	Temporary(TempDir),
}

impl ConfDir {
	/// Reuse `dir`, generating its contents when `conf.py` is missing.
	pub fn shared(dir: PathBuf) -> std::io::Result<Self> {
		if !dir.join("conf.py").is_file() {
			generate_conf(&dir)?;
		}
		Ok(Self::Shared(dir))
	}

	/// Generate a fresh configuration inside a new temporary directory.
	pub fn temporary() -> std::io::Result<Self> {
		let dir = tempfile::Builder::new().prefix("richdoc-conf-").tempdir()?;
		generate_conf(dir.path())?;
		Ok(Self::Temporary(dir))
	}

	/// Return the directory holding `conf.py`.
	pub fn as_path(&self) -> &Path {
		match self {
			Self::Shared(path) => path.as_path(),
			Self::Temporary(temp_dir) => temp_dir.path(),
		}
	}
}

/// Write `conf.py`, `templates/layout.html` and an empty `static/` directory into `directory`.
pub fn generate_conf(directory: &Path) -> std::io::Result<()> {
	let templates = directory.join("templates");
	let statics = directory.join("static");
	fs::create_dir_all(&templates)?;
	fs::create_dir_all(&statics)?;

	fs::write(directory.join("conf.py"), CONF_PY)?;
	fs::write(templates.join("layout.html"), LAYOUT_HTML)?;
	fs::write(directory.join("__init__.py"), "")?;
	fs::write(statics.join("empty"), "")?;
	tracing::debug!(dir = %directory.display(), "generated sphinx configuration");
	Ok(())
}
