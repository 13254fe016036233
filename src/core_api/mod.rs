//! Core library API for richdoc, providing the main entry point for rendering docstrings.
//!
//! [`RichDoc`] owns the documentation engine and the directory policy. Every call receives its
//! [`RenderOptions`] explicitly, so one instance can serve concurrent requests with different
//! options.

/// Error helpers for the core API.
pub mod error;

use std::path::{Path, PathBuf};

use url::Url;

pub use self::error::{Result, RichdocError};
use crate::engine::{RenderEngine, SphinxBuild};
use crate::oinfo::ObjectInfo;
use crate::render::{ConfSource, OutputFormat, RenderOptions, Renderer};
use crate::scratch::{create_scratch_dir, default_cache_dir};

/// A written page and its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderArtifact {
	/// Location of the written page.
	pub path: PathBuf,
	/// Format of the page.
	pub format: OutputFormat,
}

impl RenderArtifact {
	/// Directory the page and its images were written to.
	pub fn dir(&self) -> Option<&Path> {
		self.path.parent()
	}

	/// Fully qualified `file://` URL of the page.
	pub fn url(&self) -> Result<Url> {
		let absolute = std::path::absolute(&self.path)?;
		Url::from_file_path(&absolute).map_err(|()| RichdocError::InvalidPath(absolute))
	}
}

/// RichDoc renders Python docstrings into rich pages.
///
/// Each docstring of an object (its own and, for instances, its class's) is wrapped for Sphinx's
/// Python domain, built once by the engine and merged into a single page together with the
/// object's name, highlighted argument spec and kind label.
#[derive(Debug, Clone)]
pub struct RichDoc<E = SphinxBuild> {
	/// Engine every docstring is built with.
	engine: E,

	/// Directory scratch directories are created in. `None` uses [`default_cache_dir`].
	cache_dir: Option<PathBuf>,

	/// Location of the shared engine configuration. `None` derives one.
	conf_dir: Option<PathBuf>,

	/// Whether every pass generates a throwaway configuration directory.
	temp_confdir: bool,
}

impl RichDoc<SphinxBuild> {
	/// Creates a RichDoc instance backed by the `sphinx-build` found on this system.
	pub fn locate() -> Result<Self> {
		Ok(Self::new(SphinxBuild::locate()?))
	}
}

impl<E: RenderEngine> RichDoc<E> {
	/// Creates a new RichDoc instance around `engine` with default directories.
	pub fn new(engine: E) -> Self {
		Self {
			engine,
			cache_dir: None,
			conf_dir: None,
			temp_confdir: false,
		}
	}

	/// Sets the directory scratch directories are created in.
	pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
		self.cache_dir = Some(dir);
		self
	}

	/// Sets the directory the shared engine configuration is generated into.
	pub fn with_conf_dir(mut self, dir: PathBuf) -> Self {
		self.conf_dir = Some(dir);
		self
	}

	/// Enables or disables a fresh temporary configuration directory per pass.
	///
	/// Temporary directories are removed when their pass ends, so local assets such as MathJax are
	/// still looked up in the `static` directory of [`RichDoc::shared_conf_dir`].
	pub fn with_temp_confdir(mut self, enabled: bool) -> Self {
		self.temp_confdir = enabled;
		self
	}

	/// Returns the engine.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// Returns the directory scratch directories are created in.
	pub fn cache_dir(&self) -> PathBuf {
		self.cache_dir.clone().unwrap_or_else(default_cache_dir)
	}

	/// Returns the shared configuration directory.
	///
	/// An explicit cache directory keeps the configuration next to it; otherwise it lives in the
	/// platform cache directory, versioned so upgrades regenerate it.
	pub fn shared_conf_dir(&self) -> PathBuf {
		let versioned = format!("sphinx-conf-{}", env!("CARGO_PKG_VERSION"));
		if let Some(dir) = &self.conf_dir {
			return dir.clone();
		}
		if let Some(dir) = &self.cache_dir {
			return dir.join(versioned);
		}
		match dirs::cache_dir() {
			Some(base) => base.join("richdoc").join(versioned),
			None => default_cache_dir().join(versioned),
		}
	}

	fn renderer<'a>(&'a self, options: &'a RenderOptions) -> Renderer<'a, E> {
		let shared = self.shared_conf_dir();
		let asset_dir = shared.join("static");
		let conf = if self.temp_confdir {
			ConfSource::Temporary
		} else {
			ConfSource::Shared(shared)
		};
		Renderer {
			engine: &self.engine,
			options,
			conf,
			asset_dir,
		}
	}

	/// Render the HTML page for `oinfo` into a fresh scratch directory.
	pub fn render(&self, oinfo: &ObjectInfo, options: &RenderOptions) -> Result<RenderArtifact> {
		self.render_as(oinfo, options, OutputFormat::Html)
	}

	/// Render a plain-text page for `oinfo` into a fresh scratch directory.
	pub fn render_text(&self, oinfo: &ObjectInfo, options: &RenderOptions) -> Result<RenderArtifact> {
		self.render_as(oinfo, options, OutputFormat::Text)
	}

	fn render_as(
		&self,
		oinfo: &ObjectInfo,
		options: &RenderOptions,
		format: OutputFormat,
	) -> Result<RenderArtifact> {
		let srcdir = create_scratch_dir(&self.cache_dir())?;
		let path = self.renderer(options).rich_repr(oinfo, &srcdir, format)?;
		Ok(RenderArtifact { path, format })
	}

	/// Process a single raw docstring and return the engine's output.
	///
	/// The docstring is not wrapped; it is built as a standalone reStructuredText document in a
	/// fresh scratch directory.
	pub fn sphinxify(
		&self,
		docstring: &str,
		format: OutputFormat,
		options: &RenderOptions,
	) -> Result<String> {
		let srcdir = create_scratch_dir(&self.cache_dir())?;
		self.renderer(options).sphinxify(docstring, &srcdir, format)
	}
}
