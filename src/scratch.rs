//! Filesystem locations used while rendering.
//!
//! Every request renders into its own uniquely named scratch directory below a per-user cache
//! directory. Scratch directories are kept after the call because the returned page and its
//! images live there; removing them is up to the caller or the OS temp cleanup.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use walkdir::WalkDir;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "RICHDOC_CACHE_DIR";

/// Default cache directory: `<tmp>/richdoc-<user>`, or `<tmp>/richdoc` on Windows.
pub fn default_cache_dir() -> PathBuf {
	if let Some(dir) = env::var_os(CACHE_DIR_ENV).filter(|dir| !dir.is_empty()) {
		return PathBuf::from(dir);
	}

	let tmp = env::temp_dir();
	if cfg!(windows) {
		return tmp.join("richdoc");
	}
	let user = env::var("USER")
		.or_else(|_| env::var("LOGNAME"))
		.unwrap_or_else(|_| "unknown".to_string());
	tmp.join(format!("richdoc-{user}"))
}

/// Create `dir` if needed. A directory that already exists, possibly created by a concurrent
/// render, is fine; any other failure is returned.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
	match fs::create_dir(dir) {
		Ok(()) => Ok(()),
		Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
		Err(err) => Err(err),
	}
}

/// Create a fresh, uniquely named scratch directory inside `cache_dir` and keep it on disk.
pub fn create_scratch_dir(cache_dir: &Path) -> io::Result<PathBuf> {
	ensure_dir(cache_dir)?;
	let dir = tempfile::Builder::new()
		.prefix("render-")
		.tempdir_in(cache_dir)?
		.keep();
	tracing::debug!(dir = %dir.display(), "created scratch directory");
	Ok(dir)
}

/// Recursively copy `source` into `destination`, overwriting files that exist in both.
pub fn merge_directories(source: &Path, destination: &Path) -> io::Result<()> {
	fs::create_dir_all(destination)?;
	for entry in WalkDir::new(source) {
		let entry = entry?;
		let relative = entry
			.path()
			.strip_prefix(source)
			.map_err(io::Error::other)?;
		let target = destination.join(relative);

		if entry.file_type().is_dir() {
			fs::create_dir_all(&target)?;
		} else if entry.file_type().is_file() {
			if let Some(parent) = target.parent() {
				fs::create_dir_all(parent)?;
			}
			fs::copy(entry.path(), &target)?;
		}
	}
	Ok(())
}
