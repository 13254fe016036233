use std::path::PathBuf;

/// Aggregate errors produced by the richdoc API.
///
/// Engine build failures are not represented here: they are recovered inside the pipeline by a
/// warning fragment.
#[derive(Debug, thiserror::Error)]
pub enum RichdocError {
	/// Failed to perform IO operations.
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// Failed to decode object info or options JSON.
	#[error("invalid JSON input: {0}")]
	Json(#[from] serde_json::Error),
	/// Failed to render a page template.
	#[error("failed to render template: {0}")]
	Template(#[from] askama::Error),
	/// The documentation engine could not be found.
	#[error("{0}")]
	EngineUnavailable(String),
	/// A path that cannot be turned into a `file://` URL.
	#[error("cannot express {} as a file URL", .0.display())]
	InvalidPath(PathBuf),
}

/// Result type returned by the richdoc library.
pub type Result<T> = std::result::Result<T, RichdocError>;
