//! Turning an [`ObjectInfo`](crate::oinfo::ObjectInfo) into a finished page.

/// Render pipeline driving the engine once per docstring.
pub mod core;
mod options;
/// Askama page templates and warning fragments.
pub mod templates;
/// Page and engine template variables.
pub mod vars;
/// Python-domain wrapping of structured docstrings.
pub mod wrap;

pub use self::core::{ConfSource, Renderer};
pub use self::options::{OutputFormat, RenderOptions};
pub use self::vars::{GlobalVars, TemplateVars, highlight_argspec};
pub use self::wrap::{wrap_class_docstring, wrap_docstring, wrap_main_docstring};
