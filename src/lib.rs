//! Core library for richdoc, rendering Python docstrings into rich documentation pages.
//!
//! This crate provides the high-level `RichDoc` API which takes an introspected object record,
//! recovers its signature, wraps its docstring for Sphinx, drives the documentation engine and
//! assembles the final page. It is UI-agnostic and can back any frontend (CLI, IDE, notebook,
//! language server, etc.).

/// Typed object records and the argument-spec helpers built on them.
pub mod oinfo;

/// Docstring wrapping, template variables and the render pipeline.
pub mod render;

/// The external documentation engine seam and its Sphinx implementation.
pub mod engine;

/// Per-user cache and per-request scratch directories.
pub mod scratch;

/// Core API for richdoc operations.
pub mod core_api;

/// Tracing subscriber setup for binaries.
pub mod telemetry;

pub use crate::core_api::{RenderArtifact, Result, RichDoc, RichdocError};
pub use crate::engine::{BuildError, BuildRequest, RenderEngine, SphinxBuild};
pub use crate::oinfo::{ArgSpec, ObjectInfo, TemplateSeed};
pub use crate::render::{OutputFormat, RenderOptions};
