use serde::Deserialize;

/// Presentation switches for one render call.
///
/// Passed explicitly to every render, so concurrent renders with different options never observe
/// each other. Deserializes from JSON with per-field defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
	/// Enable MathJax and the math extension.
	pub render_math: bool,
	/// Load MathJax from the local asset directory instead of the CDN.
	pub local_mathjax: bool,
	/// Render docstring sections collapsed; clicking a section heading expands it.
	pub collapse_sections: bool,
	/// Target the legacy Qt4 web view.
	pub use_qt4: bool,
	/// Show the section outline.
	pub outline: bool,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			render_math: true,
			local_mathjax: false,
			collapse_sections: false,
			use_qt4: false,
			outline: false,
		}
	}
}

impl RenderOptions {
	/// Enables or disables math rendering.
	pub fn with_render_math(mut self, enabled: bool) -> Self {
		self.render_math = enabled;
		self
	}

	/// Enables or disables the local MathJax copy.
	pub fn with_local_mathjax(mut self, enabled: bool) -> Self {
		self.local_mathjax = enabled;
		self
	}

	/// Enables or disables collapsed sections.
	pub fn with_collapse_sections(mut self, enabled: bool) -> Self {
		self.collapse_sections = enabled;
		self
	}

	/// Enables or disables the Qt4 presentation tweaks.
	pub fn with_use_qt4(mut self, enabled: bool) -> Self {
		self.use_qt4 = enabled;
		self
	}

	/// Enables or disables the section outline.
	pub fn with_outline(mut self, enabled: bool) -> Self {
		self.outline = enabled;
		self
	}
}

/// Output produced by the documentation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
	/// HTML fragments and pages.
	#[default]
	Html,
	/// Plain text.
	Text,
}

impl OutputFormat {
	/// Builder name passed to the engine.
	pub fn builder_name(self) -> &'static str {
		match self {
			Self::Html => "html",
			Self::Text => "text",
		}
	}

	/// File extension of the engine's output.
	pub fn extension(self) -> &'static str {
		match self {
			Self::Html => "html",
			Self::Text => "txt",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_keys_take_defaults() {
		let options: RenderOptions = serde_json::from_str(r#"{"outline": true}"#).unwrap();
		assert_eq!(options, RenderOptions::default().with_outline(true));
		assert!(options.render_math);
	}
}
