use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Structured description of a callable's parameters.
///
/// Mirrors the fields of Python's `inspect.getfullargspec`. `args` being absent marks the record
/// as malformed; an empty list is a valid zero-argument callable.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArgSpec {
	/// Positional parameter names in declaration order.
	pub args: Option<Vec<String>>,
	/// Name of the `*args` parameter.
	pub varargs: Option<String>,
	/// Name of the `**kwargs` parameter.
	pub varkw: Option<String>,
	/// Default values for positional parameters.
	pub defaults: Option<Defaults>,
	/// Keyword-only parameter names.
	pub kwonlyargs: Option<Vec<String>>,
	/// Default values for keyword-only parameters.
	pub kwonlydefaults: Option<BTreeMap<String, Value>>,
}

/// Default values, either aligned to the tail of `args` or keyed by parameter name.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Defaults {
	/// Python's tuple form: the last `n` positional parameters take these values.
	Positional(Vec<Value>),
	/// Name to value mapping.
	Named(BTreeMap<String, Value>),
}

impl ArgSpec {
	/// Build a spec from positional parameter names.
	pub fn from_args<I, S>(args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			args: Some(args.into_iter().map(Into::into).collect()),
			..Self::default()
		}
	}

	/// Format as `(a, b=1, *args, c=2, **kwargs)`, or `None` when `args` is missing.
	pub fn format(&self) -> Option<String> {
		let args = self.args.as_deref()?;
		Some(self.format_params(args))
	}

	/// Like [`ArgSpec::format`], dropping a leading `self` parameter.
	pub fn format_without_self(&self) -> Option<String> {
		let args = self.args.as_deref()?;
		let args = match args.split_first() {
			Some((first, rest)) if first == "self" => rest,
			_ => args,
		};
		Some(self.format_params(args))
	}

	fn format_params(&self, args: &[String]) -> String {
		let mut params = Vec::with_capacity(args.len() + 3);
		for (index, name) in args.iter().enumerate() {
			match self.positional_default(name, index, args.len()) {
				Some(value) => params.push(format!("{name}={}", python_repr(value))),
				None => params.push(name.clone()),
			}
		}

		let kwonly = self.kwonlyargs.as_deref().unwrap_or_default();
		if let Some(varargs) = &self.varargs {
			params.push(format!("*{varargs}"));
		} else if !kwonly.is_empty() {
			params.push("*".to_string());
		}

		for name in kwonly {
			match self.kwonlydefaults.as_ref().and_then(|map| map.get(name)) {
				Some(value) => params.push(format!("{name}={}", python_repr(value))),
				None => params.push(name.clone()),
			}
		}

		if let Some(varkw) = &self.varkw {
			params.push(format!("**{varkw}"));
		}

		format!("({})", params.join(", "))
	}

	fn positional_default(&self, name: &str, index: usize, total: usize) -> Option<&Value> {
		match self.defaults.as_ref()? {
			Defaults::Positional(values) => {
				let shifted = index + values.len();
				if shifted < total {
					None
				} else {
					values.get(shifted - total)
				}
			}
			Defaults::Named(map) => map.get(name),
		}
	}
}

/// Render a JSON value the way Python's `repr` would print the equivalent object.
pub fn python_repr(value: &Value) -> String {
	match value {
		Value::Null => "None".to_string(),
		Value::Bool(true) => "True".to_string(),
		Value::Bool(false) => "False".to_string(),
		Value::Number(number) => number.to_string(),
		Value::String(text) => python_str_repr(text),
		Value::Array(items) => {
			let items: Vec<String> = items.iter().map(python_repr).collect();
			format!("[{}]", items.join(", "))
		}
		Value::Object(map) => {
			let entries: Vec<String> = map
				.iter()
				.map(|(key, value)| format!("{}: {}", python_str_repr(key), python_repr(value)))
				.collect();
			format!("{{{}}}", entries.join(", "))
		}
	}
}

fn python_str_repr(text: &str) -> String {
	let quote = if text.contains('\'') && !text.contains('"') {
		'"'
	} else {
		'\''
	};

	let mut out = String::with_capacity(text.len() + 2);
	out.push(quote);
	for ch in text.chars() {
		match ch {
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c == quote => {
				out.push('\\');
				out.push(c);
			}
			c => out.push(c),
		}
	}
	out.push(quote);
	out
}
