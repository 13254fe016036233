//! Best-effort recovery of a call signature from documentation text.
//!
//! Compiled extensions and builtins rarely expose a machine-readable signature, but their
//! docstrings conventionally open with one, e.g. `sin(x, /, out=None, *, where=True)`. The scan
//! below looks for calls of the object's own name and keeps the first one. It is a heuristic: it
//! returns an empty string when nothing looks like a signature and never fails.

use regex::Regex;

/// Recover the parenthesized argument list for `object_name` from `text`.
///
/// Both inputs default to the empty string. Only the part from the last `(` of the first match is
/// returned, so `foo(a, b)` yields `(a, b)`.
pub fn recover_signature(text: Option<&str>, object_name: Option<&str>) -> String {
	let text = text.unwrap_or_default();
	if text.is_empty() {
		return String::new();
	}
	let name = object_name.unwrap_or_default();

	let first = scan_calls(text, name)
		.into_iter()
		.next()
		.or_else(|| wrapped_calls(text, name).into_iter().next());

	match first.and_then(|sig| sig.rsplit('(').next()) {
		Some(args) => format!("({args})"),
		None => String::new(),
	}
}

/// All non-overlapping `name(...)` calls closed on one line or by the first `)` after the
/// opening parenthesis, in order of appearance.
fn scan_calls<'a>(text: &'a str, name: &str) -> Vec<&'a str> {
	let opener = format!("{name}(");
	let step = opener.chars().next().map_or(1, char::len_utf8);
	let mut found = Vec::new();
	let mut from = 0;

	while let Some(offset) = text[from..].find(&opener) {
		let start = from + offset;
		let body = start + opener.len();
		match close_inline(text, body).or_else(|| close_first_paren(text, body)) {
			Some(end) => {
				found.push(&text[start..end]);
				from = end;
			}
			None => from = start + step,
		}
	}

	found
}

/// End of a call whose arguments stay on the opening line.
///
/// The first argument character may be anything but `)`. After it, the shortest run of same-line
/// characters ending in a closing parenthesis that passes [`closes_signature`] wins.
fn close_inline(text: &str, body: usize) -> Option<usize> {
	let mut chars = text[body..].char_indices();
	let (_, first) = chars.next()?;
	if first == ')' {
		return None;
	}

	let mut prev: Option<char> = None;
	for (offset, ch) in chars {
		if ch == '\n' {
			return None;
		}
		let at = body + offset;
		if ch == ')' && prev.is_some_and(is_signature_tail) && !followed_by_comma(text, at) {
			return Some(at + 1);
		}
		prev = Some(ch);
	}
	None
}

/// End of a call closed by the first `)` after the opening parenthesis, across lines.
fn close_first_paren(text: &str, body: usize) -> Option<usize> {
	let rest = &text[body..];
	let close = rest.find(')')?;
	let last = rest[..close].chars().next_back()?;
	if !is_signature_tail(last) || followed_by_comma(text, body + close) {
		return None;
	}
	Some(body + close + 1)
}

/// Calls whose argument list is broken as `),\n` continuation lines.
fn wrapped_calls<'a>(text: &'a str, name: &str) -> Vec<&'a str> {
	let pattern = format!(
		r#"{}\([^)]+(?:\),\n.+)*\),\n.*[\w\]}}'"]\)"#,
		regex::escape(name)
	);
	match Regex::new(&pattern) {
		Ok(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
		Err(err) => {
			tracing::debug!(%err, "skipping wrapped signature scan");
			Vec::new()
		}
	}
}

/// Characters a signature may end with before its closing parenthesis.
fn is_signature_tail(ch: char) -> bool {
	ch.is_alphanumeric() || matches!(ch, '_' | ']' | '}' | '\'' | '"')
}

fn followed_by_comma(text: &str, close_at: usize) -> bool {
	text[close_at + 1..].starts_with(',')
}
