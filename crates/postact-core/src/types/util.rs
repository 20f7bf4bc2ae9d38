//! Utility functions shared by serialization and realization.

use std::borrow::Cow;

/// Escapes HTML special characters in a string.
///
/// This function replaces the following characters:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&#39;`
///
/// Returns a borrowed reference if no escaping is needed.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// Returns true for elements that never have a closing tag
pub fn is_void_element(tag: &str) -> bool {
	matches!(
		tag,
		"area"
			| "base" | "br"
			| "col" | "embed"
			| "hr" | "img"
			| "input" | "link"
			| "meta" | "source"
			| "track" | "wbr"
	)
}

/// Converts a camelCase style key into its CSS property name.
///
/// `fontSize` becomes `font-size`; a `webkit` prefix gains a leading dash
/// (`webkitTransform` becomes `-webkit-transform`). Names that are already
/// kebab-case pass through.
pub fn css_property_name(key: &str) -> String {
	let mut name = String::with_capacity(key.len() + 4);
	if key.starts_with("webkit") {
		name.push('-');
	}
	for c in key.chars() {
		if c.is_ascii_uppercase() {
			name.push('-');
			name.push(c.to_ascii_lowercase());
		} else {
			name.push(c);
		}
	}
	name
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[rstest]
	#[case("plain", "plain")]
	#[case("<a href='x'>", "&lt;a href=&#39;x&#39;&gt;")]
	#[case("\"&\"", "&quot;&amp;&quot;")]
	fn test_html_escape(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}

	#[rstest]
	#[case("color", "color")]
	#[case("fontSize", "font-size")]
	#[case("borderTopLeftRadius", "border-top-left-radius")]
	#[case("webkitTransform", "-webkit-transform")]
	#[case("background-color", "background-color")]
	fn test_css_property_name(#[case] key: &str, #[case] expected: &str) {
		assert_eq!(css_property_name(key), expected);
	}

	#[rstest]
	fn test_void_elements() {
		assert!(is_void_element("br"));
		assert!(is_void_element("input"));
		assert!(!is_void_element("div"));
	}
}
