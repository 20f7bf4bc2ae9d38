//! HTML entity decoding for text runs.

use std::borrow::Cow;

const ENTITIES: [(&str, char); 5] = [
	("&amp;", '&'),
	("&lt;", '<'),
	("&gt;", '>'),
	("&quot;", '"'),
	("&#39;", '\''),
];

/// Decodes the five entities `html_escape` produces.
///
/// Unknown entities are kept verbatim. Decoding is single-pass, so
/// `&amp;lt;` becomes `&lt;`.
pub fn unescape(text: &str) -> Cow<'_, str> {
	if !text.contains('&') {
		return Cow::Borrowed(text);
	}

	let mut out = String::with_capacity(text.len());
	let mut rest = text;
	while let Some(position) = rest.find('&') {
		out.push_str(&rest[..position]);
		rest = &rest[position..];
		match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
			Some((entity, decoded)) => {
				out.push(*decoded);
				rest = &rest[entity.len()..];
			}
			None => {
				out.push('&');
				rest = &rest[1..];
			}
		}
	}
	out.push_str(rest);
	Cow::Owned(out)
}
