#![deny(dead_code)]
#![deny(unreachable_patterns)]
#![deny(unused_extern_crates)]
#![deny(unused_imports)]
#![deny(unused_qualifications)]
#![deny(clippy::all)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(unused_results)]

//! A set of utilites used across the manuscript crates:
//! escaping text for the output formats, and the arithmetic
//! behind the approximate word count on a title page.

use std::borrow::Cow;
use aho_corasick::AhoCorasick;
use lazy_static::lazy_static;

lazy_static!{
	static ref XML_FINDER: AhoCorasick = AhoCorasick::new(&XML_TARGET_CHARS);
}

static XML_TARGET_CHARS: [&str; 4] = [
	"&",
	"<",
	">",
	"\"",
];

static XML_REPLACEMENTS: [&str; 4] = [
	"&amp;",
	"&lt;",
	"&gt;",
	"&quot;",
];

/// escape `input` for use in xml text or attribute values
pub fn escape_to_xml<'a, S: Into<Cow<'a, str>>>(input: S) -> Cow<'a, str> {
	let input = input.into();
	if XML_FINDER.is_match(input.as_ref()) {
		Cow::Owned(XML_FINDER.replace_all(input.as_ref(), &XML_REPLACEMENTS))
	} else {
		input
	}
}

#[inline]
fn needs_rtf_escape(c: char) -> bool {
	!c.is_ascii() || matches!(c, '\\' | '{' | '}' | '\n' | '\t')
}

/// escape `input` for rtf output.
///
/// Backslashes and braces are escaped, newlines become line breaks,
/// and anything outside ascii is written as a `\uN?` escape of its utf-16 code units.
pub fn escape_to_rtf<'a, S: Into<Cow<'a, str>>>(input: S) -> Cow<'a, str> {
	let input = input.into();
	if !input.chars().any(needs_rtf_escape) {
		return input;
	}

	let mut out = String::with_capacity(input.len() + 16);
	for c in input.chars() {
		match c {
			'\\' => out.push_str("\\\\"),
			'{' => out.push_str("\\{"),
			'}' => out.push_str("\\}"),
			'\n' => out.push_str("\\line "),
			'\t' => out.push_str("\\tab "),
			c if c.is_ascii() => out.push(c),
			c => {
				let mut units = [0u16; 2];
				for unit in c.encode_utf16(&mut units).iter() {
					// rtf wants a signed 16 bit value
					out.push_str(&format!("\\u{}?", *unit as i16));
				}
			}
		}
	}
	Cow::Owned(out)
}

/// count whitespace-delimited words
pub fn count_words(text: &str) -> usize {
	text.split_whitespace().count()
}

/// round to the nearest hundred; a half goes to the even hundred
/// ```
/// # use manuscript_common::round_to_nearest_hundred;
/// assert_eq!(round_to_nearest_hundred(149), 100);
/// assert_eq!(round_to_nearest_hundred(250), 200);
/// assert_eq!(round_to_nearest_hundred(350), 400);
/// ```
pub const fn round_to_nearest_hundred(n: usize) -> usize {
	let hundreds = n / 100;
	let rest = n % 100;
	if rest > 50 || (rest == 50 && hundreds % 2 == 1) {
		(hundreds + 1) * 100
	} else {
		hundreds * 100
	}
}

/// format a number with comma thousands separators
/// ```
/// # use manuscript_common::format_thousands;
/// assert_eq!(format_thousands(85300), "85,300");
/// ```
pub fn format_thousands(n: usize) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}
