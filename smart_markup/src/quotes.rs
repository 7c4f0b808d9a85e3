use std::borrow::Cow;
use lazy_static::lazy_static;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

static SIGNIFICANT_CHARS: &[&str] = &[
	"...",
	"---",
	"--",
	"'",
	"\"",
];

lazy_static! {
	static ref SEARCHER: AhoCorasick = AhoCorasickBuilder::new()
		.auto_configure(SIGNIFICANT_CHARS)
		.match_kind(MatchKind::LeftmostFirst)
		.build(SIGNIFICANT_CHARS);
}

/// characters after which a quote mark is taken to open a quotation
#[inline]
fn opens_after(c: char) -> bool {
	c.is_whitespace() || matches!(c, '(' | '[' | '{' | '—' | '–' | '‘' | '“')
}

/// Walks a sequence of segments which read as one continuous passage,
/// substituting within each segment but looking across segment boundaries
/// to decide which way a quote mark should face.
struct Replacer<'a> {
	segments: &'a [&'a str],
	prev: Option<char>,
	in_double_quote: bool,
}

impl <'a> Replacer<'a> {

	fn new(segments: &'a [&'a str]) -> Self {
		Replacer {
			segments,
			prev: None,
			in_double_quote: false,
		}
	}

	/// the character following the current position,
	/// which may be the first character of a later segment
	fn following(&self, index: usize, rest: &str) -> Option<char> {
		match rest.chars().next() {
			Some(c) => Some(c),
			None => self.segments[index + 1..]
				.iter()
				.find_map(|s| s.chars().next())
		}
	}

	fn double_quote(&mut self, next: Option<char>) -> char {
		let mut opens = self.prev.map_or(true, opens_after);
		if opens && next.map_or(true, char::is_whitespace) {
			// a quote mark standing on its own; fall back to alternation
			opens = !self.in_double_quote;
		}
		self.in_double_quote = opens;
		if opens {
			'“'
		} else {
			'”'
		}
	}

	fn single_quote(&self, next: Option<char>) -> char {
		match (self.prev, next) {
			(Some(p), Some(n)) if p.is_alphanumeric() && n.is_alphanumeric() => '’',
			(_, Some(n)) if n.is_ascii_digit() => '’',
			(None, Some(n)) if !n.is_whitespace() => '‘',
			(Some(p), Some(n)) if opens_after(p) && !n.is_whitespace() => '‘',
			_ => '’'
		}
	}

	fn segment(&mut self, index: usize) -> Cow<'a, str> {
		let src = self.segments[index];

		if !SEARCHER.is_match(src) {
			if let Some(c) = src.chars().last() {
				self.prev = Some(c);
			}
			return Cow::Borrowed(src);
		}

		let mut out = String::with_capacity(src.len());
		let mut rest = src;
		while let Some(c) = rest.chars().next() {
			let (replacement, consumed) = if rest.starts_with("...") {
				('…', 3)
			} else if rest.starts_with("---") {
				('—', 3)
			} else if rest.starts_with("--") {
				('—', 2)
			} else {
				match c {
					'"' => {
						let next = self.following(index, &rest[1..]);
						(self.double_quote(next), 1)
					},
					'\'' => {
						let next = self.following(index, &rest[1..]);
						(self.single_quote(next), 1)
					},
					other => (other, other.len_utf8())
				}
			};
			out.push(replacement);
			self.prev = Some(replacement);
			rest = &rest[consumed..];
		}
		Cow::Owned(out)
	}
}

/// Smarten a sequence of segments which together make up one passage, such as
/// the pieces of a paragraph between emphasis markers.
///
/// Straight quotes become curly quotes and apostrophes, `...` an ellipsis,
/// and either `--` or `---` an em-dash. Multi-character sequences are only
/// recognised inside a single segment; quote direction takes the neighbouring
/// segments into account.
pub fn smarten_segments<'a>(segments: &'a [&'a str]) -> Vec<Cow<'a, str>> {
	let mut replacer = Replacer::new(segments);
	(0..segments.len())
		.map(|i| replacer.segment(i))
		.collect()
}

/// Smarten a single passage of text
pub fn smarten(src: &str) -> Cow<'_, str> {
	if !SEARCHER.is_match(src) {
		return Cow::Borrowed(src);
	}
	let segments = [src];
	let out = smarten_segments(&segments)
		.into_iter()
		.next()
		.unwrap_or_default();
	Cow::Owned(out.into_owned())
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn double_quotes_test() {
		assert_eq!(smarten("\"Hello world\""), "“Hello world”");
		assert_eq!(smarten("Hello world"), "Hello world");
		assert_eq!(smarten("\"Hello world"), "“Hello world");
		assert_eq!(smarten("Hello world..."), "Hello world…");
		assert_eq!(smarten("\"Hello world...\""), "“Hello world…”");
		assert_eq!(smarten("\"Hello world\"..."), "“Hello world”…");
		assert_eq!(smarten("\"Hello world\" \"Goodbye world\""), "“Hello world” “Goodbye world”");
		assert_eq!(smarten("He said, \"Go.\""), "He said, “Go.”");
	}

	#[test]
	fn dashes_test() {
		assert_eq!(smarten("Hello -- world --- dash"), "Hello — world — dash");
		assert_eq!(smarten("\"Hello -- world --- dash\""), "“Hello — world — dash”");
		assert_eq!(smarten("well---no"), "well—no");
		assert_eq!(smarten("wait--no"), "wait—no");
	}

	#[test]
	fn single_quotes_test() {
		assert_eq!(smarten("'Hello World'"), "‘Hello World’");
		assert_eq!(smarten("don't"), "don’t");
		assert_eq!(smarten("She wrote: 'It will be,' etc."), "She wrote: ‘It will be,’ etc.");
		assert_eq!(smarten("the summer of '21"), "the summer of ’21");
		assert_eq!(smarten("the dogs' bowls"), "the dogs’ bowls");
	}

	#[test]
	fn quotes_look_across_segments() {
		let segments = ["\"", "Hello", "\""];
		let out = smarten_segments(&segments);
		assert_eq!(out, vec!["“", "Hello", "”"]);
	}

	#[test]
	fn sequences_do_not_span_segments() {
		let segments = ["wait-", "-for it.", ".."];
		let out = smarten_segments(&segments);
		assert_eq!(out, vec!["wait-", "-for it.", ".."]);
	}

	#[test]
	fn untouched_text_is_borrowed() {
		assert!(matches!(smarten("plain text"), Cow::Borrowed(_)));
	}
}
