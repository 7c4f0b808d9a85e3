//! The very small markdown dialect used in manuscript fragments.
//!
//! Only four inline tokens are recognised:
//!
//!  - `***text***` for bold italic
//!  - `**text**` for bold
//!  - `*text*` or `_text_` for italic
//!
//! Delimiters of the same kind are paired from left to right.
//! A paired delimiter toggles its style for everything which follows,
//! so delimiters of different kinds may overlap freely;
//! a delimiter left without a partner is kept as literal text.
//!
//! Each literal piece of text between delimiters is then smartened:
//! straight quotes become curly quotes, `...` becomes an ellipsis,
//! and `--` or `---` an em-dash.
//!
//! ```
//! use smart_markup::{parse_inline, Span};
//!
//! let spans = parse_inline("A **bold** move");
//! assert_eq!(spans, vec![
//!     Span::plain("A "),
//!     Span::bold("bold"),
//!     Span::plain(" move"),
//! ]);
//!
//! // an unclosed marker is literal
//! let spans = parse_inline("5 * 3");
//! assert_eq!(spans, vec![Span::plain("5 * 3")]);
//! ```
#![deny(unreachable_patterns)]
#![deny(unused_imports)]
#![deny(missing_debug_implementations)]

use lazy_static::lazy_static;
use regex::Regex;
mod quotes;
pub use quotes::{smarten, smarten_segments};

lazy_static! {
    static ref DELIMITERS: Regex = Regex::new(r"\*{1,3}|_").unwrap();
}

/// A run of text with a single style
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    /// the text of this run; may contain `\n`, which should be rendered as a line break
    pub text: String,
    /// whether this run is bold
    pub bold: bool,
    /// whether this run is italic
    pub italic: bool,
}

impl Span {
    /// a run with no styling
    pub fn plain<S: Into<String>>(text: S) -> Self {
        Span {
            text: text.into(),
            ..Default::default()
        }
    }

    /// a bold run
    pub fn bold<S: Into<String>>(text: S) -> Self {
        Span {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    /// an italic run
    pub fn italic<S: Into<String>>(text: S) -> Self {
        Span {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }

    /// a bold and italic run
    pub fn bold_italic<S: Into<String>>(text: S) -> Self {
        Span {
            text: text.into(),
            bold: true,
            italic: true,
        }
    }
}

/// The kinds of emphasis delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    BoldItalic,
    Bold,
    StarItalic,
    UnderscoreItalic,
}

impl Delimiter {
    fn from_token(s: &str) -> Option<Self> {
        use Delimiter::*;
        match s {
            "***" => Some(BoldItalic),
            "**" => Some(Bold),
            "*" => Some(StarItalic),
            "_" => Some(UnderscoreItalic),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        use Delimiter::*;
        match self {
            BoldItalic => "***",
            Bold => "**",
            StarItalic => "*",
            UnderscoreItalic => "_",
        }
    }

    /// which of (bold, italic) this delimiter flips
    const fn toggles(self) -> (bool, bool) {
        use Delimiter::*;
        match self {
            BoldItalic => (true, true),
            Bold => (true, false),
            StarItalic | UnderscoreItalic => (false, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Delimiter(Delimiter),
}

fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in DELIMITERS.find_iter(src) {
        if m.start() > last {
            tokens.push(Token::Text(&src[last..m.start()]));
        }
        if let Some(d) = Delimiter::from_token(m.as_str()) {
            tokens.push(Token::Delimiter(d));
        }
        last = m.end();
    }
    if last < src.len() {
        tokens.push(Token::Text(&src[last..]));
    }
    tokens
}

/// mark which delimiter tokens have a partner of the same kind
fn pair_delimiters(tokens: &[Token<'_>]) -> Vec<bool> {
    let mut paired = vec![false; tokens.len()];
    let mut open: [Option<usize>; 4] = [None; 4];

    for (i, token) in tokens.iter().enumerate() {
        if let Token::Delimiter(d) = token {
            let slot = &mut open[*d as usize];
            match slot.take() {
                Some(opener) => {
                    paired[opener] = true;
                    paired[i] = true;
                }
                None => *slot = Some(i),
            }
        }
    }
    paired
}

/// Convert a block of text into styled spans.
///
/// Adjacent runs of the same style are merged, and empty runs are dropped.
pub fn parse_inline(src: &str) -> Vec<Span> {
    let tokens = tokenize(src);
    let paired = pair_delimiters(&tokens);

    let mut bold = false;
    let mut italic = false;
    let mut runs: Vec<(String, bool, bool)> = Vec::new();

    let mut push_text = |text: &str, bold: bool, italic: bool| match runs.last_mut() {
        Some((t, b, i)) if *b == bold && *i == italic => t.push_str(text),
        _ => runs.push((text.to_string(), bold, italic)),
    };

    for (token, is_paired) in tokens.iter().zip(paired.iter()) {
        match token {
            Token::Text(t) => push_text(t, bold, italic),
            Token::Delimiter(d) if *is_paired => {
                let (b, i) = d.toggles();
                bold ^= b;
                italic ^= i;
            }
            Token::Delimiter(d) => push_text(d.as_str(), bold, italic),
        }
    }

    let texts = runs.iter().map(|(t, _, _)| t.as_str()).collect::<Vec<_>>();
    let smartened = smarten_segments(&texts);

    smartened
        .into_iter()
        .zip(runs.iter())
        .filter(|(text, _)| !text.is_empty())
        .map(|(text, (_, bold, italic))| Span {
            text: text.into_owned(),
            bold: *bold,
            italic: *italic,
        })
        .collect()
}

/// The plain text of a sequence of spans
pub fn spans_to_string(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
