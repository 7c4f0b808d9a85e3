//! This crate turns an outline of a manuscript -- parts, chapters and the
//! text files which make them up -- into a `Manuscript`,
//! which can then be rendered to a specific backend.
//!
//! General usage is to build an `Outline`, choose a `FragmentSource`
//! to read the text from, and call `assemble`.
//!
//! ```
//! use manuscript_ast::{assemble, Chapter, Item, Metadata, Outline};
//! use std::collections::HashMap;
//! use std::path::PathBuf;
//!
//! let mut files = HashMap::new();
//! files.insert(PathBuf::from("one.md"), "It was a *dark* night.".to_string());
//!
//! let outline = Outline {
//!     metadata: Metadata {
//!         title: Some("An Example".to_string()),
//!         ..Default::default()
//!     },
//!     structure: vec![Item::Chapter(Chapter {
//!         number: Some(1.into()),
//!         title: None,
//!         fragments: vec![PathBuf::from("one.md")],
//!     })],
//!     ..Default::default()
//! };
//! let manuscript = assemble(&outline, &files);
//! assert!(manuscript.paragraphs().any(|p| p.text() == "Chapter 1"));
//! ```
//!
//! # Manuscript format
//! The manuscript follows the usual conventions for submissions:
//!
//! - a title page, with contact details and an approximate word count
//! in a row at the top and the title and byline further down
//! - a running header of `Surname | Short Title | page` on every page but the first
//! - body text double spaced, with a half-inch first-line indent
//! - scenes separated by a centred `#`, and the end marked with `#  #  #`
//!
//! # Markup
//! Source fragments are plain text, one paragraph per line.
//! Markdown headings and lines beginning with `%` are ignored.
//! Within a paragraph, `*italic*`, `_italic_`, `**bold**` and `***bold italic***`
//! are recognised, and punctuation is smartened; see `smart_markup`.

#![deny(dead_code)]
#![deny(unreachable_patterns)]
#![deny(unused_extern_crates)]
#![deny(unused_imports)]
#![deny(unused_qualifications)]
#![deny(clippy::all)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
mod assembler;
mod document;
mod fragment;
mod metadata;
mod outline;
mod title_page;

pub use assembler::{assemble, process_chapter, process_part, process_text};
pub use document::{
    Alignment, Block, BlockId, ContactTable, Manuscript, PageSetup, Paragraph, ParagraphStyle,
    RunningHeader, Span, END_MARK, SCENE_BREAK,
};
pub use fragment::{prose_lines, FragmentLoader, FragmentSource};
pub use metadata::{Author, Metadata, StoryType};
pub use outline::{Chapter, ChapterNumber, Item, Outline, Part, TextItem};
pub use title_page::render_title_page;
