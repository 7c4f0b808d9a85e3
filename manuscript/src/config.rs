//! Deserialization of a manuscript's YAML configuration.
//!
//! A configuration has three top-level keys, all optional:
//!
//! ```yaml
//! author:
//!   legal_name: Jane Q. Writer
//!   street_address: 1 Main St
//!   city_state_zip: Springfield, IL 62701
//!   phone: 555-0100
//!   email: jane@example.com
//! metadata:
//!   title: My Novel
//!   byline: J.Q. Writer
//!   last_name: Writer
//!   short_title: Novel
//!   story_type: novel
//!   word_count: 85000
//!   file_name: my_novel.docx
//!   include_title_page: true
//! structure:
//!   - type: part
//!     title: The Beginning
//!     content:
//!       - number: 1
//!         title: Arrival
//!         files: [ch1/a.md, ch1/b.md]
//!   - type: chapter
//!     number: 2
//!     file: ch2.md
//!   - type: text
//!     file: afterword.md
//! ```
//!
//! The configuration is forgiving: an entry of `structure` which cannot be understood
//! is skipped with a warning rather than failing the whole manuscript.
use manuscript_ast::{Author, Chapter, ChapterNumber, Item, Metadata, Outline, Part, StoryType, TextItem};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::PathBuf;
use tracing::warn;

/// Any yaml scalar, for fields which are text but may be written as a number
/// (a phone number, or a title like `1984`)
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
	/// a string
	Text(String),
	/// an integer
	Integer(i64),
	/// a float
	Float(f64),
	/// a boolean
	Bool(bool),
}

impl From<Scalar> for String {
	fn from(src: Scalar) -> Self {
		match src {
			Scalar::Text(s) => s,
			Scalar::Integer(i) => i.to_string(),
			Scalar::Float(f) => f.to_string(),
			Scalar::Bool(b) => b.to_string(),
		}
	}
}

impl From<Scalar> for ChapterNumber {
	fn from(src: Scalar) -> Self {
		match src {
			Scalar::Integer(i) => ChapterNumber::Integer(i),
			other => ChapterNumber::Text(other.into()),
		}
	}
}

fn text(src: Option<Scalar>) -> Option<String> {
	src.map(String::from)
}

/// The author's contact details
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DeserializableAuthor {
	pub legal_name: Option<Scalar>,
	pub address: Option<Scalar>,
	pub street_address: Option<Scalar>,
	pub city_state_zip: Option<Scalar>,
	pub phone: Option<Scalar>,
	pub email: Option<Scalar>,
}

impl From<DeserializableAuthor> for Author {
	fn from(src: DeserializableAuthor) -> Self {
		Author {
			legal_name: text(src.legal_name),
			address: text(src.address),
			street_address: text(src.street_address),
			city_state_zip: text(src.city_state_zip),
			phone: text(src.phone),
			email: text(src.email),
		}
	}
}

/// Title, byline and options
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DeserializableMetadata {
	/// the title
	pub title: Option<Scalar>,
	/// the name to publish under
	pub byline: Option<Scalar>,
	/// the author's surname, for running headers
	pub last_name: Option<Scalar>,
	/// a short title, for running headers
	pub short_title: Option<Scalar>,
	/// `novel` or `short_story`, in any case
	pub story_type: Option<String>,
	/// an advisory word count, shown until the real count is known
	pub word_count: Option<usize>,
	/// the name of the docx file to write
	pub file_name: Option<String>,
	/// whether to begin with a title page; defaults to true
	pub include_title_page: Option<bool>,
}

impl From<DeserializableMetadata> for Metadata {
	fn from(src: DeserializableMetadata) -> Self {
		let story_type = match src.story_type {
			None => StoryType::default(),
			Some(s) => s.parse::<StoryType>().unwrap_or_else(|e| {
				warn!("{}; treating as {}", e, StoryType::default());
				StoryType::default()
			}),
		};

		Metadata {
			title: text(src.title),
			byline: text(src.byline),
			last_name: text(src.last_name),
			short_title: text(src.short_title),
			story_type,
			word_count: src.word_count,
			file_name: src.file_name,
			include_title_page: src.include_title_page.unwrap_or(true),
		}
	}
}

/// A chapter, either at the top level or within a part
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DeserializableChapter {
	/// a number or text like `Three`
	pub number: Option<Scalar>,
	/// the chapter title
	pub title: Option<Scalar>,
	/// a single source file
	pub file: Option<PathBuf>,
	/// several source files, separated by scene breaks
	pub files: Option<Vec<PathBuf>>,
}

/// Running text without a heading
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DeserializableText {
	/// a single source file
	pub file: Option<PathBuf>,
	/// several source files, separated by scene breaks
	pub files: Option<Vec<PathBuf>>,
}

/// A titled group of chapters
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DeserializablePart {
	/// the title of the part
	pub title: Option<Scalar>,
	/// the chapters of the part; each is checked separately
	pub content: Option<Vec<Value>>,
}

/// A top-level entry of `structure`, distinguished by its `type`
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum DeserializableItem {
	Part(DeserializablePart),
	Chapter(DeserializableChapter),
	Text(DeserializableText),
}

/// `file` takes precedence over `files`
fn fragments(file: Option<PathBuf>, files: Option<Vec<PathBuf>>) -> Vec<PathBuf> {
	match (file, files) {
		(Some(file), Some(_)) => {
			warn!("Both `file` and `files` given; using `file` ({}) and ignoring `files`", file.display());
			vec![file]
		},
		(Some(file), None) => vec![file],
		(None, files) => files.unwrap_or_default(),
	}
}

impl From<DeserializableChapter> for Chapter {
	fn from(src: DeserializableChapter) -> Self {
		Chapter {
			number: src.number.map(ChapterNumber::from),
			title: text(src.title),
			fragments: fragments(src.file, src.files),
		}
	}
}

impl From<DeserializableText> for TextItem {
	fn from(src: DeserializableText) -> Self {
		TextItem {
			fragments: fragments(src.file, src.files),
		}
	}
}

impl From<DeserializablePart> for Part {
	fn from(src: DeserializablePart) -> Self {
		let chapters = src.content
			.unwrap_or_default()
			.into_iter()
			.enumerate()
			.filter_map(|(i, value)| match serde_yaml::from_value::<DeserializableChapter>(value) {
				Ok(chapter) => Some(Chapter::from(chapter)),
				Err(e) => {
					warn!("Skipping chapter {} of part: {}", i + 1, e);
					None
				}
			})
			.collect();

		Part {
			title: text(src.title),
			chapters,
		}
	}
}

impl From<DeserializableItem> for Item {
	fn from(src: DeserializableItem) -> Self {
		match src {
			DeserializableItem::Part(p) => Item::Part(p.into()),
			DeserializableItem::Chapter(c) => Item::Chapter(c.into()),
			DeserializableItem::Text(t) => Item::Text(t.into()),
		}
	}
}

/// A complete configuration file
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DeserializableConfig {
	/// contact details
	pub author: Option<DeserializableAuthor>,
	/// title, byline and options
	pub metadata: Option<DeserializableMetadata>,
	/// the items of the manuscript; each is checked separately
	pub structure: Option<Vec<Value>>,
}

impl DeserializableConfig {
	/// Parse a configuration from yaml source
	pub fn new(src: &str) -> Result<Self, serde_yaml::Error> {
		if src.trim().is_empty() {
			return Ok(Self::default());
		}
		let config: Option<Self> = serde_yaml::from_str(src)?;
		Ok(config.unwrap_or_default())
	}

	/// Convert into an outline, skipping any structure entries which cannot be understood
	pub fn into_outline(self) -> Outline {
		let structure = self.structure
			.unwrap_or_default()
			.into_iter()
			.enumerate()
			.filter_map(|(i, value)| match serde_yaml::from_value::<DeserializableItem>(value) {
				Ok(item) => Some(Item::from(item)),
				Err(e) => {
					warn!("Skipping structure entry {}: {}", i + 1, e);
					None
				}
			})
			.collect();

		Outline {
			author: self.author.unwrap_or_default().into(),
			metadata: self.metadata.unwrap_or_default().into(),
			structure,
		}
	}
}
