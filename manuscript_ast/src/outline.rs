use crate::metadata::{Author, Metadata};
use std::fmt;
use std::path::PathBuf;

/// A chapter number, which may be given as a number or as text
/// (`Chapter 3`, `Chapter Three`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterNumber {
    /// a numeral
    Integer(i64),
    /// anything else
    Text(String),
}

impl fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterNumber::Integer(n) => write!(f, "{}", n),
            ChapterNumber::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ChapterNumber {
    fn from(n: i64) -> Self {
        ChapterNumber::Integer(n)
    }
}

impl From<&str> for ChapterNumber {
    fn from(s: &str) -> Self {
        ChapterNumber::Text(s.to_string())
    }
}

/// A chapter: an optional heading over a sequence of fragments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chapter {
    /// the chapter number
    pub number: Option<ChapterNumber>,
    /// the chapter title
    pub title: Option<String>,
    /// source files, in reading order
    pub fragments: Vec<PathBuf>,
}

impl Chapter {
    /// The heading for this chapter, if it has a number or a title.
    ///
    /// ```
    /// # use manuscript_ast::Chapter;
    /// let chapter = Chapter {
    ///     number: Some(1.into()),
    ///     title: Some("The First Chapter".to_string()),
    ///     fragments: Vec::new(),
    /// };
    /// assert_eq!(chapter.heading().as_deref(), Some("Chapter 1: The First Chapter"));
    /// ```
    pub fn heading(&self) -> Option<String> {
        let number = self.number.as_ref().map(|n| format!("Chapter {}", n));
        match (number, self.title.as_deref()) {
            (Some(n), Some(t)) => Some(format!("{}: {}", n, t)),
            (Some(n), None) => Some(n),
            (None, Some(t)) => Some(t.to_string()),
            (None, None) => None,
        }
    }
}

/// Running text with no heading
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextItem {
    /// source files, in reading order
    pub fragments: Vec<PathBuf>,
}

/// A titled group of chapters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Part {
    /// the title of this part
    pub title: Option<String>,
    /// the chapters of this part
    pub chapters: Vec<Chapter>,
}

/// A top-level division of the manuscript
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Item {
    Part(Part),
    Chapter(Chapter),
    Text(TextItem),
}

/// Everything needed to assemble a manuscript
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    /// contact details for the title page
    pub author: Author,
    /// title, byline and options
    pub metadata: Metadata,
    /// the top-level items, in order
    pub structure: Vec<Item>,
}
