//! The in-memory manuscript which renderers consume.
//!
//! A `Manuscript` is a flat list of blocks in reading order.
//! It offers only the primitives the assembler needs:
//! add a paragraph, add a break, and patch the title page's word count
//! once the body is known.
use crate::metadata::StoryType;
use manuscript_common::{count_words, format_thousands};
pub use smart_markup::Span;

/// The marker placed between two fragments of one chapter
pub const SCENE_BREAK: &str = "#";
/// The marker which closes a manuscript
pub const END_MARK: &str = "#  #  #";

/// Horizontal alignment of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a paragraph is set on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphStyle {
    /// no indent, single spacing
    #[default]
    Plain,
    /// manuscript body text: half-inch first-line indent,
    /// double line spacing, no space before or after
    Body,
}

/// A paragraph of styled text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// horizontal alignment
    pub alignment: Alignment,
    /// indent and spacing
    pub style: ParagraphStyle,
    /// the runs of text, in order
    pub spans: Vec<Span>,
}

impl Paragraph {
    /// Create a new paragraph
    pub fn new(alignment: Alignment, style: ParagraphStyle, spans: Vec<Span>) -> Self {
        Paragraph {
            alignment,
            style,
            spans,
        }
    }

    /// An empty paragraph, used for vertical space
    pub fn spacer() -> Self {
        Paragraph::default()
    }

    /// A body paragraph
    pub fn body(spans: Vec<Span>) -> Self {
        Paragraph::new(Alignment::Left, ParagraphStyle::Body, spans)
    }

    /// A centred paragraph of unstyled text
    pub fn centered<S: Into<String>>(text: S) -> Self {
        Paragraph::new(Alignment::Center, ParagraphStyle::Plain, vec![Span::plain(text)])
    }

    /// A centred paragraph in bold, as used for titles and headings
    pub fn centered_bold<S: Into<String>>(text: S) -> Self {
        Paragraph::new(Alignment::Center, ParagraphStyle::Plain, vec![Span::bold(text)])
    }

    /// The plain text of this paragraph
    pub fn text(&self) -> String {
        smart_markup::spans_to_string(&self.spans)
    }

    /// Whether this paragraph has no text
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}

/// The two-cell row at the top of a title page:
/// the author's contact details on the left, the word count on the right
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactTable {
    /// contact lines, top to bottom
    pub contact: Vec<String>,
    /// the approximate number of words in the manuscript
    pub word_count: usize,
}

impl ContactTable {
    /// The line shown in the right-hand cell
    /// ```
    /// # use manuscript_ast::ContactTable;
    /// let table = ContactTable { contact: Vec::new(), word_count: 85300 };
    /// assert_eq!(table.word_count_line(), "Approx. 85,300 words");
    /// ```
    pub fn word_count_line(&self) -> String {
        format!("Approx. {} words", format_thousands(self.word_count))
    }
}

/// A single block of the manuscript
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// a paragraph of text
    Paragraph(Paragraph),
    /// a hard page break
    PageBreak,
    /// the contact and word-count row of a title page
    ContactTable(ContactTable),
}

/// A handle to a block previously added to a `Manuscript`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockId(usize);

/// The text of the header on every page but the first:
/// `Last name | Short title | page`
#[derive(Debug, Clone, PartialEq)]
pub struct RunningHeader {
    /// the author's surname
    pub last_name: String,
    /// a short form of the title, set in italic
    pub short_title: String,
}

/// Physical page setup.
/// Measures are in twips (twentieths of a point), font size in half-points.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct PageSetup {
    pub font: String,
    pub font_size_half_points: u32,
    pub page_width: u32,
    pub page_height: u32,
    pub margin: u32,
    pub header_distance: u32,
}

impl Default for PageSetup {
    /// US Letter, one inch margins, 12pt Times New Roman
    fn default() -> Self {
        PageSetup {
            font: "Times New Roman".to_string(),
            font_size_half_points: 24,
            page_width: 12240,
            page_height: 15840,
            margin: 1440,
            header_distance: 720,
        }
    }
}

/// A manuscript ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Manuscript {
    /// the title, for document properties
    pub title: String,
    /// the author, for document properties
    pub creator: String,
    /// the header on continuation pages
    pub running_header: RunningHeader,
    /// page size, margins and font
    pub page_setup: PageSetup,
    blocks: Vec<Block>,
}

impl Manuscript {
    /// Create an empty manuscript
    pub fn new<S: Into<String>, C: Into<String>>(
        title: S,
        creator: C,
        running_header: RunningHeader,
    ) -> Self {
        Manuscript {
            title: title.into(),
            creator: creator.into(),
            running_header,
            page_setup: PageSetup::default(),
            blocks: Vec::new(),
        }
    }

    /// The blocks of this manuscript, in order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The paragraphs of this manuscript, in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    fn push(&mut self, block: Block) -> BlockId {
        self.blocks.push(block);
        BlockId(self.blocks.len() - 1)
    }

    /// Append a paragraph
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> BlockId {
        self.push(Block::Paragraph(paragraph))
    }

    /// Append an empty paragraph
    pub fn add_spacer(&mut self) -> BlockId {
        self.add_paragraph(Paragraph::spacer())
    }

    /// Append a hard page break
    pub fn add_page_break(&mut self) -> BlockId {
        self.push(Block::PageBreak)
    }

    /// Append the break between two divisions of the work:
    /// a page break in a novel, a blank line in a short story
    pub fn add_division_break(&mut self, story_type: StoryType) -> BlockId {
        match story_type {
            StoryType::Novel => self.add_page_break(),
            StoryType::ShortStory => self.add_spacer(),
        }
    }

    /// Append a contact table
    pub fn add_contact_table(&mut self, contact: Vec<String>, word_count: usize) -> BlockId {
        self.push(Block::ContactTable(ContactTable {
            contact,
            word_count,
        }))
    }

    /// Count the words in every paragraph; the contact table is not counted.
    /// A paragraph is counted as a whole, so emphasis inside a word does not split it.
    pub fn count_words(&self) -> usize {
        self.paragraphs().map(|p| count_words(&p.text())).sum()
    }

    /// Set the word count of a contact table added earlier.
    /// Returns false if `id` does not refer to a contact table.
    pub fn fill_word_count(&mut self, id: BlockId, word_count: usize) -> bool {
        match self.blocks.get_mut(id.0) {
            Some(Block::ContactTable(table)) => {
                table.word_count = word_count;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Manuscript {
        Manuscript::new(
            "Title",
            "Anon",
            RunningHeader {
                last_name: "Anon".into(),
                short_title: "Title".into(),
            },
        )
    }

    #[test]
    fn division_breaks() {
        let mut m = empty();
        let _ = m.add_division_break(StoryType::Novel);
        let _ = m.add_division_break(StoryType::ShortStory);
        assert_eq!(
            m.blocks(),
            &[Block::PageBreak, Block::Paragraph(Paragraph::spacer())]
        );
    }

    #[test]
    fn word_count_excludes_contact_table() {
        let mut m = empty();
        let table = m.add_contact_table(vec!["Jane Q. Writer".into(), "1 Main St".into()], 0);
        let _ = m.add_paragraph(Paragraph::body(vec![
            Span::plain("one "),
            Span::italic("two"),
            Span::plain(" three"),
        ]));
        let _ = m.add_page_break();
        let _ = m.add_paragraph(Paragraph::centered(END_MARK));
        assert_eq!(m.count_words(), 6);

        assert!(m.fill_word_count(table, 100));
        match &m.blocks()[0] {
            Block::ContactTable(t) => assert_eq!(t.word_count_line(), "Approx. 100 words"),
            other => panic!("expected a contact table, got {:?}", other),
        }
    }

    #[test]
    fn emphasis_within_words_does_not_split_them() {
        let mut m = empty();
        let _ = m.add_paragraph(Paragraph::body(smart_markup::parse_inline(
            "un*believ*able **b**old",
        )));
        let _ = m.add_paragraph(Paragraph::body(vec![
            Span::italic("half"),
            Span::plain("-hearted, "),
            Span::bold("really"),
        ]));
        assert_eq!(m.paragraphs().next().map(Paragraph::text).as_deref(), Some("unbelievable bold"));
        let _ = m.add_paragraph(Paragraph::centered(END_MARK));
        assert_eq!(m.count_words(), 2 + 2 + 3);
    }

    #[test]
    fn fill_word_count_ignores_other_blocks() {
        let mut m = empty();
        let id = m.add_spacer();
        assert!(!m.fill_word_count(id, 100));
    }

    #[test]
    fn paragraph_text() {
        let p = Paragraph::body(vec![Span::plain("a "), Span::bold("b")]);
        assert_eq!(p.text(), "a b");
        assert!(!p.is_empty());
        assert!(Paragraph::spacer().is_empty());
    }
}
