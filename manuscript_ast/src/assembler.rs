//! Walking an outline to build a manuscript.
use crate::document::{Manuscript, Paragraph, RunningHeader, END_MARK, SCENE_BREAK};
use crate::fragment::FragmentSource;
use crate::metadata::StoryType;
use crate::outline::{Chapter, Item, Outline, Part, TextItem};
use crate::title_page::render_title_page;
use manuscript_common::round_to_nearest_hundred;
use smart_markup::{parse_inline, smarten};
use std::path::PathBuf;
use tracing::{debug, info};

static DEFAULT_PART_TITLE: &str = "Untitled Part";

/// Add each fragment as body paragraphs, with a scene break between consecutive fragments
fn process_fragments<F: FragmentSource>(fragments: &[PathBuf], source: &F, manuscript: &mut Manuscript) {
    for (i, path) in fragments.iter().enumerate() {
        if i > 0 {
            let _ = manuscript.add_paragraph(Paragraph::centered(SCENE_BREAK));
        }
        for line in source.load(path) {
            let _ = manuscript.add_paragraph(Paragraph::body(parse_inline(&line)));
        }
    }
}

/// Add a chapter: its heading, if it has one, followed by its fragments
pub fn process_chapter<F: FragmentSource>(chapter: &Chapter, source: &F, manuscript: &mut Manuscript) {
    if let Some(heading) = chapter.heading() {
        debug!("Adding chapter: {}", heading);
        let _ = manuscript.add_paragraph(Paragraph::centered_bold(smarten(&heading)));
        let _ = manuscript.add_spacer();
    }
    process_fragments(&chapter.fragments, source, manuscript);
}

/// Add running text with no heading
pub fn process_text<F: FragmentSource>(text: &TextItem, source: &F, manuscript: &mut Manuscript) {
    process_fragments(&text.fragments, source, manuscript);
}

/// Add a part: its title, then each of its chapters.
/// Chapters after the first are preceded by a division break.
pub fn process_part<F: FragmentSource>(
    part: &Part,
    story_type: StoryType,
    source: &F,
    manuscript: &mut Manuscript,
) {
    let title = part.title.as_deref().unwrap_or(DEFAULT_PART_TITLE);
    debug!("Adding part: {}", title);
    let _ = manuscript.add_paragraph(Paragraph::centered_bold(smarten(title).to_uppercase()));
    let _ = manuscript.add_spacer();

    for (i, chapter) in part.chapters.iter().enumerate() {
        if i > 0 {
            let _ = manuscript.add_division_break(story_type);
        }
        process_chapter(chapter, source, manuscript);
    }
}

/// Assemble a complete manuscript from an outline:
/// the title page if requested, each item in order with a division break
/// between items, and the closing end mark.
///
/// Once the body is complete the title page's word count is replaced
/// with the real count, rounded to the nearest hundred.
pub fn assemble<F: FragmentSource>(outline: &Outline, source: &F) -> Manuscript {
    let metadata = &outline.metadata;
    let story_type = metadata.story_type;

    let mut manuscript = Manuscript::new(
        metadata.get_title(),
        metadata.get_byline(),
        RunningHeader {
            last_name: metadata.get_last_name().to_string(),
            short_title: metadata.get_short_title().to_string(),
        },
    );

    let contact_table = if metadata.include_title_page {
        Some(render_title_page(&outline.author, metadata, &mut manuscript))
    } else {
        None
    };

    for (i, item) in outline.structure.iter().enumerate() {
        if i > 0 {
            let _ = manuscript.add_division_break(story_type);
        }
        match item {
            Item::Part(part) => process_part(part, story_type, source, &mut manuscript),
            Item::Chapter(chapter) => process_chapter(chapter, source, &mut manuscript),
            Item::Text(text) => process_text(text, source, &mut manuscript),
        }
    }

    let _ = manuscript.add_page_break();
    let _ = manuscript.add_paragraph(Paragraph::centered(END_MARK));

    if let Some(id) = contact_table {
        let total = manuscript.count_words();
        let rounded = round_to_nearest_hundred(total);
        debug!("Counted {} words; approximately {}", total, rounded);
        let _ = manuscript.fill_word_count(id, rounded);
    }

    info!(
        "Assembled {} items into {} blocks",
        outline.structure.len(),
        manuscript.blocks().len()
    );
    manuscript
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Alignment, Block, Span};
    use crate::metadata::{Author, Metadata};
    use std::collections::HashMap;

    fn files(entries: &[(&str, &str)]) -> HashMap<PathBuf, String> {
        entries
            .iter()
            .map(|(k, v)| (PathBuf::from(k), v.to_string()))
            .collect()
    }

    fn chapter(number: i64, title: &str, fragments: &[&str]) -> Chapter {
        Chapter {
            number: Some(number.into()),
            title: Some(title.to_string()),
            fragments: fragments.iter().map(PathBuf::from).collect(),
        }
    }

    fn outline(story_type: StoryType, include_title_page: bool, structure: Vec<Item>) -> Outline {
        Outline {
            author: Author::default(),
            metadata: Metadata {
                title: Some("My Test Novel".into()),
                byline: Some("Test Author".into()),
                story_type,
                include_title_page,
                ..Default::default()
            },
            structure,
        }
    }

    /// a compact picture of a manuscript's blocks
    fn shape(m: &Manuscript) -> Vec<String> {
        m.blocks()
            .iter()
            .map(|block| match block {
                Block::PageBreak => "<page>".to_string(),
                Block::ContactTable(t) => format!("<contact {}>", t.word_count),
                Block::Paragraph(p) if p.is_empty() => "<blank>".to_string(),
                Block::Paragraph(p) => p.text(),
            })
            .collect()
    }

    #[test]
    fn chapter_with_scene_breaks() {
        let source = files(&[("a.md", "A"), ("b.md", "B"), ("c.md", "C")]);
        let o = outline(
            StoryType::Novel,
            false,
            vec![Item::Chapter(chapter(1, "One", &["a.md", "b.md", "c.md"]))],
        );
        let m = assemble(&o, &source);
        assert_eq!(
            shape(&m),
            vec!["Chapter 1: One", "<blank>", "A", "#", "B", "#", "C", "<page>", "#  #  #"]
        );
        let breaks = m
            .paragraphs()
            .filter(|p| p.text() == "#" && p.alignment == Alignment::Center)
            .count();
        assert_eq!(breaks, 2);
    }

    #[test]
    fn part_breaks_only_between_chapters() {
        let source = files(&[("a.md", "A"), ("b.md", "B")]);
        let part = Part {
            title: Some("the beginning".into()),
            chapters: vec![chapter(1, "One", &["a.md"]), chapter(2, "Two", &["b.md"])],
        };

        let m = assemble(&outline(StoryType::Novel, false, vec![Item::Part(part.clone())]), &source);
        assert_eq!(
            shape(&m),
            vec![
                "THE BEGINNING", "<blank>",
                "Chapter 1: One", "<blank>", "A",
                "<page>",
                "Chapter 2: Two", "<blank>", "B",
                "<page>", "#  #  #"
            ]
        );

        let m = assemble(&outline(StoryType::ShortStory, false, vec![Item::Part(part)]), &source);
        assert_eq!(
            shape(&m),
            vec![
                "THE BEGINNING", "<blank>",
                "Chapter 1: One", "<blank>", "A",
                "<blank>",
                "Chapter 2: Two", "<blank>", "B",
                "<page>", "#  #  #"
            ]
        );
    }

    #[test]
    fn missing_fragment_contributes_nothing() {
        let source = files(&[("b.md", "B")]);
        let o = outline(
            StoryType::Novel,
            false,
            vec![
                Item::Text(TextItem {
                    fragments: vec![PathBuf::from("missing.md")],
                }),
                Item::Text(TextItem {
                    fragments: vec![PathBuf::from("b.md")],
                }),
            ],
        );
        let m = assemble(&o, &source);
        assert_eq!(shape(&m), vec!["<page>", "B", "<page>", "#  #  #"]);
    }

    #[test]
    fn untitled_part() {
        let source = files(&[]);
        let o = outline(StoryType::Novel, false, vec![Item::Part(Part::default())]);
        let m = assemble(&o, &source);
        assert_eq!(shape(&m)[0], "UNTITLED PART");
    }

    #[test]
    fn body_text_is_formatted() {
        let source = files(&[("a.md", "She was **very** \"sure\" -- wasn't she?")]);
        let o = outline(
            StoryType::Novel,
            false,
            vec![Item::Text(TextItem {
                fragments: vec![PathBuf::from("a.md")],
            })],
        );
        let m = assemble(&o, &source);
        match &m.blocks()[0] {
            Block::Paragraph(p) => {
                assert_eq!(
                    p.spans,
                    vec![
                        Span::plain("She was "),
                        Span::bold("very"),
                        Span::plain(" “sure” — wasn’t she?"),
                    ]
                );
            }
            other => panic!("expected a paragraph, got {:?}", other),
        }
    }

    #[test]
    fn word_count_is_backfilled() {
        let long_text = vec!["word"; 180].join(" ");
        let source = files(&[("a.md", long_text.as_str())]);
        let o = outline(
            StoryType::Novel,
            true,
            vec![Item::Chapter(chapter(1, "The First Chapter", &["a.md"]))],
        );
        let m = assemble(&o, &source);

        // 180 body words, plus title, byline, heading and end mark
        assert_eq!(m.count_words(), 180 + 3 + 3 + 5 + 3);
        assert_eq!(shape(&m)[0], "<contact 200>");
    }

    #[test]
    fn specimen_novel() {
        let source = files(&[
            ("a.md", "first part of the first chapter"),
            ("b.md", "second part of the first chapter"),
        ]);
        let o = outline(
            StoryType::Novel,
            true,
            vec![Item::Chapter(chapter(1, "The First Chapter", &["a.md", "b.md"]))],
        );
        let m = assemble(&o, &source);
        let shape = shape(&m);

        let position = |text: &str| shape.iter().position(|s| s == text);
        let title = position("MY TEST NOVEL").unwrap();
        let byline = position("by\nTest Author").unwrap();
        let heading = position("Chapter 1: The First Chapter").unwrap();
        let first = position("first part of the first chapter").unwrap();
        let scene = position("#").unwrap();
        let second = position("second part of the first chapter").unwrap();
        let end = position("#  #  #").unwrap();

        assert!(title < byline);
        assert!(byline < heading);
        assert!(heading < first);
        assert!(first < scene);
        assert!(scene < second);
        assert!(second < end);
        assert_eq!(end, shape.len() - 1);
        assert_eq!(shape[0], "<contact 0>");
    }
}
