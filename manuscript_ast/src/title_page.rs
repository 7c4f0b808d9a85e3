use crate::document::{BlockId, Manuscript, Paragraph};
use crate::metadata::{Author, Metadata, StoryType};
use smart_markup::smarten;

/// blank lines between the contact row and the title
const TITLE_DROP: usize = 8;
/// blank lines between the byline and the opening of a short story
const SHORT_STORY_GAP: usize = 3;

/// Lay out a standard manuscript title page: contact details and word count,
/// then the title and byline some way down the page.
///
/// A novel's title page stands alone; a short story begins on the same page.
///
/// Returns the contact row, whose word count is a placeholder
/// until the whole manuscript has been assembled.
pub fn render_title_page(author: &Author, metadata: &Metadata, manuscript: &mut Manuscript) -> BlockId {
    let contact = author
        .contact_lines()
        .into_iter()
        .map(|line| smarten(line).into_owned())
        .collect();
    let table = manuscript.add_contact_table(contact, metadata.word_count.unwrap_or(0));

    for _ in 0..TITLE_DROP {
        let _ = manuscript.add_spacer();
    }

    let title = smarten(metadata.get_title()).to_uppercase();
    let _ = manuscript.add_paragraph(Paragraph::centered_bold(title));
    let byline = format!("by\n{}", smarten(metadata.get_byline()));
    let _ = manuscript.add_paragraph(Paragraph::centered(byline));

    match metadata.story_type {
        StoryType::Novel => {
            let _ = manuscript.add_page_break();
        }
        StoryType::ShortStory => {
            for _ in 0..SHORT_STORY_GAP {
                let _ = manuscript.add_spacer();
            }
        }
    }

    table
}
