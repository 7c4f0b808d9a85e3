use std::fmt;
use std::str::FromStr;

static DEFAULT_TITLE: &str = "Untitled Novel";
static DEFAULT_BYLINE: &str = "Anonymous";
static DEFAULT_LAST_NAME: &str = "Author";
static DEFAULT_SHORT_TITLE: &str = "Manuscript";

/// Whether a work is a novel or a short story.
///
/// This changes the granularity of breaks, not their presence:
/// a novel puts each chapter on a new page, while a short story
/// separates them with blank lines and lets the text begin on the title page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoryType {
    /// chapters begin on new pages
    #[default]
    Novel,
    /// chapters are separated by spacing alone
    ShortStory,
}

impl FromStr for StoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "novel" => Ok(StoryType::Novel),
            "short_story" | "short story" | "short-story" => Ok(StoryType::ShortStory),
            other => Err(format!("Unknown story type: {}", other)),
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryType::Novel => f.write_str("novel"),
            StoryType::ShortStory => f.write_str("short_story"),
        }
    }
}

/// The metadata of a particular manuscript
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// The main title of this work
    pub title: Option<String>,
    /// The name the work is to be published under
    pub byline: Option<String>,
    /// The author's surname, for running headers
    pub last_name: Option<String>,
    /// A short form of the title, for running headers
    pub short_title: Option<String>,
    /// Novel or short story
    pub story_type: StoryType,
    /// An advisory word count, shown until the real count is known
    pub word_count: Option<usize>,
    /// The name of the output file, where the output format allows one
    pub file_name: Option<String>,
    /// Whether to begin with a title page
    pub include_title_page: bool,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            title: None,
            byline: None,
            last_name: None,
            short_title: None,
            story_type: StoryType::default(),
            word_count: None,
            file_name: None,
            include_title_page: true,
        }
    }
}

impl Metadata {
    /// Get the title, or a placeholder
    pub fn get_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Get the byline, or a placeholder
    pub fn get_byline(&self) -> &str {
        self.byline.as_deref().unwrap_or(DEFAULT_BYLINE)
    }

    /// Get the author's surname, or a placeholder
    pub fn get_last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or(DEFAULT_LAST_NAME)
    }

    /// Get the short title, or a placeholder
    pub fn get_short_title(&self) -> &str {
        self.short_title.as_deref().unwrap_or(DEFAULT_SHORT_TITLE)
    }
}

/// The author's contact details, as printed on a title page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Author {
    /// The author's legal name, as opposed to any pen name
    pub legal_name: Option<String>,
    /// A full postal address, possibly over several lines
    pub address: Option<String>,
    /// The street line of an address
    pub street_address: Option<String>,
    /// The city, state and zip line of an address
    pub city_state_zip: Option<String>,
    /// A phone number
    pub phone: Option<String>,
    /// An email address
    pub email: Option<String>,
}

impl Author {
    /// The lines of the contact block, in order, skipping anything missing or blank
    pub fn contact_lines(&self) -> Vec<&str> {
        let lines = [
            self.legal_name.as_deref(),
            self.address.as_deref(),
            self.street_address.as_deref(),
            self.city_state_zip.as_deref(),
            self.phone.as_deref(),
            self.email.as_deref(),
        ];
        lines
            .iter()
            .copied()
            .flatten()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}
