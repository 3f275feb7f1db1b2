use serde::Deserialize;

/// A single Hacker News record: a story, job, poll or comment.
///
/// Every field other than `id` may be missing from the API response, so they
/// are all optional and callers fall back to defaults where they render.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Item {
    pub id: u32,
    pub by: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub score: i64,
    pub descendants: Option<u32>,
    /// Submission time in unix seconds.
    #[serde(default, rename = "time")]
    pub submission_time: Option<i64>,
    #[serde(default)]
    pub kids: Vec<u32>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl Item {
    pub fn author(&self) -> &str {
        self.by.as_deref().unwrap_or("[deleted]")
    }

    pub fn comment_count(&self) -> u32 {
        self.descendants.unwrap_or(0)
    }

    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }
}
