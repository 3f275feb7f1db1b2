use regex::Regex;

use crate::error::{BrowseError, Result};
use crate::internal::models::Item;
use crate::utils::datetime::{format_age, now_secs};

/// Regex filter applied to comments while walking a thread.
///
/// A comment matches when the pattern is found in its author, its raw body
/// or its age label. An empty pattern matches everything.
#[derive(Debug, Clone)]
pub struct CommentFilter {
    regex: Option<Regex>,
    now: i64,
}

impl CommentFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_now(pattern, now_secs())
    }

    /// Build a filter whose age labels are computed against `now`.
    pub fn with_now(pattern: &str, now: i64) -> Result<Self> {
        let regex = match pattern.is_empty() {
            true => None,
            false => Some(Regex::new(pattern)?),
        };
        Ok(Self { regex, now })
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Whether `item` should be printed.
    ///
    /// Errors with [`BrowseError::MissingText`] when a real match is needed
    /// and the comment carries no body.
    pub fn matches(&self, item: &Item) -> Result<bool> {
        let Some(re) = &self.regex else {
            return Ok(true);
        };
        let text = item
            .text
            .as_deref()
            .ok_or(BrowseError::MissingText(item.id))?;

        let age = format_age(item.submission_time, self.now);
        let by = item.by.as_deref().unwrap_or_default();

        Ok(re.is_match(by) || re.is_match(text) || re.is_match(&age))
    }
}
