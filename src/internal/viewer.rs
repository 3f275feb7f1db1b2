use tracing::info;

use crate::api::{ItemSource, item_page_url};
use crate::error::{BrowseError, Result};
use crate::internal::filter::CommentFilter;
use crate::internal::output::Renderer;
use crate::internal::session::SessionIndex;
use crate::internal::walker::CommentTreeWalker;

/// What `hn view` should do with the resolved item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Print the comment thread.
    Comments,
    /// Print the linked page as text.
    Page,
}

/// Turns external content into text. Implemented by the API service; tests
/// plug in a canned page.
pub trait PageSource {
    fn render_page(&self, url: &str) -> anyhow::Result<String>;
}

impl PageSource for crate::api::ApiService {
    fn render_page(&self, url: &str) -> anyhow::Result<String> {
        crate::api::ApiService::render_page(self, url)
    }
}

/// Resolves a number from the last listing and shows that item.
pub struct ItemViewer<'a, S: ItemSource + PageSource + ?Sized> {
    source: &'a S,
    session: &'a SessionIndex,
    max_depth: Option<usize>,
}

impl<'a, S: ItemSource + PageSource + ?Sized> ItemViewer<'a, S> {
    pub fn new(source: &'a S, session: &'a SessionIndex) -> Self {
        Self {
            source,
            session,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Show the item at 1-based `index`.
    ///
    /// The pattern is compiled before anything is fetched so a bad regex
    /// fails fast.
    pub fn view<R: Renderer + ?Sized>(
        &self,
        index: usize,
        pattern: &str,
        mode: ViewMode,
        renderer: &mut R,
    ) -> Result<()> {
        let filter = CommentFilter::new(pattern)?;
        let id = self.session.get(index)?;
        let item = self.source.get_item(id)?;
        info!(index, id, ?mode, "Viewing item");

        match mode {
            ViewMode::Comments => {
                renderer.notice(&format!("Fetching Comments from {}", item_page_url(item.id)))?;
                CommentTreeWalker::new(self.source)
                    .with_max_depth(self.max_depth)
                    .walk(item, &filter, renderer)?;
            }
            ViewMode::Page => {
                let url = item.url.as_deref().ok_or(BrowseError::MissingUrl(item.id))?;
                renderer.notice(&format!("Opening {}...", url))?;
                let text = self.source.render_page(url)?;
                renderer.page(&text)?;
            }
        }
        Ok(())
    }

    /// The link `hn view -b` opens: the story url, or the discussion page in
    /// comments mode (and for text posts without a url).
    pub fn browser_url(&self, index: usize, mode: ViewMode) -> Result<String> {
        let id = self.session.get(index)?;
        let item = self.source.get_item(id)?;
        Ok(match (mode, item.url) {
            (ViewMode::Page, Some(url)) => url,
            _ => item_page_url(item.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::models::Item;
    use crate::internal::walker::tests::{MemorySource, Recorder, comment};
    use anyhow::anyhow;
    use tempfile::TempDir;

    impl PageSource for MemorySource {
        fn render_page(&self, url: &str) -> anyhow::Result<String> {
            match url.contains("broken") {
                true => Err(anyhow!("conversion failed for {}", url)),
                false => Ok(format!("text of {}", url)),
            }
        }
    }

    fn fixture() -> (TempDir, SessionIndex, MemorySource) {
        let dir = TempDir::new().unwrap();
        let mut session = SessionIndex::new(dir.path());
        session.append(100);
        session.append(200);
        session.save().unwrap();
        let session = SessionIndex::restore(dir.path()).unwrap();

        let source = MemorySource::with(vec![
            Item {
                id: 100,
                title: Some("Linked".to_string()),
                url: Some("https://example.com/post".to_string()),
                kids: vec![1],
                ..Default::default()
            },
            Item {
                id: 200,
                title: Some("Ask HN: text only".to_string()),
                text: Some("question body".to_string()),
                by: Some("asker".to_string()),
                kids: vec![2],
                ..Default::default()
            },
            comment(1, "alice", "reply one", vec![]),
            comment(2, "bob", "reply two", vec![]),
        ]);
        (dir, session, source)
    }

    #[test]
    fn comments_mode_walks_the_thread() {
        let (_dir, session, source) = fixture();
        let mut rec = Recorder::default();

        ItemViewer::new(&source, &session)
            .view(2, "", ViewMode::Comments, &mut rec)
            .unwrap();

        assert_eq!(
            rec.notices,
            vec!["Fetching Comments from https://news.ycombinator.com/item?id=200".to_string()]
        );
        assert_eq!(rec.comments, vec![(200, 0), (2, 1)]);
    }

    #[test]
    fn page_mode_renders_the_link() {
        let (_dir, session, source) = fixture();
        let mut rec = Recorder::default();

        ItemViewer::new(&source, &session)
            .view(1, "", ViewMode::Page, &mut rec)
            .unwrap();

        assert_eq!(rec.notices, vec!["Opening https://example.com/post...".to_string()]);
        assert_eq!(rec.pages, vec!["text of https://example.com/post".to_string()]);
    }

    #[test]
    fn page_mode_without_url_is_a_typed_error() {
        let (_dir, session, source) = fixture();
        let mut rec = Recorder::default();

        let err = ItemViewer::new(&source, &session)
            .view(2, "", ViewMode::Page, &mut rec)
            .unwrap_err();

        assert!(matches!(err, BrowseError::MissingUrl(200)));
        assert!(rec.pages.is_empty());
    }

    #[test]
    fn out_of_range_index_fetches_nothing() {
        let (_dir, session, source) = fixture();
        let mut rec = Recorder::default();

        for index in [0, 3] {
            let err = ItemViewer::new(&source, &session)
                .view(index, "", ViewMode::Comments, &mut rec)
                .unwrap_err();
            assert!(matches!(err, BrowseError::IndexOutOfRange { len: 2, .. }));
        }
        assert!(source.fetched.borrow().is_empty());
    }

    #[test]
    fn bad_pattern_fails_before_fetching() {
        let (_dir, session, source) = fixture();
        let mut rec = Recorder::default();

        let err = ItemViewer::new(&source, &session)
            .view(1, "(", ViewMode::Comments, &mut rec)
            .unwrap_err();

        assert!(matches!(err, BrowseError::Pattern(_)));
        assert!(source.fetched.borrow().is_empty());
    }

    #[test]
    fn browser_url_prefers_link_in_page_mode() {
        let (_dir, session, source) = fixture();
        let viewer = ItemViewer::new(&source, &session);

        assert_eq!(
            viewer.browser_url(1, ViewMode::Page).unwrap(),
            "https://example.com/post"
        );
        assert_eq!(
            viewer.browser_url(1, ViewMode::Comments).unwrap(),
            "https://news.ycombinator.com/item?id=100"
        );
        assert_eq!(
            viewer.browser_url(2, ViewMode::Page).unwrap(),
            "https://news.ycombinator.com/item?id=200"
        );
    }
}
