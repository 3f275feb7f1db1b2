use tracing::{debug, info};

use crate::api::{ItemSource, StoryListType};
use crate::error::Result;
use crate::internal::output::Renderer;
use crate::internal::session::SessionIndex;

/// Prints numbered story rows and records which id sits behind each number.
pub struct ListPresenter<'a, S: ItemSource + ?Sized, R: Renderer + ?Sized> {
    source: &'a S,
    renderer: &'a mut R,
    session: &'a mut SessionIndex,
}

impl<'a, S: ItemSource + ?Sized, R: Renderer + ?Sized> ListPresenter<'a, S, R> {
    pub fn new(source: &'a S, renderer: &'a mut R, session: &'a mut SessionIndex) -> Self {
        Self {
            source,
            renderer,
            session,
        }
    }

    /// Fetch the ids of `list_type`, keep the first `limit` and present them.
    pub fn present_list(&mut self, list_type: StoryListType, limit: usize) -> Result<usize> {
        let mut ids = self.source.get_list_ids(list_type)?;
        ids.truncate(limit);
        info!(list = %list_type, count = ids.len(), "Presenting list");
        self.present(list_type.heading(), &ids)
    }

    /// Print `heading`, then one row per titled item in `ids`, then save the
    /// session index and print the usage tip.
    ///
    /// Untitled items are skipped without using up a number. Returns the
    /// number of rows printed.
    pub fn present(&mut self, heading: &str, ids: &[u32]) -> Result<usize> {
        self.session.reset();
        self.renderer.heading(heading)?;

        let mut index = 1;
        for &id in ids {
            let item = self.source.get_item(id)?;
            if !item.has_title() {
                debug!(id, "Skipping untitled item");
                continue;
            }
            self.renderer.story_row(index, &item)?;
            self.session.append(item.id);
            index += 1;
        }

        self.session.save()?;
        self.renderer.tip()?;
        Ok(index - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::models::Item;
    use crate::internal::walker::tests::{MemorySource, Recorder};
    use tempfile::TempDir;

    fn story(id: u32, title: Option<&str>) -> Item {
        Item {
            id,
            title: title.map(str::to_string),
            by: Some("author".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn untitled_items_do_not_consume_a_number() {
        let dir = TempDir::new().unwrap();
        let source = MemorySource::with(vec![
            story(10, Some("first")),
            story(20, None),
            story(30, Some("third")),
        ]);
        let mut rec = Recorder::default();
        let mut session = SessionIndex::new(dir.path());

        let rows = ListPresenter::new(&source, &mut rec, &mut session)
            .present("Top Stories", &[10, 20, 30])
            .unwrap();

        assert_eq!(rows, 2);
        assert_eq!(rec.rows, vec![(1, 10), (2, 30)]);
        assert_eq!(session.ids(), &[10, 30]);
        assert_eq!(rec.headings, vec!["Top Stories".to_string()]);
        assert_eq!(rec.tips, 1);

        let restored = SessionIndex::restore(dir.path()).unwrap();
        assert_eq!(restored.ids(), &[10, 30]);
    }

    #[test]
    fn present_list_truncates_to_limit() {
        let dir = TempDir::new().unwrap();
        let mut source = MemorySource::with(vec![
            story(1, Some("a")),
            story(2, Some("b")),
            story(3, Some("c")),
        ]);
        source
            .lists
            .insert(StoryListType::Best.to_string(), vec![1, 2, 3]);
        let mut rec = Recorder::default();
        let mut session = SessionIndex::new(dir.path());

        let rows = ListPresenter::new(&source, &mut rec, &mut session)
            .present_list(StoryListType::Best, 2)
            .unwrap();

        assert_eq!(rows, 2);
        assert_eq!(rec.headings, vec!["Best Stories".to_string()]);
        assert_eq!(*source.fetched.borrow(), vec![1, 2]);
    }

    #[test]
    fn fetch_failure_aborts_before_saving() {
        let dir = TempDir::new().unwrap();
        let source = MemorySource::with(vec![story(1, Some("a"))]);
        let mut rec = Recorder::default();
        let mut session = SessionIndex::new(dir.path());

        let result = ListPresenter::new(&source, &mut rec, &mut session).present("New", &[1, 404]);

        assert!(result.is_err());
        assert_eq!(rec.tips, 0);
        assert!(SessionIndex::restore(dir.path()).is_err());
    }

    #[test]
    fn new_listing_replaces_previous_index() {
        let dir = TempDir::new().unwrap();
        let source = MemorySource::with(vec![story(1, Some("a")), story(2, Some("b"))]);
        let mut rec = Recorder::default();
        let mut session = SessionIndex::new(dir.path());

        let mut presenter = ListPresenter::new(&source, &mut rec, &mut session);
        presenter.present("Top", &[1, 2]).unwrap();
        presenter.present("Top", &[2]).unwrap();

        assert_eq!(SessionIndex::restore(dir.path()).unwrap().ids(), &[2]);
    }
}
