use std::collections::HashSet;
use tracing::{debug, warn};

use crate::api::ItemSource;
use crate::error::Result;
use crate::internal::filter::CommentFilter;
use crate::internal::models::Item;
use crate::internal::output::Renderer;

enum Node {
    Fetched(Item),
    Pending(u32),
}

/// Depth-first printer for a comment thread.
///
/// Children are fetched one at a time, right before they are printed, so
/// output streams in thread order. The traversal keeps its own stack instead
/// of recursing, and each entry carries its depth.
pub struct CommentTreeWalker<'a, S: ItemSource + ?Sized> {
    source: &'a S,
    max_depth: Option<usize>,
}

impl<'a, S: ItemSource + ?Sized> CommentTreeWalker<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_depth: None,
        }
    }

    /// Stop descending below `depth`. `None` walks the whole thread.
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Print `root` and every reply under it that passes `filter`.
    ///
    /// Deleted or dead comments, and items without text, are not printed
    /// but their replies still are. A failed fetch stops the walk; whatever was
    /// already printed stays printed.
    pub fn walk<R: Renderer + ?Sized>(
        &self,
        root: Item,
        filter: &CommentFilter,
        renderer: &mut R,
    ) -> Result<usize> {
        let mut stack = vec![(Node::Fetched(root), 0usize)];
        let mut visited = HashSet::new();
        let mut printed = 0;

        while let Some((node, depth)) = stack.pop() {
            let item = match node {
                Node::Fetched(item) => item,
                Node::Pending(id) if visited.contains(&id) => {
                    warn!(id, depth, "Comment already visited, skipping cycle");
                    continue;
                }
                Node::Pending(id) => {
                    debug!(id, depth, "Fetching comment");
                    self.source.get_item(id)?
                }
            };
            visited.insert(item.id);

            if is_printable(&item) && filter.matches(&item)? {
                renderer.comment(&item, depth)?;
                printed += 1;
            }

            if item.kids.is_empty() {
                continue;
            }
            if self.max_depth.is_some_and(|max| depth >= max) {
                debug!(id = item.id, depth, "Depth limit reached, not descending");
                continue;
            }

            stack.extend(
                item.kids
                    .iter()
                    .rev()
                    .map(|&kid| (Node::Pending(kid), depth + 1)),
            );
        }

        Ok(printed)
    }
}

fn is_printable(item: &Item) -> bool {
    item.text.is_some() && !item.dead && !item.deleted
}
