use lx_core::Article;

use crate::articles::ArticleList;

/// The article open in the detail panel.
///
/// Holds the id plus a snapshot. Reads go through `current`, which
/// prefers the live entry in the list so flag changes show up in the
/// panel without copying; the snapshot only covers an article that has
/// left the current page.
#[derive(Debug, Clone, Default)]
pub struct DetailSelection {
    selected: Option<Article>,
}

impl DetailSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, article: Article) {
        self.selected = Some(article);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn current<'a>(&'a self, list: &'a ArticleList) -> Option<&'a Article> {
        let snapshot = self.selected.as_ref()?;
        list.get(snapshot.id).or(Some(snapshot))
    }

    /// Refreshes the snapshot from the list after a mutation.
    pub fn sync(&mut self, list: &ArticleList) {
        if let Some(snapshot) = self.selected.as_mut() {
            if let Some(live) = list.get(snapshot.id) {
                *snapshot = live.clone();
            }
        }
    }
}
