use std::collections::HashMap;

use lx_core::{
    Article, ArticleId, ArticlesResponse, NewsApi, Pagination, Result, LOAD_FAILED_MESSAGE,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    Saved,
    Read,
}

impl FlagKind {
    fn get(&self, article: &Article) -> bool {
        match self {
            FlagKind::Saved => article.is_saved,
            FlagKind::Read => article.is_read,
        }
    }

    fn set(&self, article: &mut Article, value: bool) {
        match self {
            FlagKind::Saved => article.is_saved = value,
            FlagKind::Read => article.is_read = value,
        }
    }
}

/// Lifecycle of one optimistic flag change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagState {
    Pending,
    Confirmed,
    RolledBack,
}

/// An optimistic change already applied locally, waiting for the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "finish_toggle must be called with the request outcome"]
pub struct PendingToggle {
    pub id: ArticleId,
    pub kind: FlagKind,
    pub previous: bool,
    pub target: bool,
}

impl PendingToggle {
    /// Issues the request that makes the change permanent.
    pub async fn send(&self, api: &dyn NewsApi) -> Result<()> {
        match self.kind {
            FlagKind::Saved => api.set_saved(self.id, self.target).await,
            FlagKind::Read => api.set_read(self.id, self.target).await,
        }
    }
}

/// Issued by `begin_load`; only the newest response is allowed to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    seq: u64,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What the list area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Ready,
}

/// The current page of articles plus local optimistic edits.
#[derive(Debug, Clone, Default)]
pub struct ArticleList {
    articles: Vec<Article>,
    pagination: Option<Pagination>,
    loading: bool,
    error: Option<String>,
    issued_seq: u64,
    applied_seq: u64,
    toggles: HashMap<(ArticleId, FlagKind), FlagState>,
    /// Target values of in-flight toggles, re-applied over a fresh page.
    optimistic: HashMap<(ArticleId, FlagKind), bool>,
}

impl ArticleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    fn get_mut(&mut self, id: ArticleId) -> Option<&mut Article> {
        self.articles.iter_mut().find(|a| a.id == id)
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Pages reported by the last successful load, 1 before any load.
    pub fn total_pages(&self) -> u32 {
        self.pagination.map(|p| p.pages).unwrap_or(1)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn status(&self) -> ListStatus<'_> {
        if let Some(error) = self.error.as_deref() {
            ListStatus::Error(error)
        } else if self.loading {
            ListStatus::Loading
        } else if self.articles.is_empty() {
            ListStatus::Empty
        } else {
            ListStatus::Ready
        }
    }

    pub fn clear(&mut self) {
        self.articles.clear();
        self.pagination = None;
        self.error = None;
        self.loading = false;
        self.toggles.clear();
        self.optimistic.clear();
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_seq += 1;
        self.loading = true;
        self.error = None;
        LoadTicket { seq: self.issued_seq }
    }

    /// Applies a load result unless a newer one already landed.
    ///
    /// Success replaces the whole page. Failure keeps the previous
    /// articles and sets the user-facing error. Returns whether the result
    /// was applied.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<ArticlesResponse>) -> bool {
        if ticket.seq <= self.applied_seq {
            debug!(seq = ticket.seq, applied = self.applied_seq, "Discarding stale article response");
            return false;
        }
        self.applied_seq = ticket.seq;
        self.loading = ticket.seq < self.issued_seq;

        match result {
            Ok(response) => {
                debug!(
                    seq = ticket.seq,
                    count = response.articles.len(),
                    page = response.pagination.page,
                    pages = response.pagination.pages,
                    "Loaded articles"
                );
                self.articles = response.articles;
                self.pagination = Some(response.pagination);
                self.error = None;
                self.toggles.retain(|_, state| *state == FlagState::Pending);
                for (&(id, kind), &target) in &self.optimistic {
                    if let Some(article) = self.articles.iter_mut().find(|a| a.id == id) {
                        kind.set(article, target);
                    }
                }
            }
            Err(e) => {
                warn!(seq = ticket.seq, "Failed to load articles: {}", e);
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn flag_state(&self, id: ArticleId, kind: FlagKind) -> Option<FlagState> {
        self.toggles.get(&(id, kind)).copied()
    }

    pub fn is_toggle_pending(&self, id: ArticleId, kind: FlagKind) -> bool {
        self.flag_state(id, kind) == Some(FlagState::Pending)
    }

    /// Optimistically sets a flag (`target = None` flips it).
    ///
    /// Returns `None` when the article is not on this page or a change to
    /// the same flag is still in flight.
    pub fn begin_toggle(
        &mut self,
        id: ArticleId,
        kind: FlagKind,
        target: Option<bool>,
    ) -> Option<PendingToggle> {
        if self.is_toggle_pending(id, kind) {
            debug!(id, ?kind, "Toggle already in flight");
            return None;
        }
        let article = self.get_mut(id)?;
        let previous = kind.get(article);
        let target = target.unwrap_or(!previous);
        kind.set(article, target);
        self.toggles.insert((id, kind), FlagState::Pending);
        self.optimistic.insert((id, kind), target);
        Some(PendingToggle {
            id,
            kind,
            previous,
            target,
        })
    }

    /// Confirms or reverts a toggle. A revert only touches the article if
    /// its flag still holds the optimistic value.
    pub fn finish_toggle(&mut self, toggle: PendingToggle, result: &Result<()>) -> FlagState {
        let state = match result {
            Ok(()) => FlagState::Confirmed,
            Err(e) => {
                warn!(id = toggle.id, kind = ?toggle.kind, "Reverting flag change: {}", e);
                if let Some(article) = self.get_mut(toggle.id) {
                    if toggle.kind.get(article) == toggle.target {
                        toggle.kind.set(article, toggle.previous);
                    }
                }
                FlagState::RolledBack
            }
        };
        self.optimistic.remove(&(toggle.id, toggle.kind));
        self.toggles.insert((toggle.id, toggle.kind), state);
        state
    }

    /// Marks an article read with no rollback. Returns whether it was unread.
    pub fn mark_read_locally(&mut self, id: ArticleId) -> bool {
        match self.get_mut(id) {
            Some(article) if !article.is_read => {
                article.is_read = true;
                true
            }
            _ => false,
        }
    }
}
