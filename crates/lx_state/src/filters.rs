use std::collections::BTreeSet;

use lx_core::{ArticleQuery, FeedType, User, PAGE_SIZE};
use tracing::debug;

/// Current filter selections. `feed_type = None` means "all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub feed_type: Option<FeedType>,
    pub categories: BTreeSet<String>,
    pub jurisdictions: BTreeSet<String>,
    pub courts: BTreeSet<String>,
    pub doc_types: BTreeSet<String>,
    pub search: String,
    pub show_saved: bool,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            feed_type: None,
            categories: BTreeSet::new(),
            jurisdictions: BTreeSet::new(),
            courts: BTreeSet::new(),
            doc_types: BTreeSet::new(),
            search: String::new(),
            show_saved: false,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Saved,
    FeedType,
    Category,
    Jurisdiction,
    Court,
    DocType,
    Search,
}

/// One chip in the "Showing:" summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub kind: FilterKind,
    pub label: String,
}

/// Owns `FilterState` and derives the article query from it.
///
/// Every setter except the page ones resets `page` to 1. Court and
/// document-type selections are dropped when the feed type moves away
/// from judgments.
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    state: FilterState,
    seeded: bool,
    ready: bool,
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn page(&self) -> u32 {
        self.state.page
    }

    /// False until the session has been applied once; no fetches before then.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Applies the resolved session. The first user seen seeds the
    /// category selection from `category_slugs`; later calls never re-seed.
    /// Returns whether seeding happened.
    pub fn apply_session(&mut self, user: Option<&User>) -> bool {
        self.ready = true;
        let Some(user) = user else {
            return false;
        };
        if self.seeded {
            return false;
        }
        self.seeded = true;
        if user.category_slugs.is_empty() {
            return false;
        }

        self.state.categories = user.category_slugs.iter().cloned().collect();
        self.state.page = 1;
        debug!(categories = ?self.state.categories, "Seeded category filter from profile");
        true
    }

    fn changed(&mut self) {
        self.state.page = 1;
    }

    pub fn set_feed_type(&mut self, feed_type: Option<FeedType>) {
        if feed_type != Some(FeedType::Judgment) {
            self.state.courts.clear();
            self.state.doc_types.clear();
        }
        self.state.feed_type = feed_type;
        self.changed();
    }

    pub fn toggle_category(&mut self, slug: &str) {
        toggle(&mut self.state.categories, slug);
        self.changed();
    }

    pub fn set_categories<I: IntoIterator<Item = String>>(&mut self, slugs: I) {
        self.state.categories = slugs.into_iter().collect();
        self.changed();
    }

    pub fn toggle_jurisdiction(&mut self, jurisdiction: &str) {
        toggle(&mut self.state.jurisdictions, jurisdiction);
        self.changed();
    }

    pub fn set_jurisdictions<I: IntoIterator<Item = String>>(&mut self, jurisdictions: I) {
        self.state.jurisdictions = jurisdictions.into_iter().collect();
        self.changed();
    }

    pub fn toggle_court(&mut self, court: &str) {
        toggle(&mut self.state.courts, court);
        self.changed();
    }

    pub fn set_courts<I: IntoIterator<Item = String>>(&mut self, courts: I) {
        self.state.courts = courts.into_iter().collect();
        self.changed();
    }

    pub fn toggle_doc_type(&mut self, doc_type: &str) {
        toggle(&mut self.state.doc_types, doc_type);
        self.changed();
    }

    pub fn set_doc_types<I: IntoIterator<Item = String>>(&mut self, doc_types: I) {
        self.state.doc_types = doc_types.into_iter().collect();
        self.changed();
    }

    pub fn set_search(&mut self, query: &str) {
        self.state.search = query.trim().to_string();
        self.changed();
    }

    pub fn set_show_saved(&mut self, show_saved: bool) {
        self.state.show_saved = show_saved;
        self.changed();
    }

    pub fn clear_all(&mut self) {
        self.state = FilterState::default();
    }

    /// Moves to `page` without touching any other selection.
    pub fn set_page(&mut self, page: u32) {
        self.state.page = page.max(1);
    }

    pub fn is_filtered(&self) -> bool {
        !self.active_filters().is_empty()
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let state = &self.state;
        let mut active = Vec::new();
        let mut push = |kind, label: String| active.push(ActiveFilter { kind, label });

        if state.show_saved {
            push(FilterKind::Saved, "Saved only".to_string());
        }
        if let Some(feed_type) = state.feed_type {
            push(FilterKind::FeedType, feed_type.label().to_string());
        }
        for slug in &state.categories {
            push(FilterKind::Category, slug.clone());
        }
        for jurisdiction in &state.jurisdictions {
            push(FilterKind::Jurisdiction, jurisdiction.clone());
        }
        if state.feed_type == Some(FeedType::Judgment) {
            for court in &state.courts {
                push(FilterKind::Court, court.clone());
            }
            for doc_type in &state.doc_types {
                push(FilterKind::DocType, doc_type.clone());
            }
        }
        if !state.search.is_empty() {
            push(FilterKind::Search, format!("\u{201c}{}\u{201d}", state.search));
        }

        active
    }

    pub fn query(&self) -> ArticleQuery {
        let state = &self.state;
        let judgment = state.feed_type == Some(FeedType::Judgment);
        let when_judgment = |set: &BTreeSet<String>| {
            if judgment {
                set.iter().cloned().collect()
            } else {
                Vec::new()
            }
        };

        ArticleQuery {
            page: state.page,
            limit: PAGE_SIZE,
            feed_type: state.feed_type,
            categories: state.categories.iter().cloned().collect(),
            jurisdictions: state.jurisdictions.iter().cloned().collect(),
            courts: when_judgment(&state.courts),
            doc_types: when_judgment(&state.doc_types),
            search: (!state.search.is_empty()).then(|| state.search.clone()),
            saved_only: state.show_saved,
        }
    }
}
