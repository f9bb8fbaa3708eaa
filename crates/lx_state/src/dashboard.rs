use std::sync::Arc;

use lx_core::{
    Article, ArticleId, ArticleQuery, ArticlesResponse, Category, Credentials, FeedType, NewsApi,
    Result, User, ViewMode, REFRESH_FAILED_MESSAGE,
};
use lx_storage::Preferences;
use tracing::{debug, info, warn};

use crate::articles::{ArticleList, FlagKind, FlagState, LoadTicket, PendingToggle};
use crate::detail::DetailSelection;
use crate::filters::FilterController;
use crate::pagination::PageControls;
use crate::session::AuthSession;

/// Drives session, filters, article list and detail panel together.
///
/// Filter setters are synchronous: they reset the page, close the detail
/// panel and leave fetching to `reload`. Nothing is fetched until the
/// session is authenticated and the filters have seen it.
///
/// Loads and flag changes come in two halves (`begin_*` / `finish_*`) so
/// a front end can keep handling input while the request runs. The async
/// methods of the same name simply run both halves back to back.
pub struct Dashboard {
    api: Arc<dyn NewsApi>,
    preferences: Preferences,
    session: AuthSession,
    filters: FilterController,
    articles: ArticleList,
    detail: DetailSelection,
    categories: Vec<Category>,
    jurisdictions: Vec<String>,
    view_mode: ViewMode,
    sidebar_open: bool,
    refreshing: bool,
}

impl Dashboard {
    pub fn new(api: Arc<dyn NewsApi>, preferences: Preferences) -> Self {
        Self {
            api,
            preferences,
            session: AuthSession::new(),
            filters: FilterController::new(),
            articles: ArticleList::new(),
            detail: DetailSelection::new(),
            categories: Vec::new(),
            jurisdictions: Vec::new(),
            view_mode: ViewMode::default(),
            sidebar_open: true,
            refreshing: false,
        }
    }

    /// Handle for running requests outside the dashboard borrow.
    pub fn api(&self) -> Arc<dyn NewsApi> {
        Arc::clone(&self.api)
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn filters(&self) -> &FilterController {
        &self.filters
    }

    pub fn articles(&self) -> &ArticleList {
        &self.articles
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn jurisdictions(&self) -> &[String] {
        &self.jurisdictions
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.detail.current(&self.articles)
    }

    pub fn can_fetch(&self) -> bool {
        self.session.is_authenticated() && self.filters.is_ready()
    }

    pub fn page_controls(&self) -> PageControls {
        PageControls::new(self.filters.page(), self.articles.total_pages())
    }

    /// Restores preferences, resolves the session and, when logged in,
    /// loads the filter options and the first page.
    pub async fn start(&mut self) {
        self.resume().await;
        if self.can_fetch() {
            self.reload().await;
        }
    }

    /// `start` without the first article load, so filters can be adjusted
    /// before anything is fetched.
    pub async fn resume(&mut self) {
        self.view_mode = self.preferences.view_mode().await;
        self.sidebar_open = self.preferences.sidebar_open().await;

        let api = Arc::clone(&self.api);
        let user = self.session.initialize(api.as_ref()).await.cloned();
        self.apply_session(user.as_ref()).await;
    }

    async fn apply_session(&mut self, user: Option<&User>) {
        if self.filters.apply_session(user) {
            self.detail.clear();
        }
        if user.is_some() {
            self.load_options().await;
        }
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let api = Arc::clone(&self.api);
        let user = self.session.login(api.as_ref(), credentials).await?;
        self.apply_session(Some(&user)).await;
        self.reload().await;
        Ok(())
    }

    /// Ends the session and drops all protected data, even if the server
    /// call fails. The next login seeds the category filter again.
    pub async fn logout(&mut self) -> Result<()> {
        let api = Arc::clone(&self.api);
        let result = self.session.logout(api.as_ref()).await;
        self.filters = FilterController::new();
        self.articles.clear();
        self.detail.clear();
        self.categories.clear();
        self.jurisdictions.clear();
        result
    }

    /// Category and jurisdiction options. Failures leave the lists empty.
    pub async fn load_options(&mut self) {
        self.categories = match self.api.fetch_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                warn!("Failed to load categories: {}", e);
                Vec::new()
            }
        };
        self.jurisdictions = match self.api.fetch_jurisdictions().await {
            Ok(jurisdictions) => jurisdictions,
            Err(e) => {
                warn!("Failed to load jurisdictions: {}", e);
                Vec::new()
            }
        };
    }

    /// Fetches the page described by the current filters.
    pub async fn reload(&mut self) {
        if let Some((ticket, query)) = self.begin_reload() {
            let result = self.api.fetch_articles(&query).await;
            self.finish_reload(ticket, result);
        }
    }

    /// Marks a load as started and returns the query to run, or `None`
    /// while the session or filters are not ready.
    pub fn begin_reload(&mut self) -> Option<(LoadTicket, ArticleQuery)> {
        if !self.can_fetch() {
            debug!("Skipping article load until session and filters are ready");
            return None;
        }
        let query = self.filters.query();
        let ticket = self.articles.begin_load();
        debug!(seq = ticket.seq(), page = query.page, "Loading articles");
        Some((ticket, query))
    }

    /// Lands a load result. Returns `false` when a newer load already won.
    pub fn finish_reload(&mut self, ticket: LoadTicket, result: Result<ArticlesResponse>) -> bool {
        let applied = self.articles.apply_load(ticket, result);
        if applied {
            self.detail.sync(&self.articles);
        }
        applied
    }

    /// Re-ingests every feed on the backend, then reloads the list.
    pub async fn refresh_feeds(&mut self) {
        self.refreshing = true;
        match self.api.refresh_feeds().await {
            Ok(()) => {
                info!("✨ Feeds refreshed");
                self.reload().await;
            }
            Err(e) => {
                warn!("Feed refresh failed: {}", e);
                self.articles.set_error(REFRESH_FAILED_MESSAGE);
            }
        }
        self.refreshing = false;
    }

    fn filters_changed(&mut self) {
        self.detail.clear();
    }

    pub fn set_feed_type(&mut self, feed_type: Option<FeedType>) {
        self.filters.set_feed_type(feed_type);
        self.filters_changed();
    }

    pub fn toggle_category(&mut self, slug: &str) {
        self.filters.toggle_category(slug);
        self.filters_changed();
    }

    pub fn set_categories(&mut self, slugs: Vec<String>) {
        self.filters.set_categories(slugs);
        self.filters_changed();
    }

    pub fn toggle_jurisdiction(&mut self, jurisdiction: &str) {
        self.filters.toggle_jurisdiction(jurisdiction);
        self.filters_changed();
    }

    pub fn set_jurisdictions(&mut self, jurisdictions: Vec<String>) {
        self.filters.set_jurisdictions(jurisdictions);
        self.filters_changed();
    }

    pub fn toggle_court(&mut self, court: &str) {
        self.filters.toggle_court(court);
        self.filters_changed();
    }

    pub fn set_courts(&mut self, courts: Vec<String>) {
        self.filters.set_courts(courts);
        self.filters_changed();
    }

    pub fn toggle_doc_type(&mut self, doc_type: &str) {
        self.filters.toggle_doc_type(doc_type);
        self.filters_changed();
    }

    pub fn set_doc_types(&mut self, doc_types: Vec<String>) {
        self.filters.set_doc_types(doc_types);
        self.filters_changed();
    }

    pub fn set_search(&mut self, query: &str) {
        self.filters.set_search(query);
        self.filters_changed();
    }

    pub fn set_show_saved(&mut self, show_saved: bool) {
        self.filters.set_show_saved(show_saved);
        self.filters_changed();
    }

    pub fn toggle_show_saved(&mut self) {
        let show_saved = !self.filters.state().show_saved;
        self.set_show_saved(show_saved);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.filters_changed();
    }

    /// Moves to `page`, clamped to the page count once one is known. Keeps
    /// filters and the detail selection.
    pub fn set_page(&mut self, page: u32) {
        let page = match self.articles.pagination() {
            Some(_) => self.page_controls().clamp(page),
            None => page,
        };
        self.filters.set_page(page);
    }

    pub fn next_page(&mut self) -> bool {
        match self.page_controls().next() {
            Some(page) => {
                self.filters.set_page(page);
                true
            }
            None => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        match self.page_controls().previous() {
            Some(page) => {
                self.filters.set_page(page);
                true
            }
            None => false,
        }
    }

    /// Opens an article. An unread one is marked read immediately; the
    /// request is best effort and a failure does not revert the flag.
    pub async fn select_article(&mut self, id: ArticleId) -> Option<&Article> {
        if self.open_article(id)? {
            if let Err(e) = self.api.mark_read(id).await {
                warn!(id, "Best-effort mark-read failed: {}", e);
            }
        }
        self.selected_article()
    }

    /// Local half of `select_article`. Returns whether the article was
    /// unread, i.e. whether a mark-read request should follow.
    pub fn open_article(&mut self, id: ArticleId) -> Option<bool> {
        let article = self.articles.get(id)?.clone();
        self.detail.select(article);
        let was_unread = self.articles.mark_read_locally(id);
        if was_unread {
            self.detail.sync(&self.articles);
        }
        Some(was_unread)
    }

    pub fn close_detail(&mut self) {
        self.detail.clear();
    }

    pub async fn toggle_saved(&mut self, id: ArticleId) -> Option<FlagState> {
        self.change_flag(id, FlagKind::Saved, None).await
    }

    pub async fn set_saved(&mut self, id: ArticleId, saved: bool) -> Option<FlagState> {
        self.change_flag(id, FlagKind::Saved, Some(saved)).await
    }

    pub async fn toggle_read(&mut self, id: ArticleId) -> Option<FlagState> {
        self.change_flag(id, FlagKind::Read, None).await
    }

    pub async fn set_read(&mut self, id: ArticleId, read: bool) -> Option<FlagState> {
        self.change_flag(id, FlagKind::Read, Some(read)).await
    }

    /// Optimistic flag change with rollback on failure. `None` means the
    /// change was not attempted.
    async fn change_flag(
        &mut self,
        id: ArticleId,
        kind: FlagKind,
        target: Option<bool>,
    ) -> Option<FlagState> {
        let toggle = self.begin_flag(id, kind, target)?;
        let result = toggle.send(self.api.as_ref()).await;
        Some(self.finish_flag(toggle, &result))
    }

    /// Applies a flag change locally. `None` when the article is not on
    /// this page or the same flag is still waiting on the server.
    pub fn begin_flag(
        &mut self,
        id: ArticleId,
        kind: FlagKind,
        target: Option<bool>,
    ) -> Option<PendingToggle> {
        let toggle = self.articles.begin_toggle(id, kind, target)?;
        self.detail.sync(&self.articles);
        Some(toggle)
    }

    pub fn finish_flag(&mut self, toggle: PendingToggle, result: &Result<()>) -> FlagState {
        let state = self.articles.finish_toggle(toggle, result);
        self.detail.sync(&self.articles);
        state
    }

    pub async fn set_view_mode(&mut self, mode: ViewMode) -> Result<()> {
        self.view_mode = mode;
        self.preferences.set_view_mode(mode).await
    }

    pub async fn set_sidebar_open(&mut self, open: bool) -> Result<()> {
        self.sidebar_open = open;
        self.preferences.set_sidebar_open(open).await
    }
}
