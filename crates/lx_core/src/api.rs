use async_trait::async_trait;

use crate::query::ArticleQuery;
use crate::types::{ArticleId, ArticlesResponse, Category, Credentials, User};
use crate::Result;

/// The remote legal-news backend.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// `GET /articles`
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<ArticlesResponse>;

    /// `GET /categories`
    async fn fetch_categories(&self) -> Result<Vec<Category>>;

    /// `GET /articles/jurisdictions`
    async fn fetch_jurisdictions(&self) -> Result<Vec<String>>;

    async fn save_article(&self, id: ArticleId) -> Result<()>;

    async fn unsave_article(&self, id: ArticleId) -> Result<()>;

    async fn mark_read(&self, id: ArticleId) -> Result<()>;

    async fn mark_unread(&self, id: ArticleId) -> Result<()>;

    /// Asks the backend to re-ingest every feed. Resolves once ingestion is done.
    async fn refresh_feeds(&self) -> Result<()>;

    /// Resolves the current session. A 401 is `Ok(None)`, not an error.
    async fn current_user(&self) -> Result<Option<User>>;

    async fn login(&self, credentials: &Credentials) -> Result<User>;

    async fn logout(&self) -> Result<()>;

    async fn set_saved(&self, id: ArticleId, saved: bool) -> Result<()> {
        if saved {
            self.save_article(id).await
        } else {
            self.unsave_article(id).await
        }
    }

    async fn set_read(&self, id: ArticleId, read: bool) -> Result<()> {
        if read {
            self.mark_read(id).await
        } else {
            self.mark_unread(id).await
        }
    }
}
