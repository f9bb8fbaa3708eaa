//! Scripted in-process backend for driving the dashboard.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use lx_core::{
    Article, ArticleId, ArticleQuery, ArticlesResponse, Category, Credentials, Error, FeedType,
    NewsApi, Pagination, Result, User,
};
use lx_state::Dashboard;
use lx_storage::{MemoryStore, Preferences};

pub fn article(id: ArticleId) -> Article {
    Article {
        id,
        title: format!("Article {}", id),
        link: format!("https://example.com/{}", id),
        description: "A short description".to_string(),
        content: String::new(),
        image_url: None,
        source_name: "Example".to_string(),
        source_url: "https://example.com".to_string(),
        published_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        feed_type: FeedType::News,
        jurisdiction: Some("EU".to_string()),
        language: "en".to_string(),
        relevance_score: 0.7,
        categories: vec![],
        is_saved: false,
        is_read: false,
        judgment: None,
    }
}

pub fn page(ids: &[ArticleId], page: u32, pages: u32) -> ArticlesResponse {
    ArticlesResponse {
        articles: ids.iter().copied().map(article).collect(),
        pagination: Pagination {
            page,
            limit: 30,
            total: ids.len() as u64,
            pages,
        },
    }
}

pub fn user(slugs: &[&str]) -> User {
    User {
        id: 1,
        email: "jo@example.com".to_string(),
        username: "jo".to_string(),
        display_name: "Jo".to_string(),
        avatar_url: None,
        category_slugs: slugs.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn server_error() -> Error {
    Error::Status {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

#[derive(Default)]
pub struct Script {
    pub me: Option<Result<Option<User>>>,
    pub login: Option<Result<User>>,
    pub logout_fails: bool,
    pub pages: VecDeque<Result<ArticlesResponse>>,
    pub categories_fail: bool,
    pub refresh_fails: bool,
    /// Endpoints named here ("save", "unsave", "read", "unread") fail.
    pub failing: HashSet<&'static str>,
    pub queries: Vec<ArticleQuery>,
    pub calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    pub script: Arc<Mutex<Script>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged_in(slugs: &[&str]) -> Self {
        let api = Self::new();
        api.script.lock().unwrap().me = Some(Ok(Some(user(slugs))));
        api
    }

    pub fn push_page(&self, response: Result<ArticlesResponse>) {
        self.script.lock().unwrap().pages.push_back(response);
    }

    pub fn fail(&self, endpoint: &'static str) {
        self.script.lock().unwrap().failing.insert(endpoint);
    }

    pub fn succeed(&self, endpoint: &'static str) {
        self.script.lock().unwrap().failing.remove(endpoint);
    }

    pub fn queries(&self) -> Vec<ArticleQuery> {
        self.script.lock().unwrap().queries.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.script.lock().unwrap().calls.clone()
    }

    fn flag_call(&self, endpoint: &'static str, id: ArticleId) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(format!("{} {}", endpoint, id));
        if script.failing.contains(endpoint) {
            Err(server_error())
        } else {
            Ok(())
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        Dashboard::new(Arc::new(self.clone()), prefs)
    }
}

#[async_trait]
impl NewsApi for FakeApi {
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<ArticlesResponse> {
        let mut script = self.script.lock().unwrap();
        script.queries.push(query.clone());
        script
            .pages
            .pop_front()
            .unwrap_or_else(|| Ok(page(&[], query.page, 0)))
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let script = self.script.lock().unwrap();
        if script.categories_fail {
            return Err(server_error());
        }
        Ok(vec![Category {
            id: 1,
            name: "IP Law".to_string(),
            slug: "ip-law".to_string(),
            article_count: Some(3),
        }])
    }

    async fn fetch_jurisdictions(&self) -> Result<Vec<String>> {
        Ok(vec!["EU".to_string(), "UK".to_string()])
    }

    async fn save_article(&self, id: ArticleId) -> Result<()> {
        self.flag_call("save", id)
    }

    async fn unsave_article(&self, id: ArticleId) -> Result<()> {
        self.flag_call("unsave", id)
    }

    async fn mark_read(&self, id: ArticleId) -> Result<()> {
        self.flag_call("read", id)
    }

    async fn mark_unread(&self, id: ArticleId) -> Result<()> {
        self.flag_call("unread", id)
    }

    async fn refresh_feeds(&self) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push("refresh".to_string());
        if script.refresh_fails {
            Err(server_error())
        } else {
            Ok(())
        }
    }

    async fn current_user(&self) -> Result<Option<User>> {
        let mut script = self.script.lock().unwrap();
        script.calls.push("me".to_string());
        script.me.take().unwrap_or(Ok(None))
    }

    async fn login(&self, _credentials: &Credentials) -> Result<User> {
        let mut script = self.script.lock().unwrap();
        script.calls.push("login".to_string());
        script
            .login
            .take()
            .unwrap_or_else(|| Err(Error::Api("Invalid email or password".to_string())))
    }

    async fn logout(&self) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push("logout".to_string());
        if script.logout_fails {
            Err(server_error())
        } else {
            Ok(())
        }
    }
}
