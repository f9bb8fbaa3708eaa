use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ArticleId = i64;

/// Page size requested for every article list fetch.
pub const PAGE_SIZE: u32 = 30;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load articles. Is the backend running?";
pub const REFRESH_FAILED_MESSAGE: &str = "Failed to refresh feeds.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    News,
    Blogpost,
    Judgment,
    Regulatory,
}

impl FeedType {
    pub const ALL: [FeedType; 4] = [
        FeedType::News,
        FeedType::Blogpost,
        FeedType::Judgment,
        FeedType::Regulatory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::News => "news",
            FeedType::Blogpost => "blogpost",
            FeedType::Judgment => "judgment",
            FeedType::Regulatory => "regulatory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedType::News => "News",
            FeedType::Blogpost => "Blogpost",
            FeedType::Judgment => "Judgment",
            FeedType::Regulatory => "Regulatory",
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "news" => Ok(FeedType::News),
            "blogpost" | "blog" => Ok(FeedType::Blogpost),
            "judgment" | "caselaw" | "case-law" => Ok(FeedType::Judgment),
            "regulatory" => Ok(FeedType::Regulatory),
            other => Err(format!("Unknown feed type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_count: Option<u64>,
}

/// Structured case-law fields, only sent for `FeedType::Judgment` articles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgmentMetadata {
    pub ecli: Option<String>,
    pub court: Option<String>,
    pub chamber: Option<String>,
    pub judge_rapporteur: Option<String>,
    pub procedure_type: Option<String>,
    pub subject_matter: Option<String>,
    pub document_type: Option<String>,
    pub case_number: Option<String>,
    pub case_name: Option<String>,
    pub parties: Option<String>,
    pub decision_date: Option<String>,
    pub ai_summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub source_name: String,
    #[serde(default)]
    pub source_url: String,
    pub published_at: DateTime<Utc>,
    pub feed_type: FeedType,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub language: String,
    /// 0..1, only used to weight how prominently the article is drawn.
    #[serde(default)]
    pub relevance_score: f32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub judgment: Option<JudgmentMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionsResponse {
    pub jurisdictions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub category_slugs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Card,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Card => "card",
            ViewMode::List => "list",
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "card" => Ok(ViewMode::Card),
            "list" => Ok(ViewMode::List),
            other => Err(format!("Unknown view mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserializes_with_judgment() {
        let json = r#"{
            "id": 7,
            "title": "Case C-123/24",
            "link": "https://curia.europa.eu/c-123",
            "description": "Preliminary ruling",
            "content": "",
            "image_url": null,
            "source_name": "CURIA",
            "source_url": "https://curia.europa.eu",
            "published_at": "2024-05-01T10:00:00Z",
            "feed_type": "judgment",
            "jurisdiction": "EU",
            "language": "en",
            "relevance_score": 0.8,
            "categories": [{"id": 1, "name": "IP Law", "slug": "ip-law"}],
            "is_saved": false,
            "is_read": true,
            "judgment": {"ecli": "ECLI:EU:C:2024:1", "court": "Court of Justice", "chamber": null}
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.feed_type, FeedType::Judgment);
        assert_eq!(article.categories[0].slug, "ip-law");
        assert!(article.categories[0].article_count.is_none());
        let judgment = article.judgment.unwrap();
        assert_eq!(judgment.ecli.as_deref(), Some("ECLI:EU:C:2024:1"));
        assert!(judgment.ai_summary.is_none());
    }

    #[test]
    fn test_feed_type_parsing() {
        assert_eq!("judgment".parse::<FeedType>().unwrap(), FeedType::Judgment);
        assert_eq!("Blog".parse::<FeedType>().unwrap(), FeedType::Blogpost);
        assert!("all".parse::<FeedType>().is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("a@b.c", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("a@b.c"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_view_mode_round_trip_names() {
        assert_eq!("list".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert_eq!(ViewMode::default().as_str(), "card");
        assert!("grid".parse::<ViewMode>().is_err());
    }
}
