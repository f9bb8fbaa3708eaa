//! Integration tests for `HttpApi` against a mock backend.

use std::sync::Arc;

use lx_client::HttpApi;
use lx_core::{ArticleQuery, Credentials, Error, FeedType, NewsApi};
use lx_storage::{MemoryStore, Preferences};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn article_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Article {}", id),
        "link": format!("https://example.com/{}", id),
        "description": "desc",
        "content": "",
        "image_url": null,
        "source_name": "Example",
        "source_url": "https://example.com",
        "published_at": "2024-05-01T10:00:00Z",
        "feed_type": "news",
        "jurisdiction": "EU",
        "language": "en",
        "relevance_score": 0.5,
        "categories": [],
        "is_saved": false,
        "is_read": false,
        "judgment": null
    })
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 1,
        "email": "jo@example.com",
        "username": "jo",
        "display_name": "Jo",
        "avatar_url": null,
        "category_slugs": ["ip-law", "tax"]
    })
}

async fn api_for(server: &MockServer) -> (HttpApi, Preferences) {
    let prefs = Preferences::new(Arc::new(MemoryStore::new()));
    let api = HttpApi::new(&format!("{}/api", server.uri()))
        .unwrap()
        .with_preferences(prefs.clone());
    (api, prefs)
}

#[tokio::test]
async fn test_fetch_articles_sends_judgment_filters() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "30"))
        .and(query_param("feed_type", "judgment"))
        .and(query_param("court", "General Court"))
        .and(query_param("category", "ip-law,tax"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [article_json(1), article_json(2)],
            "pagination": {"page": 2, "limit": 30, "total": 32, "pages": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server).await;
    let query = ArticleQuery {
        page: 2,
        feed_type: Some(FeedType::Judgment),
        courts: vec!["General Court".to_string()],
        categories: vec!["ip-law".to_string(), "tax".to_string()],
        ..Default::default()
    };
    let response = api.fetch_articles(&query).await.unwrap();
    assert_eq!(response.articles.len(), 2);
    assert_eq!(response.pagination.pages, 2);
}

#[tokio::test]
async fn test_fetch_articles_omits_court_for_news() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("feed_type", "news"))
        .and(query_param_is_missing("court"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [],
            "pagination": {"page": 1, "limit": 30, "total": 0, "pages": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server).await;
    let query = ArticleQuery {
        feed_type: Some(FeedType::News),
        courts: vec!["General Court".to_string()],
        ..Default::default()
    };
    let response = api.fetch_articles(&query).await.unwrap();
    assert!(response.articles.is_empty());
    assert_eq!(response.pagination.pages, 0);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (api, _) = api_for(&server).await;
    match api.fetch_articles(&ArticleQuery::default()).await {
        Err(Error::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("expected status error, got {:?}", other.map(|r| r.articles.len())),
    }
    assert!(matches!(api.fetch_categories().await, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn test_current_user_unauthorized_is_none() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Not logged in"})))
        .mount(&server)
        .await;

    let (api, _) = api_for(&server).await;
    assert_eq!(api.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn test_login_stores_token_and_sends_bearer() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "jo@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(),
            "token": "tok-123"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": user_json()})))
        .expect(1)
        .mount(&server)
        .await;

    let (api, prefs) = api_for(&server).await;
    let user = api
        .login(&Credentials::new("jo@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(user.category_slugs, vec!["ip-law", "tax"]);
    assert_eq!(prefs.token().await.as_deref(), Some("tok-123"));

    let me = api.current_user().await.unwrap().unwrap();
    assert_eq!(me.username, "jo");
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid email or password"})),
        )
        .mount(&server)
        .await;

    let (api, prefs) = api_for(&server).await;
    let err = api
        .login(&Credentials::new("jo@example.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.login_message(), "Invalid email or password");
    assert_eq!(prefs.token().await, None);
}

#[tokio::test]
async fn test_login_failure_without_body_uses_fallback() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let (api, _) = api_for(&server).await;
    let err = api
        .login(&Credentials::new("jo@example.com", "secret"))
        .await
        .unwrap_err();
    assert_eq!(err.login_message(), "Login failed");
}

#[tokio::test]
async fn test_logout_clears_token_even_on_failure() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (api, prefs) = api_for(&server).await;
    prefs.set_token("tok-123").await.unwrap();
    assert!(api.logout().await.is_err());
    assert_eq!(prefs.token().await, None);
}

#[tokio::test]
async fn test_flag_endpoints_use_expected_methods() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    for (verb, route) in [
        ("POST", "/api/articles/42/save"),
        ("DELETE", "/api/articles/42/save"),
        ("POST", "/api/articles/42/read"),
        ("DELETE", "/api/articles/42/read"),
        ("POST", "/api/feeds/refresh"),
    ] {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let (api, _) = api_for(&server).await;
    api.set_saved(42, true).await.unwrap();
    api.set_saved(42, false).await.unwrap();
    api.set_read(42, true).await.unwrap();
    api.set_read(42, false).await.unwrap();
    api.refresh_feeds().await.unwrap();
}

#[tokio::test]
async fn test_option_lists() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [{"id": 1, "name": "Tax", "slug": "tax", "article_count": 12}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/articles/jurisdictions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jurisdictions": ["EU", "UK"]
        })))
        .mount(&server)
        .await;

    let (api, _) = api_for(&server).await;
    let categories = api.fetch_categories().await.unwrap();
    assert_eq!(categories[0].article_count, Some(12));
    assert_eq!(api.fetch_jurisdictions().await.unwrap(), vec!["EU", "UK"]);
}
