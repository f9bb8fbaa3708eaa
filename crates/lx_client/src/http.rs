use async_trait::async_trait;
use lx_core::{
    ArticleId, ArticleQuery, ArticlesResponse, CategoriesResponse, Category, Credentials, Error,
    ErrorBody, JurisdictionsResponse, LoginResponse, NewsApi, Result, User, UserResponse,
    LOGIN_FAILED_MESSAGE,
};
use lx_storage::Preferences;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// `NewsApi` over the backend's JSON REST endpoints.
///
/// When built with `Preferences`, a token returned by login is stored and
/// sent as a bearer token on every request, for clients that cannot rely
/// on the session cookie.
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    preferences: Option<Preferences>,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!("Unsupported scheme in {}", base_url)));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            preferences: None,
        })
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(%method, %url, "Sending request");
        let builder = self.client.request(method, url);
        match &self.preferences {
            Some(prefs) => match prefs.token().await {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
            None => builder,
        }
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        let response = self.request(method, path).await.send().await?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Ok(self.send(Method::GET, path).await?.json::<T>().await?)
    }
}

async fn error_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }

    let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
    let message = error_message(response).await.unwrap_or(fallback);
    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl NewsApi for HttpApi {
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<ArticlesResponse> {
        let response = self
            .request(Method::GET, "articles")
            .await
            .query(&query.to_query_pairs())
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let body: CategoriesResponse = self.get_json("categories").await?;
        Ok(body.categories)
    }

    async fn fetch_jurisdictions(&self) -> Result<Vec<String>> {
        let body: JurisdictionsResponse = self.get_json("articles/jurisdictions").await?;
        Ok(body.jurisdictions)
    }

    async fn save_article(&self, id: ArticleId) -> Result<()> {
        self.send(Method::POST, &format!("articles/{}/save", id)).await?;
        Ok(())
    }

    async fn unsave_article(&self, id: ArticleId) -> Result<()> {
        self.send(Method::DELETE, &format!("articles/{}/save", id)).await?;
        Ok(())
    }

    async fn mark_read(&self, id: ArticleId) -> Result<()> {
        self.send(Method::POST, &format!("articles/{}/read", id)).await?;
        Ok(())
    }

    async fn mark_unread(&self, id: ArticleId) -> Result<()> {
        self.send(Method::DELETE, &format!("articles/{}/read", id)).await?;
        Ok(())
    }

    async fn refresh_feeds(&self) -> Result<()> {
        info!("🔄 Requesting feed refresh");
        self.send(Method::POST, "feeds/refresh").await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>> {
        let response = self.request(Method::GET, "auth/me").await.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let body: UserResponse = check_status(response).await?.json().await?;
        Ok(body.user)
    }

    async fn login(&self, credentials: &Credentials) -> Result<User> {
        let response = self
            .request(Method::POST, "auth/login")
            .await
            .json(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            return Err(Error::Api(message));
        }

        let body: LoginResponse = response.json().await?;
        if let (Some(token), Some(prefs)) = (body.token.as_deref(), &self.preferences) {
            prefs.set_token(token).await?;
        }
        Ok(body.user)
    }

    async fn logout(&self) -> Result<()> {
        let result = self.send(Method::POST, "auth/logout").await;
        if let Some(prefs) = &self.preferences {
            if let Err(e) = prefs.clear_token().await {
                warn!("Failed to clear stored token: {}", e);
            }
        }
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(HttpApi::new("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(HttpApi::new("ftp://example.com/api"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_joining() {
        let api = HttpApi::new("http://localhost:3001/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:3001/api");
        assert_eq!(api.endpoint("articles"), "http://localhost:3001/api/articles");
        assert_eq!(api.endpoint("/auth/me"), "http://localhost:3001/api/auth/me");
    }
}
