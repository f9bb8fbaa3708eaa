use lx_core::{Credentials, NewsApi, Result, User};
use tracing::{info, warn};

/// Who is logged in, if anyone.
///
/// Starts in `loading` until `initialize` has resolved the session once.
/// Every failure path ends logged out rather than erroring.
#[derive(Debug, Clone)]
pub struct AuthSession {
    user: Option<User>,
    loading: bool,
    login_error: Option<String>,
    login_loading: bool,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSession {
    pub fn new() -> Self {
        Self {
            user: None,
            loading: true,
            login_error: None,
            login_loading: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn is_login_loading(&self) -> bool {
        self.login_loading
    }

    /// True once protected data may be fetched.
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    /// Resolves the current session with a single `GET /auth/me`.
    pub async fn initialize(&mut self, api: &dyn NewsApi) -> Option<&User> {
        let resolved = api.current_user().await;
        self.resolve(resolved)
    }

    pub fn resolve(&mut self, resolved: Result<Option<User>>) -> Option<&User> {
        self.user = match resolved {
            Ok(user) => user,
            Err(e) => {
                warn!("Session lookup failed, continuing logged out: {}", e);
                None
            }
        };
        self.loading = false;
        if let Some(user) = &self.user {
            info!(user_id = user.id, "👤 Session resolved for {}", user.username);
        }
        self.user.as_ref()
    }

    /// On failure `login_error` holds the message to show and the error is
    /// returned so the caller can stay on the login screen.
    pub async fn login(&mut self, api: &dyn NewsApi, credentials: &Credentials) -> Result<User> {
        self.login_loading = true;
        self.login_error = None;
        let result = api.login(credentials).await;
        self.login_loading = false;

        match result {
            Ok(user) => {
                info!(user_id = user.id, "🔑 Logged in as {}", user.username);
                self.user = Some(user.clone());
                self.loading = false;
                Ok(user)
            }
            Err(e) => {
                self.login_error = Some(e.login_message());
                Err(e)
            }
        }
    }

    /// Always ends logged out locally, even if the server call fails.
    pub async fn logout(&mut self, api: &dyn NewsApi) -> Result<()> {
        let result = api.logout().await;
        self.user = None;
        self.login_error = None;
        self.loading = false;
        if let Err(e) = &result {
            warn!("Server-side logout failed: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lx_core::Error;

    fn user() -> User {
        User {
            id: 1,
            email: "jo@example.com".to_string(),
            username: "jo".to_string(),
            display_name: "Jo".to_string(),
            avatar_url: None,
            category_slugs: vec![],
        }
    }

    #[test]
    fn test_starts_loading() {
        let session = AuthSession::new();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_resolve_user() {
        let mut session = AuthSession::new();
        assert!(session.resolve(Ok(Some(user()))).is_some());
        assert!(!session.is_loading());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_resolve_failure_is_logged_out() {
        let mut session = AuthSession::new();
        let transport = Error::Status { status: 503, message: "unavailable".to_string() };
        assert!(session.resolve(Err(transport)).is_none());
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());

        let mut session = AuthSession::new();
        assert!(session.resolve(Ok(None)).is_none());
        assert!(!session.is_loading());
    }
}
