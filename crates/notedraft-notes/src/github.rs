//! GitHub REST client for authentication and author lookup

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use notedraft_core::error::{NotesError, Result};

const USER_AGENT: &str = concat!("notedraft/", env!("CARGO_PKG_VERSION"));

/// Resolves commit author emails to code-review usernames
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Username for `email`, or `None` when no account matches
    async fn username_for_email(&self, email: &str) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct UserSearch {
    #[serde(default)]
    items: Vec<UserSearchItem>,
}

#[derive(Debug, Deserialize)]
struct UserSearchItem {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Authenticated GitHub API client
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl GitHubClient {
    /// Create a client for the API at `api_url` using `token`
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NotesError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.api_url, path))
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
    }

    /// Verify the token, returning the authenticated login
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<String> {
        let response = self
            .get("/user")
            .send()
            .await
            .map_err(|e| NotesError::Request(e.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let message = error_message(response).await;
            return Err(NotesError::AuthenticationFailed(message).into());
        }
        let response = check_status(response).await?;

        let user: AuthenticatedUser = response
            .json()
            .await
            .map_err(|e| NotesError::Request(e.to_string()))?;
        info!(login = %user.login, "authenticated");
        Ok(user.login)
    }

    /// Search for the account that lists `email`
    #[instrument(skip(self))]
    pub async fn search_user(&self, email: &str) -> Result<Option<String>> {
        let response = self
            .get("/search/users")
            .query(&[("q", format!("{} in:email", email))])
            .send()
            .await
            .map_err(|e| NotesError::Request(e.to_string()))?;
        let response = check_status(response).await?;

        let search: UserSearch = response
            .json()
            .await
            .map_err(|e| NotesError::Request(e.to_string()))?;
        let login = search.items.into_iter().next().map(|item| item.login);
        debug!(found = login.is_some(), "user search finished");
        Ok(login)
    }
}

#[async_trait]
impl UserDirectory for GitHubClient {
    async fn username_for_email(&self, email: &str) -> Result<Option<String>> {
        let key = email.to_lowercase();
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }

        let login = self.search_user(email).await?;
        if login.is_none() {
            warn!(email = %email, "no account found for author");
        }
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, login.clone());
        }
        Ok(login)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let exhausted = response
        .headers()
        .get("X-RateLimit-Remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u32>().ok())
        == Some(0);
    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
        return Err(NotesError::RateLimited.into());
    }

    let message = error_message(response).await;
    Err(NotesError::Api {
        status: status.as_u16(),
        message,
    }
    .into())
}

async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ApiError>(&text)
        .map(|e| e.message)
        .unwrap_or(text)
}
