use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("portfolio-app/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub returned status {0}")]
    Status(u16),

    #[error("Unexpected GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Repository summary as shown on the portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub language: Option<String>,
    pub stars: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire shape of one entry from `GET /users/{user}/repos`.
#[derive(Debug, Deserialize)]
struct RawRepository {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    stargazers_count: Option<u32>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl RawRepository {
    fn into_repository(self) -> Option<Repository> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let url = self.html_url.filter(|u| !u.is_empty())?;

        Some(Repository {
            name,
            description: self.description.filter(|d| !d.trim().is_empty()),
            url,
            language: self.language,
            stars: self.stargazers_count.unwrap_or(0),
            updated_at: self.updated_at,
        })
    }
}

/// Decodes a repository listing, dropping entries without a name or URL.
pub fn parse_repositories(json: &str) -> Result<Vec<Repository>, RepoError> {
    let raw: Vec<RawRepository> = serde_json::from_str(json)?;
    let total = raw.len();

    let repos: Vec<Repository> = raw
        .into_iter()
        .filter_map(RawRepository::into_repository)
        .collect();

    if repos.len() < total {
        tracing::debug!("Dropped {} incomplete repository entries", total - repos.len());
    }

    Ok(repos)
}

#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Public repositories of `user`, most recently updated first.
    async fn list(&self, user: &str) -> Result<Vec<Repository>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(api_base: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn repos_url(&self, user: &str) -> String {
        format!("{}/users/{}/repos?sort=updated", self.api_base, user)
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn list(&self, user: &str) -> Result<Vec<Repository>, RepoError> {
        let url = self.repos_url(user);
        tracing::debug!("Fetching repositories from {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Fetch error for {}: {:?}", url, e);
                RepoError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GitHub returned {} for {}", status, url);
            return Err(RepoError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let repos = parse_repositories(&body)?;
        tracing::info!("Fetched {} repositories for {}", repos.len(), user);

        Ok(repos)
    }
}

/// Fixed listing that never touches the network.
#[derive(Debug, Clone, Default)]
pub struct StaticRepositories {
    pub repositories: Vec<Repository>,
}

#[async_trait]
impl RepositorySource for StaticRepositories {
    async fn list(&self, _user: &str) -> Result<Vec<Repository>, RepoError> {
        Ok(self.repositories.clone())
    }
}
