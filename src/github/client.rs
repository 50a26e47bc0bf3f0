use anyhow::{Context, Result};
use log::info;
use reqwest::Method;

use crate::config::Settings;
use crate::http::{ApiRequest, ApiResponse, HttpClient};

use super::repo::GitHubRepo;
use super::types::CreateReleaseRequest;

/// Builds the asset upload URL.
///
/// The label is appended after a comma and neither value is escaped, so a
/// label containing `&` or `=` leaks into the query string.
pub fn upload_asset_url(
    upload_url: &str,
    repo: &GitHubRepo,
    release_id: &str,
    name: &str,
    label: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/repos/{}/{}/releases/{}/assets?name={}",
        upload_url, repo.owner, repo.repo, release_id, name
    );
    if let Some(label) = label.filter(|l| !l.is_empty()) {
        url.push_str(&format!(",label={}", label));
    }
    url
}

/// Client for the releases endpoints of one API host and one upload host.
pub struct ReleaseClient {
    http: HttpClient,
    api_url: String,
    upload_url: String,
    token: String,
}

impl ReleaseClient {
    pub fn new(http: HttpClient, settings: &Settings) -> Self {
        Self {
            http,
            api_url: settings.api_url.clone(),
            upload_url: settings.upload_url.clone(),
            token: settings.token.clone(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn releases_url(&self, repo: &GitHubRepo) -> String {
        format!("{}/repos/{}/{}/releases", self.api_url, repo.owner, repo.repo)
    }

    pub fn release_url(&self, repo: &GitHubRepo, release_id: &str) -> String {
        format!("{}/{}", self.releases_url(repo), release_id)
    }

    pub fn release_by_tag_url(&self, repo: &GitHubRepo, tag: &str) -> String {
        format!("{}/tags/{}", self.releases_url(repo), tag)
    }

    pub fn assets_url(&self, repo: &GitHubRepo, release_id: &str) -> String {
        format!("{}/assets", self.release_url(repo, release_id))
    }

    pub fn upload_url(
        &self,
        repo: &GitHubRepo,
        release_id: &str,
        name: &str,
        label: Option<&str>,
    ) -> String {
        upload_asset_url(&self.upload_url, repo, release_id, name, label)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_releases(&self, repo: &GitHubRepo) -> Result<ApiResponse> {
        let url = self.releases_url(repo);
        info!("Listing releases url={}", url);

        let response = self
            .http
            .send(ApiRequest::new(Method::GET, &url).credential(&self.token))
            .await?;
        Ok(response)
    }

    /// Published releases are public, so no credential is sent.
    #[tracing::instrument(skip(self))]
    pub async fn get_release(&self, repo: &GitHubRepo, release_id: &str) -> Result<ApiResponse> {
        let url = self.release_url(repo, release_id);
        info!("Getting release url={}", url);

        Ok(self.http.send(ApiRequest::new(Method::GET, &url)).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_release_by_tag(&self, repo: &GitHubRepo, tag: &str) -> Result<ApiResponse> {
        let url = self.release_by_tag_url(repo, tag);
        info!("Getting release url={}", url);

        Ok(self.http.send(ApiRequest::new(Method::GET, &url)).await?)
    }

    /// POSTs a new release, or PATCHes release `edit_id` when given.
    #[tracing::instrument(skip(self, request))]
    pub async fn create_release(
        &self,
        repo: &GitHubRepo,
        request: &CreateReleaseRequest,
        edit_id: Option<&str>,
    ) -> Result<ApiResponse> {
        let (method, url) = match edit_id {
            Some(id) => (Method::PATCH, self.release_url(repo, id)),
            None => (Method::POST, self.releases_url(repo)),
        };
        let body = serde_json::to_vec(request).context("Failed to encode release request")?;
        info!("{} release url={}", method, url);

        let response = self
            .http
            .send(ApiRequest::new(method, &url).body(body).credential(&self.token))
            .await?;
        Ok(response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_release(&self, repo: &GitHubRepo, release_id: &str) -> Result<ApiResponse> {
        let url = self.release_url(repo, release_id);
        info!("Deleting release url={}", url);

        let response = self
            .http
            .send(ApiRequest::new(Method::DELETE, &url).credential(&self.token))
            .await?;
        Ok(response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_assets(&self, repo: &GitHubRepo, release_id: &str) -> Result<ApiResponse> {
        let url = self.assets_url(repo, release_id);
        info!("Listing assets url={}", url);

        let response = self
            .http
            .send(ApiRequest::new(Method::GET, &url).credential(&self.token))
            .await?;
        Ok(response)
    }

    #[tracing::instrument(skip(self, content))]
    pub async fn upload_asset(
        &self,
        repo: &GitHubRepo,
        release_id: &str,
        name: &str,
        label: Option<&str>,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<ApiResponse> {
        let url = self.upload_url(repo, release_id, name, label);
        info!("Uploading {} bytes url={}", content.len(), url);

        let response = self
            .http
            .send(
                ApiRequest::new(Method::POST, &url)
                    .body(content)
                    .credential(&self.token)
                    .content_type(content_type),
            )
            .await?;
        Ok(response)
    }
}
