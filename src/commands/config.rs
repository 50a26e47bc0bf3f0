use anyhow::Result;
use log::debug;
use reqwest::Client;

use crate::config::Settings;
use crate::github::ReleaseClient;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("github-release/", env!("GITHUB_RELEASE_VERSION"));

/// Builds the release client for the resolved settings.
pub fn release_client(settings: &Settings) -> Result<ReleaseClient> {
    if !settings.token.is_empty() {
        debug!("Using token for authentication: {}", mask_token(&settings.token));
    }

    let client = Client::builder().user_agent(USER_AGENT).build()?;

    Ok(ReleaseClient::new(HttpClient::new(client), settings))
}

/// Keeps the first 4 and last 4 characters of long tokens.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
