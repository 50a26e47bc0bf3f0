//! Release operations.
//!
//! Each operation validates its inputs, performs one request through
//! [`ReleaseClient`], and renders the outcome to the given writer. An error
//! status from the API is rendered and reported as [`Outcome::Rejected`]; only
//! validation, transport, and decode failures are returned as errors.

use anyhow::Result;
use reqwest::StatusCode;
use std::io::Write;

use crate::github::ApiError;
use crate::http::ApiResponse;
use crate::output::write_api_error;

mod assets;
mod config;
mod create;
mod delete;
mod list;
mod show;
mod upload;

pub use assets::list_assets;
pub use config::release_client;
pub use create::create_release;
pub use delete::delete_release;
pub use list::list_releases;
pub use show::{ReleaseSelector, show_release};
pub use upload::{UploadParams, detect_content_type, upload_asset};

/// Release id used when none is given.
pub const LATEST: &str = "latest";

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// The API answered with this non-success status; details were rendered.
    Rejected(StatusCode),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Decodes an error body. An empty body yields an empty envelope.
fn decode_error(response: &ApiResponse) -> Result<ApiError> {
    Ok(response.json::<ApiError>()?.unwrap_or_default())
}

/// Renders the error body of a failed read and reports the rejection.
fn reject<T, W: Write>(out: &mut W, desc: &str, response: &ApiResponse) -> Result<Outcome<T>> {
    let error = decode_error(response)?;
    write_api_error(out, desc, &error)?;
    Ok(Outcome::Rejected(response.status))
}

#[cfg(test)]
pub(crate) mod test_support {
    use reqwest::Client;

    use crate::config::Settings;
    use crate::github::{GitHubRepo, ReleaseClient};
    use crate::http::HttpClient;

    pub fn client(server_url: &str, token: &str) -> ReleaseClient {
        let settings = Settings {
            owner: "octocat".to_string(),
            repo: "hello".to_string(),
            token: token.to_string(),
            api_url: server_url.to_string(),
            upload_url: server_url.to_string(),
        };
        ReleaseClient::new(HttpClient::new(Client::new()), &settings)
    }

    pub fn repo() -> GitHubRepo {
        GitHubRepo::new("octocat", "hello")
    }

    pub fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}
