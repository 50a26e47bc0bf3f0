use anyhow::{Context, Result};
use log::debug;
use reqwest::StatusCode;
use std::io::Write;

use crate::github::{CreateReleaseRequest, GitHubRepo, Release, ReleaseClient, validate};
use crate::output::{write_api_error, write_success};

use super::{Outcome, decode_error};

const DESC: &str = "create a release";

/// Creates a release, or edits release `edit_id` when given.
///
/// Only `201 Created` counts as success, for edits too.
#[tracing::instrument(skip(client, request, out))]
pub async fn create_release<W: Write>(
    client: &ReleaseClient,
    repo: &GitHubRepo,
    request: &CreateReleaseRequest,
    edit_id: Option<&str>,
    out: &mut W,
) -> Result<Outcome<Release>> {
    validate(&[
        ("user", repo.owner.as_str()),
        ("repo", repo.repo.as_str()),
        ("token", client.token()),
    ])
    .context(DESC)?;

    let response = client
        .create_release(repo, request, edit_id)
        .await
        .context(DESC)?;

    if response.status == StatusCode::CREATED {
        let release: Release = response.json().context(DESC)?.unwrap_or_default();
        write_success(
            out,
            DESC,
            &[
                ("id", release.id.to_string()),
                ("tag_name", release.tag_name.clone()),
                ("url", release.url.clone().unwrap_or_default()),
            ],
        )?;
        return Ok(Outcome::Success(release));
    }

    debug!("{} returned {}", DESC, response.status);
    let error = decode_error(&response).context(DESC)?;
    write_api_error(out, DESC, &error)?;

    Ok(Outcome::Rejected(response.status))
}
