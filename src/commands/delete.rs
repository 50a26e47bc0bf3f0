use anyhow::{Context, Result};
use log::debug;
use reqwest::StatusCode;
use std::io::Write;

use crate::github::{GitHubRepo, ReleaseClient, validate};
use crate::output::{write_envelope, write_success};

use super::{Outcome, decode_error};

const DESC: &str = "delete a release";

/// Deletes a release. `204` is success; a `404` envelope is rendered; any
/// other status is only logged.
#[tracing::instrument(skip(client, out))]
pub async fn delete_release<W: Write>(
    client: &ReleaseClient,
    repo: &GitHubRepo,
    release_id: &str,
    out: &mut W,
) -> Result<Outcome<()>> {
    validate(&[
        ("user", repo.owner.as_str()),
        ("repo", repo.repo.as_str()),
        ("release_id", release_id),
        ("token", client.token()),
    ])
    .context(DESC)?;

    let response = client
        .delete_release(repo, release_id)
        .await
        .context(DESC)?;

    match response.status {
        StatusCode::NO_CONTENT => {
            write_success(out, DESC, &[("id", release_id.to_string())])?;
            Ok(Outcome::Success(()))
        }
        StatusCode::NOT_FOUND => {
            let error = decode_error(&response).context(DESC)?;
            write_envelope(out, DESC, &error)?;
            Ok(Outcome::Rejected(response.status))
        }
        status => {
            debug!(
                "{} returned {}: {}",
                DESC,
                status,
                String::from_utf8_lossy(&response.body)
            );
            Ok(Outcome::Rejected(status))
        }
    }
}
