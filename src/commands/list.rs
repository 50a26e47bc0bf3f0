use anyhow::{Context, Result};
use std::io::Write;

use crate::github::{GitHubRepo, Release, ReleaseClient, validate};
use crate::output::write_release_table;

use super::{Outcome, reject};

const DESC: &str = "list releases for a repository";

/// Lists the first page of releases, in server order.
#[tracing::instrument(skip(client, out))]
pub async fn list_releases<W: Write>(
    client: &ReleaseClient,
    repo: &GitHubRepo,
    out: &mut W,
) -> Result<Outcome<Vec<Release>>> {
    validate(&[("user", repo.owner.as_str()), ("repo", repo.repo.as_str())]).context(DESC)?;

    let response = client.list_releases(repo).await.context(DESC)?;
    if !response.status.is_success() {
        return reject(out, DESC, &response);
    }

    let releases: Vec<Release> = response.json().context(DESC)?.unwrap_or_default();
    write_release_table(out, &releases)?;

    Ok(Outcome::Success(releases))
}
