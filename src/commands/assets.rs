use anyhow::{Context, Result};
use std::io::Write;

use crate::github::{Asset, GitHubRepo, ReleaseClient, validate};
use crate::output::write_asset_table;

use super::{Outcome, reject};

const DESC: &str = "list assets for a release";

/// Lists the assets of a release. The release id is taken as given.
#[tracing::instrument(skip(client, out))]
pub async fn list_assets<W: Write>(
    client: &ReleaseClient,
    repo: &GitHubRepo,
    release_id: &str,
    out: &mut W,
) -> Result<Outcome<Vec<Asset>>> {
    validate(&[("user", repo.owner.as_str()), ("repo", repo.repo.as_str())]).context(DESC)?;

    let response = client
        .list_assets(repo, release_id)
        .await
        .context(DESC)?;
    if !response.status.is_success() {
        return reject(out, DESC, &response);
    }

    let assets: Vec<Asset> = response.json().context(DESC)?.unwrap_or_default();
    write_asset_table(out, &assets)?;

    Ok(Outcome::Success(assets))
}
