use anyhow::{Context, Result};
use std::io::Write;

use crate::github::{GitHubRepo, Release, ReleaseClient, validate};
use crate::output::write_pretty_json;

use super::{LATEST, Outcome, reject};

const DESC: &str = "get a single release";

/// Which release `show` fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelector {
    Id(String),
    Tag(String),
}

impl ReleaseSelector {
    /// A non-empty tag wins; otherwise the id, defaulting to `latest`.
    pub fn resolve(id: Option<String>, tag: Option<String>) -> Self {
        match tag.filter(|t| !t.is_empty()) {
            Some(tag) => ReleaseSelector::Tag(tag),
            None => ReleaseSelector::Id(id.unwrap_or_else(|| LATEST.to_string())),
        }
    }
}

#[tracing::instrument(skip(client, out))]
pub async fn show_release<W: Write>(
    client: &ReleaseClient,
    repo: &GitHubRepo,
    selector: &ReleaseSelector,
    out: &mut W,
) -> Result<Outcome<Release>> {
    let response = match selector {
        ReleaseSelector::Id(id) => {
            validate(&[
                ("user", repo.owner.as_str()),
                ("repo", repo.repo.as_str()),
                ("release_id", id.as_str()),
            ])
            .context(DESC)?;
            client.get_release(repo, id).await
        }
        ReleaseSelector::Tag(tag) => {
            validate(&[
                ("user", repo.owner.as_str()),
                ("repo", repo.repo.as_str()),
                ("tag", tag.as_str()),
            ])
            .context(DESC)?;
            client.get_release_by_tag(repo, tag).await
        }
    };
    let response = response.context(DESC)?;

    if !response.status.is_success() {
        return reject(out, DESC, &response);
    }

    let release: Release = response.json().context(DESC)?.unwrap_or_default();
    write_pretty_json(out, DESC, &release)?;

    Ok(Outcome::Success(release))
}
