use anyhow::{Context, Result};
use log::debug;
use reqwest::StatusCode;
use std::io::Write;
use std::path::Path;

use crate::github::{Asset, GitHubRepo, ReleaseClient, validate};
use crate::output::{write_envelope, write_error_details, write_success};
use crate::runtime::Runtime;

use super::{Outcome, decode_error};

const DESC: &str = "upload a release asset";

#[derive(Debug, Clone, Default)]
pub struct UploadParams {
    pub release_id: String,
    /// Local path; also sent as the asset name.
    pub filename: String,
    pub label: Option<String>,
}

/// Content type from the file's leading bytes, not its extension.
pub fn detect_content_type(content: &[u8]) -> String {
    if let Some(kind) = infer::get(content) {
        return kind.mime_type().to_string();
    }
    if std::str::from_utf8(content).is_ok() {
        mime::TEXT_PLAIN_UTF_8.to_string()
    } else {
        mime::APPLICATION_OCTET_STREAM.to_string()
    }
}

/// Uploads a local file as a release asset. The file is read fully into
/// memory first.
#[tracing::instrument(skip(runtime, client, out))]
pub async fn upload_asset<R: Runtime, W: Write>(
    runtime: &R,
    client: &ReleaseClient,
    repo: &GitHubRepo,
    params: &UploadParams,
    out: &mut W,
) -> Result<Outcome<Asset>> {
    validate(&[
        ("user", repo.owner.as_str()),
        ("repo", repo.repo.as_str()),
        ("token", client.token()),
        ("id", params.release_id.as_str()),
        ("filename", params.filename.as_str()),
    ])
    .context(DESC)?;

    let label = params.label.as_deref();

    let content = runtime
        .read(Path::new(&params.filename))
        .with_context(|| format!("{}, file read failed", DESC))?;
    let content_type = detect_content_type(&content);
    debug!("Detected content type {} for {}", content_type, params.filename);

    let response = client
        .upload_asset(
            repo,
            &params.release_id,
            &params.filename,
            label,
            content,
            &content_type,
        )
        .await
        .context(DESC)?;

    if response.status == StatusCode::CREATED {
        let asset: Asset = response.json().context(DESC)?.unwrap_or_default();
        write_success(
            out,
            DESC,
            &[
                ("id", asset.id.to_string()),
                ("name", asset.name.clone()),
                ("url", asset.url.clone().unwrap_or_default()),
            ],
        )?;
        return Ok(Outcome::Success(asset));
    }

    let error = decode_error(&response).context(DESC)?;
    if matches!(
        response.status,
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST
    ) {
        write_envelope(out, DESC, &error)?;
    }
    write_error_details(out, DESC, &error)?;

    Ok(Outcome::Rejected(response.status))
}
