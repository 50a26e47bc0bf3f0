//! Console rendering of listings, releases, success reports, and API errors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

use crate::github::{ApiError, Asset, ErrorDetail, Release};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Header plus one row per release, in the given order.
pub fn write_release_table<W: Write>(out: &mut W, releases: &[Release]) -> io::Result<()> {
    writeln!(out, "{:>20}    {:>10}    {:>5}    {}", "created", "id", "draft", "tag")?;
    for release in releases {
        writeln!(
            out,
            "{:>20}    {:>10}    {:>5}    {}",
            format_timestamp(release.created_at.as_ref()),
            release.id,
            release.draft,
            release.tag_name
        )?;
    }
    Ok(())
}

pub fn write_asset_table<W: Write>(out: &mut W, assets: &[Asset]) -> io::Result<()> {
    writeln!(out, "{:>20}    {:>10}    {:>10}    {}", "created", "id", "size", "name")?;
    for asset in assets {
        writeln!(
            out,
            "{:>20}    {:>10}    {:>10}    {}",
            format_timestamp(asset.created_at.as_ref()),
            asset.id,
            asset.size,
            asset.name
        )?;
    }
    Ok(())
}

/// Writes `desc:` followed by the value as tab-indented JSON.
pub fn write_pretty_json<W: Write, T: Serialize>(
    out: &mut W,
    desc: &str,
    value: &T,
) -> io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(io::Error::other)?;

    writeln!(out, "{}:", desc)?;
    out.write_all(&buf)?;
    writeln!(out)
}

/// `desc success: key=value ...`
pub fn write_success<W: Write>(
    out: &mut W,
    desc: &str,
    fields: &[(&str, String)],
) -> io::Result<()> {
    let details: Vec<String> = fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    writeln!(out, "{} success: {}", desc, details.join(" "))
}

/// The `message`/`documentation_url` envelope, two lines when present.
pub fn write_envelope<W: Write>(out: &mut W, desc: &str, error: &ApiError) -> io::Result<()> {
    if let Some(message) = &error.message {
        writeln!(out, "{} failed: {}", desc, message)?;
    }
    if let Some(url) = &error.documentation_url {
        writeln!(out, "documentation_url: {}", url)?;
    }
    Ok(())
}

/// The `errors` array, one indexed line per entry. Nothing when absent.
pub fn write_error_details<W: Write>(out: &mut W, desc: &str, error: &ApiError) -> io::Result<()> {
    if error.errors.is_empty() {
        return Ok(());
    }

    writeln!(out, "{} failed with {} errors:", desc, error.errors.len())?;
    for (i, detail) in error.errors.iter().enumerate() {
        match detail {
            ErrorDetail::Message { message } => writeln!(out, "{}: {}", i, message)?,
            ErrorDetail::Field { code, field, .. } => writeln!(
                out,
                "{}: {} {}",
                i,
                code.as_deref().unwrap_or_default(),
                field.as_deref().unwrap_or_default()
            )?,
            ErrorDetail::Other(_) => {}
        }
    }
    Ok(())
}

/// Envelope followed by the `errors` array.
pub fn write_api_error<W: Write>(out: &mut W, desc: &str, error: &ApiError) -> io::Result<()> {
    write_envelope(out, desc, error)?;
    write_error_details(out, desc, error)
}
