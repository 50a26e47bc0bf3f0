mod client;
mod repo;
mod types;
mod validate;

pub use client::{ReleaseClient, upload_asset_url};
pub use repo::GitHubRepo;
pub use types::{ApiError, Asset, CreateReleaseRequest, ErrorDetail, Identity, Release};
pub use validate::{ValidationError, validate};
