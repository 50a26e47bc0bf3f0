use anyhow::Result;
use clap::Parser;
use github_release::commands::{self, LATEST, ReleaseSelector, UploadParams, release_client};
use github_release::config::{FileConfig, Overrides, Settings};
use github_release::github::CreateReleaseRequest;
use github_release::runtime::RealRuntime;
use log::debug;
use std::path::PathBuf;

/// github-release - manage GitHub releases and their assets
///
/// Settings come from flags, then environment variables, then
/// `.github-release.toml` (current directory, home directory,
/// /usr/local/etc or /etc). A config file must exist, even an empty one.
///
/// Examples:
///   github-release -u owner -r repo list
///   github-release -u owner -r repo create --tag-name v0.0.1 --name "First"
#[derive(Parser, Debug)]
#[command(author, version = env!("GITHUB_RELEASE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: search for .github-release.toml)
    #[arg(long, env = "GITHUB_RELEASE_CONFIG", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// The user or organization owning the repository
    #[arg(long, short = 'u', env = "GITHUB_RELEASE_USER", global = true)]
    user: Option<String>,

    /// The name of the repository
    #[arg(long, short = 'r', env = "GITHUB_RELEASE_REPO", global = true)]
    repo: Option<String>,

    /// Access token used for authenticated calls
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", env = "GITHUB_API_URL", value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Asset upload URL (defaults to https://uploads.github.com)
    #[arg(long = "upload-url", env = "GITHUB_UPLOAD_URL", value_name = "URL", global = true)]
    upload_url: Option<String>,

    /// Debug output
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Verbose output, including raw responses
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Only print essential output
    #[arg(long, short = 's', global = true)]
    essential: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            user: self.user.clone(),
            repo: self.repo.clone(),
            token: self.token.clone(),
            api_url: self.api_url.clone(),
            upload_url: self.upload_url.clone(),
        }
    }

    fn log_level(&self, file: &FileConfig) -> &'static str {
        let enabled = |flag: bool, from_file: Option<bool>| flag || from_file.unwrap_or(false);

        if enabled(self.essential, file.essential) {
            "warn"
        } else if enabled(self.verbose, file.verbose) || enabled(self.debug, file.debug) {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List releases, or the assets of one release
    List(ListArgs),

    /// Show a single release (the latest by default)
    Show(ShowArgs),

    /// Create a release, or edit one with --edit
    Create(CreateArgs),

    /// Delete a release
    Delete(DeleteArgs),

    /// Upload an asset to a release
    Upload(UploadArgs),
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// List the assets of a release instead
    #[arg(long, short = 'a')]
    assets: bool,

    /// The id of the release (with --assets)
    #[arg(long, short = 'i')]
    id: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ShowArgs {
    /// The id of the release
    #[arg(long, short = 'i')]
    id: Option<String>,

    /// The tag of the release
    #[arg(long, short = 't')]
    tag: Option<String>,
}

#[derive(clap::Args, Debug)]
struct CreateArgs {
    /// The name of the tag
    #[arg(long = "tag-name", alias = "tag_name")]
    tag_name: Option<String>,

    /// Branch or commit SHA the tag is created from
    #[arg(long = "target-commitish", alias = "target_commitish")]
    target_commitish: Option<String>,

    /// The name of the release
    #[arg(long)]
    name: Option<String>,

    /// Text describing the contents of the tag
    #[arg(long)]
    body: Option<String>,

    /// Create a draft (unpublished) release
    #[arg(long)]
    draft: bool,

    /// Identify the release as a prerelease
    #[arg(long)]
    prerelease: bool,

    /// Edit an existing release instead of creating one
    #[arg(long, short = 'e')]
    edit: bool,

    /// The id of the release to edit
    #[arg(long, short = 'i')]
    id: Option<String>,
}

impl CreateArgs {
    fn request(&self, file: &FileConfig) -> CreateReleaseRequest {
        let text = |flag: &Option<String>, from_file: &Option<String>| {
            flag.clone().or_else(|| from_file.clone()).unwrap_or_default()
        };

        CreateReleaseRequest {
            tag_name: text(&self.tag_name, &file.tag_name),
            target_commitish: text(&self.target_commitish, &file.target_commitish),
            name: text(&self.name, &file.name),
            body: text(&self.body, &file.body),
            draft: self.draft || file.draft.unwrap_or(false),
            prerelease: self.prerelease || file.prerelease.unwrap_or(false),
        }
    }

    fn edit_id(&self, file: &FileConfig) -> Option<String> {
        self.edit.then(|| release_id(&self.id, file))
    }
}

#[derive(clap::Args, Debug)]
struct DeleteArgs {
    /// The id of the release
    #[arg(long, short = 'i')]
    id: Option<String>,
}

#[derive(clap::Args, Debug)]
struct UploadArgs {
    /// The id of the release
    #[arg(long, short = 'i')]
    id: Option<String>,

    /// Short description shown instead of the file name
    #[arg(long, short = 'l')]
    label: Option<String>,

    /// File to upload; also used as the asset name
    #[arg(value_name = "FILE")]
    file: String,
}

/// Flag, then config file, then `latest`.
fn release_id(flag: &Option<String>, file: &FileConfig) -> String {
    flag.clone()
        .or_else(|| file.id.clone())
        .unwrap_or_else(|| LATEST.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let (file, config_path) = FileConfig::load(&runtime, cli.config.as_deref())?;

    let filter = format!("warn,github_release={}", cli.log_level(&file));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    debug!("Using config file: {}", config_path.display());

    let settings = Settings::resolve(cli.overrides(), &file);
    let client = release_client(&settings)?;
    let repo = settings.repository();
    let mut out = std::io::stdout();

    match cli.command {
        Commands::List(args) => {
            if args.assets {
                let id = release_id(&args.id, &file);
                commands::list_assets(&client, &repo, &id, &mut out).await?;
            } else {
                commands::list_releases(&client, &repo, &mut out).await?;
            }
        }
        Commands::Show(args) => {
            let id = args.id.or_else(|| file.id.clone());
            let selector = ReleaseSelector::resolve(id, args.tag);
            commands::show_release(&client, &repo, &selector, &mut out).await?;
        }
        Commands::Create(args) => {
            let request = args.request(&file);
            let edit_id = args.edit_id(&file);
            commands::create_release(&client, &repo, &request, edit_id.as_deref(), &mut out)
                .await?;
        }
        Commands::Delete(args) => {
            let id = args.id.or_else(|| file.id.clone()).unwrap_or_default();
            commands::delete_release(&client, &repo, &id, &mut out).await?;
        }
        Commands::Upload(args) => {
            let params = UploadParams {
                release_id: args.id.or_else(|| file.id.clone()).unwrap_or_default(),
                filename: args.file,
                label: args.label,
            };
            commands::upload_asset(&runtime, &client, &repo, &params, &mut out).await?;
        }
    }
    Ok(())
}
