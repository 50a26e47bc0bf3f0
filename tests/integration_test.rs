use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::path::Path;
use tempfile::{TempDir, tempdir};

/// A working directory holding an empty `.github-release.toml`.
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(".github-release.toml"), "").unwrap();
    dir
}

/// A command isolated from the caller's environment and config files.
fn github_release(workdir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("github-release"));
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_RELEASE_USER")
        .env_remove("GITHUB_RELEASE_REPO")
        .env_remove("GITHUB_RELEASE_CONFIG")
        .env_remove("GITHUB_API_URL")
        .env_remove("GITHUB_UPLOAD_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_releases() {
    let mut server = Server::new();
    let dir = workspace();

    let mock = server
        .mock("GET", "/repos/octocat/hello/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 2, "tag_name": "v1.1.0", "draft": true, "created_at": "2020-02-01T10:00:00Z"},
                {"id": 1, "tag_name": "v1.0.0", "draft": false, "created_at": "2020-01-01T10:00:00Z"}
            ]"#,
        )
        .create();

    github_release(dir.path())
        .args(["-u", "octocat", "-r", "hello", "--api-url", &server.url(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("2020-02-01 10:00:00"))
        .stdout(predicate::str::contains("v1.1.0"))
        .stdout(predicate::str::contains("v1.0.0"));

    mock.assert();
}

#[test]
fn test_list_assets_with_env_settings() {
    let mut server = Server::new();
    let dir = workspace();

    let mock = server
        .mock("GET", "/repos/octocat/hello/releases/42/assets")
        .with_status(200)
        .with_body(r#"[{"id": 9, "name": "app.tar.gz", "size": 4096}]"#)
        .create();

    github_release(dir.path())
        .env("GITHUB_RELEASE_USER", "octocat")
        .env("GITHUB_RELEASE_REPO", "hello")
        .env("GITHUB_API_URL", server.url())
        .args(["list", "--assets", "--id", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4096"))
        .stdout(predicate::str::contains("app.tar.gz"));

    mock.assert();
}

#[test]
fn test_show_latest_release_by_default() {
    let mut server = Server::new();
    let dir = workspace();

    let mock = server
        .mock("GET", "/repos/octocat/hello/releases/latest")
        .with_status(200)
        .with_body(r#"{"id": 1, "tag_name": "v1.0.0"}"#)
        .create();

    github_release(dir.path())
        .args(["-u", "octocat", "-r", "hello", "--api-url", &server.url(), "show"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("get a single release:\n{"))
        .stdout(predicate::str::contains("\t\"tag_name\": \"v1.0.0\""));

    mock.assert();
}

#[test]
fn test_show_by_tag() {
    let mut server = Server::new();
    let dir = workspace();

    let mock = server
        .mock("GET", "/repos/octocat/hello/releases/tags/v2.0.0")
        .with_status(200)
        .with_body(r#"{"id": 5, "tag_name": "v2.0.0"}"#)
        .create();

    github_release(dir.path())
        .args(["-u", "octocat", "-r", "hello", "--api-url", &server.url()])
        .args(["show", "--id", "1", "--tag", "v2.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v2.0.0"));

    mock.assert();
}

#[test]
fn test_create_release() {
    let mut server = Server::new();
    let dir = workspace();

    let mock = server
        .mock("POST", "/repos/octocat/hello/releases")
        .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
        .match_body(Matcher::PartialJsonString(
            r#"{"tag_name": "v1.0.0", "name": "First", "draft": true, "prerelease": false}"#
                .to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"id": 17, "tag_name": "v1.0.0", "url": "https://api/releases/17"}"#)
        .create();

    github_release(dir.path())
        .env("GITHUB_TOKEN", "secret")
        .args(["-u", "octocat", "-r", "hello", "--api-url", &server.url()])
        .args(["create", "--tag-name", "v1.0.0", "--name", "First", "--draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "create a release success: id=17 tag_name=v1.0.0 url=https://api/releases/17",
        ));

    mock.assert();
}

#[test]
fn test_create_validation_failure_is_reported() {
    let mut server = Server::new();
    let dir = workspace();

    let _mock = server
        .mock("POST", "/repos/octocat/hello/releases")
        .with_status(422)
        .with_body(
            r#"{"message": "Validation Failed", "errors": [{"resource": "Release", "code": "already_exists", "field": "tag_name"}]}"#,
        )
        .create();

    github_release(dir.path())
        .args(["--token", "secret", "-u", "octocat", "-r", "hello"])
        .args(["--api-url", &server.url(), "create", "--tag-name", "v1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create a release failed: Validation Failed"))
        .stdout(predicate::str::contains("0: already_exists tag_name"));
}

#[test]
fn test_delete_not_found() {
    let mut server = Server::new();
    let dir = workspace();

    let mock = server
        .mock("DELETE", "/repos/octocat/hello/releases/99")
        .with_status(404)
        .with_body(r#"{"message": "Not Found", "documentation_url": "https://docs.github.com"}"#)
        .create();

    github_release(dir.path())
        .args(["--token", "secret", "-u", "octocat", "-r", "hello"])
        .args(["--api-url", &server.url(), "delete", "-i", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delete a release failed: Not Found"))
        .stdout(predicate::str::contains("documentation_url: https://docs.github.com"));

    mock.assert();
}

#[test]
fn test_upload_asset() {
    let mut server = Server::new();
    let dir = workspace();
    std::fs::write(dir.path().join("notes.txt"), "release notes").unwrap();

    let mock = server
        .mock("POST", "/repos/octocat/hello/releases/42/assets")
        .match_query(Matcher::UrlEncoded(
            "name".to_string(),
            "notes.txt,label=Notes".to_string(),
        ))
        .match_header("content-type", "text/plain; charset=utf-8")
        .match_body("release notes")
        .with_status(201)
        .with_body(r#"{"id": 3, "name": "notes.txt", "url": "https://api/assets/3"}"#)
        .create();

    github_release(dir.path())
        .args(["--token", "secret", "-u", "octocat", "-r", "hello"])
        .args(["--api-url", "http://127.0.0.1:1", "--upload-url", &server.url()])
        .args(["upload", "-i", "42", "-l", "Notes", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "upload a release asset success: id=3 name=notes.txt",
        ));

    mock.assert();
}

#[test]
fn test_upload_missing_file_fails() {
    let dir = workspace();

    github_release(dir.path())
        .args(["--token", "secret", "-u", "octocat", "-r", "hello"])
        .args(["upload", "-i", "42", "missing.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file read failed"));
}

#[test]
fn test_missing_user_is_validation_error() {
    let dir = workspace();

    github_release(dir.path())
        .args(["-r", "hello", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user is required"));
}

#[test]
fn test_delete_requires_token() {
    let dir = workspace();

    github_release(dir.path())
        .args(["-u", "octocat", "-r", "hello", "delete", "-i", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("token is required"));
}

#[test]
fn test_settings_from_config_file() {
    let mut server = Server::new();
    let dir = workspace();
    let config = dir.path().join("release.toml");
    std::fs::write(
        &config,
        format!(
            "user = \"octocat\"\nrepo = \"hello\"\ngithub = \"{}/\"\nid = \"42\"\n",
            server.url()
        ),
    )
    .unwrap();

    let mock = server
        .mock("GET", "/repos/octocat/hello/releases/42")
        .with_status(200)
        .with_body(r#"{"id": 42, "tag_name": "v4.2.0"}"#)
        .create();

    github_release(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("v4.2.0"));

    mock.assert();
}

#[test]
fn test_config_file_discovered_in_working_directory() {
    let mut server = Server::new();
    let dir = workspace();
    std::fs::write(
        dir.path().join(".github-release.toml"),
        format!(
            "user = \"octocat\"\nrepo = \"from-file\"\ngithub = \"{}\"\n",
            server.url()
        ),
    )
    .unwrap();

    let mock = server
        .mock("GET", "/repos/octocat/from-flag/releases")
        .with_status(200)
        .with_body("[]")
        .create();

    github_release(dir.path())
        .args(["-r", "from-flag", "list"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_unreadable_explicit_config_fails() {
    let dir = workspace();

    github_release(dir.path())
        .args(["--config", "does-not-exist.toml", "-u", "octocat", "-r", "hello", "list"])
        .assert()
        .failure();
}

#[test]
fn test_missing_config_file_aborts() {
    let dir = tempdir().unwrap();

    github_release(dir.path())
        .args(["-u", "octocat", "-r", "hello", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .github-release.toml found"));
}
