#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitsummarize::config::Settings;
use gitsummarize::github::GitHubClient;

pub const OWNER: &str = "octo";
pub const REPO: &str = "widgets";
pub const BRANCH: &str = "main";
pub const COMMIT_SHA: &str = "c0ffee";
pub const TREE_SHA: &str = "7ree";

pub fn repo_url() -> String {
    format!("https://github.com/{OWNER}/{REPO}")
}

/// Settings pointed at the mock server, with no delay between search pages.
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.github.api_base = server.uri();
    settings.github.search_page_delay_ms = 0;
    settings.github.token = Some("test-token".to_string());
    settings
}

pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(&settings_for(server).github).expect("client builds")
}

pub fn repo_path(suffix: &str) -> String {
    format!("/repos/{OWNER}/{REPO}{suffix}")
}

pub fn blob_url(server: &MockServer, sha: &str) -> String {
    format!("{}{}", server.uri(), repo_path(&format!("/git/blobs/{sha}")))
}

pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Repository → branch → commit → tree.
pub async fn mount_commit_chain(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(repo_path("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "default_branch": BRANCH,
            "stargazers_count": 42,
            "forks_count": 7,
            "language": "Rust",
            "description": "Widgets for everyone"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path(&format!("/commits/{BRANCH}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sha": COMMIT_SHA })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path(&format!("/commits/{COMMIT_SHA}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": COMMIT_SHA,
            "commit": { "tree": { "sha": TREE_SHA } }
        })))
        .mount(server)
        .await;
}

pub async fn mount_tree(server: &MockServer, entries: Value) {
    Mock::given(method("GET"))
        .and(path(repo_path(&format!("/git/trees/{TREE_SHA}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": TREE_SHA,
            "tree": entries,
            "truncated": false
        })))
        .mount(server)
        .await;
}

/// A file row of a tree listing whose blob lives on the mock server.
pub fn file_entry(server: &MockServer, file_path: &str, size: u64) -> Value {
    let sha = blob_sha(file_path);
    json!({
        "path": file_path,
        "type": "blob",
        "size": size,
        "sha": sha,
        "url": blob_url(server, &sha)
    })
}

pub fn dir_entry(dir_path: &str) -> Value {
    json!({ "path": dir_path, "type": "tree", "sha": format!("t-{}", dir_path.replace('/', "-")) })
}

pub fn blob_sha(file_path: &str) -> String {
    format!("b-{}", file_path.replace(['/', '.'], "-"))
}

pub async fn mount_blob(server: &MockServer, file_path: &str, bytes: impl AsRef<[u8]>) {
    mount_blob_with(server, file_path, bytes, std::time::Duration::ZERO).await;
}

pub async fn mount_blob_with(
    server: &MockServer,
    file_path: &str,
    bytes: impl AsRef<[u8]>,
    delay: std::time::Duration,
) {
    let sha = blob_sha(file_path);
    Mock::given(method("GET"))
        .and(path(repo_path(&format!("/git/blobs/{sha}"))))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "sha": sha,
                    "encoding": "base64",
                    "content": encode(bytes)
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Zipball bytes with every member under `{OWNER}-{REPO}-{COMMIT_SHA}/`.
pub fn zipball(members: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;

    let root = format!("{OWNER}-{REPO}-{COMMIT_SHA}/");
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.add_directory(root.clone(), options).expect("root dir");
    for (name, bytes) in members {
        writer
            .start_file(format!("{root}{name}"), options)
            .expect("start member");
        writer.write_all(bytes).expect("write member");
    }
    writer.finish().expect("finish zip").into_inner()
}
