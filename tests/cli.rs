use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{tempdir, NamedTempFile};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gitsummarize() -> Command {
    let mut cmd = Command::cargo_bin("gitsummarize").expect("Binary exists");
    for var in [
        "GITHUB_TOKEN",
        "OPENAI_API_KEYS",
        "OPENAI_API_KEY",
        "GEMINI_API_KEYS",
        "GEMINI_API_KEY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_subcommands() {
    gitsummarize()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tree").and(predicate::str::contains("snapshot")));
}

#[test]
fn invalid_url_fails_with_message() {
    gitsummarize()
        .args(["tree", "https://github.com/just-an-owner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid GitHub URL"));
}

#[test]
fn keys_prints_masked_round_robin_draws() {
    gitsummarize()
        .args(["keys", "openai", "--draws", "3"])
        .env("OPENAI_API_KEYS", "sk-first-secret,sk-second-secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("openai: 2 key(s)"))
        .stdout(predicate::str::contains("sk-f****\nsk-s****\nsk-f****"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn keys_fails_for_unconfigured_group() {
    gitsummarize()
        .args(["keys", "gemini"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API keys configured for credential group 'gemini'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn snapshot_writes_tree_and_corpus_files() {
    let server = MockServer::start().await;
    let blob_url = format!("{}/repos/octo/widgets/git/blobs/b1", server.uri());
    for (route, body) in [
        ("/repos/octo/widgets", json!({ "default_branch": "main" })),
        ("/repos/octo/widgets/commits/main", json!({ "sha": "c1" })),
        ("/repos/octo/widgets/commits/c1", json!({ "commit": { "tree": { "sha": "t1" } } })),
        (
            "/repos/octo/widgets/git/trees/t1",
            json!({ "tree": [{
                "path": "src/lib.rs",
                "type": "blob",
                "size": 12,
                "sha": "b1",
                "url": blob_url
            }] }),
        ),
        (
            "/repos/octo/widgets/git/blobs/b1",
            json!({ "encoding": "base64", "content": "cHViIGZuIHgoKXt9" }),
        ),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }

    let config = NamedTempFile::new().expect("temp config");
    fs::write(
        config.path(),
        format!("github:\n  api_base: \"{}\"\n", server.uri()),
    )
    .expect("write config");
    let out = tempdir().expect("temp dir");

    let config_path = config.path().to_path_buf();
    let out_path = out.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        gitsummarize()
            .arg("--config")
            .arg(&config_path)
            .args(["snapshot", "https://github.com/octo/widgets", "--output-dir"])
            .arg(&out_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"files\":1"));
    })
    .await
    .expect("cli ran");

    let tree = fs::read_to_string(out.path().join("directory_tree.txt")).expect("tree written");
    assert_eq!(tree, "└── src/\n    └── lib.rs");
    let corpus = fs::read_to_string(out.path().join("corpus.txt")).expect("corpus written");
    assert!(corpus.contains("File: src/lib.rs"));
    assert!(corpus.contains("pub fn x(){}"));
}
